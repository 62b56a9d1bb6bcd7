//! Data models for Bookshelf

pub mod book;
pub mod library;
pub mod series;
pub mod stats;

use serde::{Deserialize, Deserializer};

// Re-export commonly used types
pub use book::{Book, BookKey, CreateBook, CreateQuote, MarkRead, UpdateBook};
pub use library::LibrarySnapshot;
pub use series::BookSeries;
pub use stats::{SeriesStat, Statistics};

/// Read a JSON `null` as the type's default (older data files store empty lists as null)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
