//! Persisted library document

use serde::{Deserialize, Serialize};

use super::{book::Book, null_as_default, series::BookSeries};

/// The whole catalog as written to disk: `{"books": [...], "series": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<Book>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<BookSeries>,
}
