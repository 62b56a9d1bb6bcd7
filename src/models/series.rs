//! Series model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{book::Book, null_as_default};

/// Books sharing a series name, with their read progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSeries {
    pub name: String,
    /// Member books in the order they joined the series
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<Book>,
    /// Number of member books
    #[serde(default)]
    pub total: usize,
    /// Number of member books marked read
    #[serde(default)]
    pub read: usize,
}
