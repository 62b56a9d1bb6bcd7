//! Book (catalog entry) model and request types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::null_as_default;

/// Case-insensitive comparison used for every author, title and series lookup.
pub fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// A book of the catalog.
///
/// Identified by its (author, title) pair. Field names are the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    /// Publication year (0-9999)
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub read: bool,
    /// Quotes in insertion order
    #[serde(default, deserialize_with = "null_as_default")]
    pub quotes: Vec<String>,
    /// Series name, empty when the book is standalone
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub series: String,
    /// Position within the series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub series_order: i32,
}

impl Book {
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.author, &self.title)
    }

    pub fn matches(&self, author: &str, title: &str) -> bool {
        same_name(&self.author, author) && same_name(&self.title, title)
    }

    pub fn in_series(&self) -> bool {
        !self.series.is_empty()
    }
}

/// Identity of a book: the (author, title) pair, compared case-insensitively
#[derive(Debug, Clone)]
pub struct BookKey {
    pub author: String,
    pub title: String,
}

impl BookKey {
    pub fn new(author: &str, title: &str) -> Self {
        Self {
            author: author.to_string(),
            title: title.to_string(),
        }
    }

    pub fn matches(&self, author: &str, title: &str) -> bool {
        same_name(&self.author, author) && same_name(&self.title, title)
    }
}

impl PartialEq for BookKey {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.author, &other.title)
    }
}

impl Eq for BookKey {}

impl std::fmt::Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' by {}", self.title, self.author)
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[serde(default)]
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 9999, message = "Invalid year"))]
    pub year: i32,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub series_order: i32,
}

impl CreateBook {
    /// Trim surrounding whitespace from every text field
    pub fn trimmed(self) -> Self {
        Self {
            author: self.author.trim().to_string(),
            title: self.title.trim().to_string(),
            genre: self.genre.trim().to_string(),
            series: self.series.trim().to_string(),
            ..self
        }
    }
}

impl From<CreateBook> for Book {
    fn from(req: CreateBook) -> Self {
        Self {
            title: req.title,
            author: req.author,
            genre: req.genre,
            year: req.year,
            read: false,
            quotes: Vec::new(),
            series: req.series,
            series_order: req.series_order,
        }
    }
}

/// Update book request.
///
/// Empty author, title or genre leave the current value unchanged; an absent
/// year leaves the year unchanged. An empty series detaches the book from its
/// series.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[validate(range(min = 0, max = 9999, message = "Invalid year"))]
    pub year: Option<i32>,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub series_order: i32,
}

impl UpdateBook {
    pub fn trimmed(self) -> Self {
        Self {
            author: self.author.trim().to_string(),
            title: self.title.trim().to_string(),
            genre: self.genre.trim().to_string(),
            series: self.series.trim().to_string(),
            ..self
        }
    }
}

/// Mark as read request
#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkRead {
    #[serde(default)]
    pub read: bool,
}

/// Add quote request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuote {
    #[serde(default)]
    #[validate(length(min = 1, message = "Quote is required"))]
    pub quote: String,
}
