//! Library statistics model

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

/// Ratio as a percentage, 0 when the whole is empty
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Read progress of one series
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeriesStat {
    pub name: String,
    pub total_books: usize,
    pub read_books: usize,
    pub percentage: f64,
}

/// Library statistics, computed on demand
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Statistics {
    pub total_books: usize,
    pub read_books: usize,
    pub read_percentage: f64,
    /// Book count per genre, in order of first appearance
    #[schema(value_type = Object)]
    pub books_by_genre: IndexMap<String, usize>,
    /// Book count per author, in order of first appearance
    #[schema(value_type = Object)]
    pub books_by_author: IndexMap<String, usize>,
    pub total_series: usize,
    pub series_stats: Vec<SeriesStat>,
}
