//! Statistics service

use crate::{
    models::{series::BookSeries, stats::Statistics},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reading statistics, computed on each call
    pub async fn get_stats(&self) -> Statistics {
        self.repository.books.statistics().await
    }

    /// All series with their member books
    pub async fn get_series(&self) -> Vec<BookSeries> {
        self.repository.books.series().await
    }
}
