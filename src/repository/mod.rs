//! Repository layer: the catalog store and its JSON file

pub mod books;
pub mod catalog;
mod series;
pub mod storage;

use crate::{config::StorageConfig, error::AppResult};

/// Main repository struct holding the catalog store
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Open the repository, loading the library file
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        Ok(Self {
            books: books::BooksRepository::open(config).await?,
        })
    }
}
