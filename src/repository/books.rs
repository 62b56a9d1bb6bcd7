//! Books repository: the shared catalog behind one reader/writer lock

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, UpdateBook},
        series::BookSeries,
        stats::Statistics,
    },
};

use super::{catalog::Catalog, storage::JsonFile};

#[derive(Clone)]
pub struct BooksRepository {
    catalog: Arc<RwLock<Catalog>>,
    file: Arc<JsonFile>,
}

impl BooksRepository {
    /// Load the library from disk, starting empty when the file does not exist
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let file = JsonFile::new(&config.path, config.pretty);

        let catalog = match file.load().await? {
            Some(snapshot) => {
                let (catalog, report) = Catalog::from_snapshot(snapshot)?;
                if !report.is_clean() {
                    tracing::warn!(
                        dropped_members = report.dropped_members,
                        attached_books = report.attached_books,
                        stale_counters = report.stale_counters,
                        "Series index repaired while loading library"
                    );
                }
                catalog
            }
            None => {
                tracing::info!(
                    "No library file at {}, starting empty",
                    file.path().display()
                );
                Catalog::default()
            }
        };

        tracing::info!(
            books = catalog.books().len(),
            path = %file.path().display(),
            "Library loaded"
        );

        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
            file: Arc::new(file),
        })
    }

    /// Run a mutation under the write lock and persist the result.
    ///
    /// The mutation works on a copy that replaces the live catalog only once
    /// it is on disk. `None` means nothing matched and nothing is written.
    async fn mutate<T, F>(&self, apply: F) -> AppResult<Option<T>>
    where
        F: FnOnce(&mut Catalog) -> AppResult<Option<T>>,
    {
        let mut guard = self.catalog.write().await;
        let mut working = guard.clone();

        let Some(output) = apply(&mut working)? else {
            return Ok(None);
        };

        self.file.save(&working.to_snapshot()).await?;
        *guard = working;
        Ok(Some(output))
    }

    pub async fn list(&self) -> Vec<Book> {
        self.catalog.read().await.books().to_vec()
    }

    pub async fn get(&self, author: &str, title: &str) -> Option<Book> {
        self.catalog.read().await.find(author, title).cloned()
    }

    pub async fn create(&self, book: Book) -> AppResult<Book> {
        let stored = self.mutate(|catalog| catalog.add(book).map(Some)).await?;
        stored.ok_or_else(|| AppError::Validation("Book was not stored".to_string()))
    }

    pub async fn update(
        &self,
        author: &str,
        title: &str,
        changes: &UpdateBook,
    ) -> AppResult<Option<Book>> {
        self.mutate(|catalog| catalog.edit(author, title, changes))
            .await
    }

    pub async fn delete(&self, author: &str, title: &str) -> AppResult<bool> {
        let removed = self
            .mutate(|catalog| Ok(catalog.remove(author, title)))
            .await?;
        Ok(removed.is_some())
    }

    pub async fn add_quote(&self, author: &str, title: &str, quote: String) -> AppResult<bool> {
        let added = self
            .mutate(|catalog| Ok(catalog.add_quote(author, title, quote).then_some(())))
            .await?;
        Ok(added.is_some())
    }

    pub async fn quotes(&self, author: &str, title: &str) -> Option<Vec<String>> {
        self.catalog
            .read()
            .await
            .quotes(author, title)
            .map(<[String]>::to_vec)
    }

    pub async fn set_read(&self, author: &str, title: &str, read: bool) -> AppResult<bool> {
        let updated = self
            .mutate(|catalog| Ok(catalog.set_read(author, title, read).then_some(())))
            .await?;
        Ok(updated.is_some())
    }

    pub async fn statistics(&self) -> Statistics {
        self.catalog.read().await.statistics()
    }

    pub async fn series(&self) -> Vec<BookSeries> {
        self.catalog.read().await.series()
    }
}
