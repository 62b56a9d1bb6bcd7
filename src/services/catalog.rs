//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, CreateQuote, UpdateBook},
    repository::Repository,
};

fn not_found(author: &str, title: &str) -> AppError {
    AppError::NotFound(format!("Book '{}' by {} not found", title, author))
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, author: &str, title: &str) -> AppResult<Book> {
        let (author, title) = (author.trim(), title.trim());
        self.repository
            .books
            .get(author, title)
            .await
            .ok_or_else(|| not_found(author, title))
    }

    /// Create a book; it starts unread and without quotes
    pub async fn create_book(&self, request: CreateBook) -> AppResult<Book> {
        let request = request.trimmed();
        request.validate()?;

        let created = self.repository.books.create(Book::from(request)).await?;
        tracing::info!(author = %created.author, title = %created.title, "Book added");
        Ok(created)
    }

    /// Apply a partial update to the book identified by (author, title)
    pub async fn update_book(
        &self,
        author: &str,
        title: &str,
        changes: UpdateBook,
    ) -> AppResult<Book> {
        let (author, title) = (author.trim(), title.trim());
        let changes = changes.trimmed();
        changes.validate()?;

        self.repository
            .books
            .update(author, title, &changes)
            .await?
            .ok_or_else(|| not_found(author, title))
    }

    pub async fn delete_book(&self, author: &str, title: &str) -> AppResult<()> {
        let (author, title) = (author.trim(), title.trim());
        if !self.repository.books.delete(author, title).await? {
            return Err(not_found(author, title));
        }
        tracing::info!(author, title, "Book removed");
        Ok(())
    }

    pub async fn add_quote(&self, author: &str, title: &str, request: CreateQuote) -> AppResult<()> {
        let (author, title) = (author.trim(), title.trim());
        let request = CreateQuote {
            quote: request.quote.trim().to_string(),
        };
        request.validate()?;

        if !self
            .repository
            .books
            .add_quote(author, title, request.quote)
            .await?
        {
            return Err(not_found(author, title));
        }
        Ok(())
    }

    pub async fn get_quotes(&self, author: &str, title: &str) -> AppResult<Vec<String>> {
        let (author, title) = (author.trim(), title.trim());
        self.repository
            .books
            .quotes(author, title)
            .await
            .ok_or_else(|| not_found(author, title))
    }

    pub async fn mark_as_read(&self, author: &str, title: &str, read: bool) -> AppResult<()> {
        let (author, title) = (author.trim(), title.trim());
        if !self.repository.books.set_read(author, title, read).await? {
            return Err(not_found(author, title));
        }
        Ok(())
    }
}
