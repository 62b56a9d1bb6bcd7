//! In-memory catalog: the book list and its series index.
//!
//! All lookups are case-insensitive linear scans. Callers are expected to have
//! trimmed their input already.

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{same_name, Book, BookKey, UpdateBook},
        library::LibrarySnapshot,
        series::BookSeries,
        stats::{percentage, SeriesStat, Statistics},
    },
};

use super::series::SeriesIndex;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    series: SeriesIndex,
}

/// What had to be repaired while loading a snapshot
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Series members that did not resolve to a book of that series
    pub dropped_members: usize,
    /// Series books that were missing from their series
    pub attached_books: usize,
    /// Series whose stored counters disagreed with their members
    pub stale_counters: usize,
}

impl Reconciliation {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl Catalog {
    /// Rebuild a catalog from its persisted form.
    ///
    /// The series index is checked against the book list: members that do not
    /// resolve are dropped and series books missing from their series are
    /// appended to it. Duplicate book keys make the snapshot unusable.
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> AppResult<(Self, Reconciliation)> {
        let LibrarySnapshot { books, series } = snapshot;

        for (idx, book) in books.iter().enumerate() {
            if books[..idx].iter().any(|b| b.matches(&book.author, &book.title)) {
                return Err(AppError::Validation(format!(
                    "Duplicate book {} in library file",
                    book.key()
                )));
            }
        }

        let mut catalog = Catalog {
            books,
            series: SeriesIndex::default(),
        };
        let mut report = Reconciliation::default();

        for stored in &series {
            let mut resolved = 0;
            let mut read = 0;
            for member in &stored.books {
                let book = catalog
                    .find(&member.author, &member.title)
                    .filter(|b| b.in_series() && same_name(&b.series, &stored.name));
                let Some(book) = book else {
                    report.dropped_members += 1;
                    continue;
                };
                let key = book.key();
                let counted = book.read;
                if catalog.series.join(&stored.name, key) {
                    resolved += 1;
                    if counted {
                        read += 1;
                    }
                } else {
                    report.dropped_members += 1;
                }
            }
            if stored.total != resolved || stored.read != read {
                report.stale_counters += 1;
            }
        }

        let orphans: Vec<(String, BookKey)> = catalog
            .books
            .iter()
            .filter(|b| b.in_series() && !catalog.series.is_member(&b.series, &b.key()))
            .map(|b| (b.series.clone(), b.key()))
            .collect();
        for (name, key) in orphans {
            catalog.series.join(&name, key);
            report.attached_books += 1;
        }

        Ok((catalog, report))
    }

    pub fn to_snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.books.clone(),
            series: self.series(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, author: &str, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.matches(author, title))
    }

    fn position(&self, author: &str, title: &str) -> Option<usize> {
        self.books.iter().position(|b| b.matches(author, title))
    }

    /// Books carry the series name as the index spells it
    fn series_name(&self, name: &str) -> String {
        self.series.stored_name(name).unwrap_or(name).to_string()
    }

    /// Append a book, returning it as stored
    pub fn add(&mut self, mut book: Book) -> AppResult<Book> {
        if book.author.is_empty() || book.title.is_empty() {
            return Err(AppError::Validation(
                "Author and title are required".to_string(),
            ));
        }
        if self.position(&book.author, &book.title).is_some() {
            return Err(AppError::Conflict(format!(
                "Book {} already exists",
                book.key()
            )));
        }

        if book.in_series() {
            self.series.join(&book.series, book.key());
            book.series = self.series_name(&book.series);
        }
        self.books.push(book.clone());
        Ok(book)
    }

    /// Apply a partial update, returning the updated book or `None` if absent
    pub fn edit(
        &mut self,
        old_author: &str,
        old_title: &str,
        changes: &UpdateBook,
    ) -> AppResult<Option<Book>> {
        let Some(idx) = self.position(old_author, old_title) else {
            return Ok(None);
        };

        let old_key = self.books[idx].key();
        let old_series = self.books[idx].series.clone();
        let new_key = BookKey::new(
            non_empty_or(&changes.author, &old_key.author),
            non_empty_or(&changes.title, &old_key.title),
        );

        if new_key != old_key {
            if let Some(other) = self.position(&new_key.author, &new_key.title) {
                if other != idx {
                    return Err(AppError::Conflict(format!(
                        "Book {} already exists",
                        new_key
                    )));
                }
            }
        }

        if changes.series.is_empty() {
            if !old_series.is_empty() {
                self.series.leave(&old_series, &old_key);
            }
        } else if same_name(&changes.series, &old_series) {
            self.series.rename(&old_series, &old_key, new_key.clone());
        } else {
            if !old_series.is_empty() {
                self.series.leave(&old_series, &old_key);
            }
            self.series.join(&changes.series, new_key.clone());
        }
        let series = self.series_name(&changes.series);

        let book = &mut self.books[idx];
        book.author = new_key.author;
        book.title = new_key.title;
        if !changes.genre.is_empty() {
            book.genre = changes.genre.clone();
        }
        if let Some(year) = changes.year {
            book.year = year;
        }
        if changes.series.is_empty() {
            book.series.clear();
            book.series_order = 0;
        } else {
            book.series = series;
            book.series_order = changes.series_order;
        }

        Ok(Some(book.clone()))
    }

    pub fn remove(&mut self, author: &str, title: &str) -> Option<Book> {
        let idx = self.position(author, title)?;
        let book = self.books.remove(idx);
        if book.in_series() {
            self.series.leave(&book.series, &book.key());
        }
        Some(book)
    }

    pub fn add_quote(&mut self, author: &str, title: &str, quote: String) -> bool {
        match self.position(author, title) {
            Some(idx) => {
                self.books[idx].quotes.push(quote);
                true
            }
            None => false,
        }
    }

    pub fn quotes(&self, author: &str, title: &str) -> Option<&[String]> {
        self.find(author, title).map(|b| b.quotes.as_slice())
    }

    /// Set the read flag; series read counts follow since they are derived
    pub fn set_read(&mut self, author: &str, title: &str, read: bool) -> bool {
        match self.position(author, title) {
            Some(idx) => {
                self.books[idx].read = read;
                true
            }
            None => false,
        }
    }

    pub fn series(&self) -> Vec<BookSeries> {
        self.series.materialize(&self.books)
    }

    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total_books: self.books.len(),
            total_series: self.series.len(),
            ..Default::default()
        };

        let mut by_genre: IndexMap<String, usize> = IndexMap::new();
        let mut by_author: IndexMap<String, usize> = IndexMap::new();
        for book in &self.books {
            if book.read {
                stats.read_books += 1;
            }
            *by_genre.entry(book.genre.clone()).or_default() += 1;
            *by_author.entry(book.author.clone()).or_default() += 1;
        }
        stats.books_by_genre = by_genre;
        stats.books_by_author = by_author;
        stats.read_percentage = percentage(stats.read_books, stats.total_books);

        stats.series_stats = self
            .series()
            .into_iter()
            .map(|s| SeriesStat {
                percentage: percentage(s.read, s.total),
                name: s.name,
                total_books: s.total,
                read_books: s.read,
            })
            .collect();

        stats
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
