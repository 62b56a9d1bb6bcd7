//! Series index kept alongside the book list.
//!
//! Members are stored as book keys, in the order they joined, and resolved
//! against the book list when the series are read. Totals and read counts are
//! therefore always derived from the current books.

use crate::models::{
    book::{same_name, Book, BookKey},
    series::BookSeries,
};

#[derive(Debug, Clone)]
pub(crate) struct SeriesEntry {
    pub name: String,
    pub members: Vec<BookKey>,
}

impl SeriesEntry {
    fn contains(&self, key: &BookKey) -> bool {
        self.members.iter().any(|m| m == key)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SeriesIndex {
    entries: Vec<SeriesEntry>,
}

impl SeriesIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| same_name(&e.name, name))
    }

    pub fn is_member(&self, name: &str, key: &BookKey) -> bool {
        self.position(name)
            .is_some_and(|idx| self.entries[idx].contains(key))
    }

    /// Spelling under which a series is stored
    pub fn stored_name(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].name.as_str())
    }

    /// Add a book to a series, creating the series on first use.
    /// Returns false when the book was already a member.
    pub fn join(&mut self, name: &str, key: BookKey) -> bool {
        match self.position(name) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                if entry.contains(&key) {
                    return false;
                }
                entry.members.push(key);
            }
            None => self.entries.push(SeriesEntry {
                name: name.to_string(),
                members: vec![key],
            }),
        }
        true
    }

    /// Remove a book from a series, dropping the series once it is empty.
    /// Returns false when the book was not a member.
    pub fn leave(&mut self, name: &str, key: &BookKey) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        let entry = &mut self.entries[idx];
        let Some(pos) = entry.members.iter().position(|m| m == key) else {
            return false;
        };
        entry.members.remove(pos);
        if entry.members.is_empty() {
            self.entries.remove(idx);
        }
        true
    }

    /// Follow a book whose author or title changed without leaving its series
    pub fn rename(&mut self, name: &str, old: &BookKey, new: BookKey) {
        if let Some(idx) = self.position(name) {
            if let Some(member) = self.entries[idx].members.iter_mut().find(|m| **m == *old) {
                *member = new;
            }
        }
    }

    /// Resolve every series against the book list
    pub fn materialize(&self, books: &[Book]) -> Vec<BookSeries> {
        self.entries
            .iter()
            .map(|entry| {
                let members: Vec<Book> = entry
                    .members
                    .iter()
                    .filter_map(|key| books.iter().find(|b| b.matches(&key.author, &key.title)))
                    .cloned()
                    .collect();
                BookSeries {
                    name: entry.name.clone(),
                    total: members.len(),
                    read: members.iter().filter(|b| b.read).count(),
                    books: members,
                }
            })
            .collect()
    }
}
