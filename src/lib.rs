//! Bookshelf - personal library catalog
//!
//! A REST JSON API over a small book catalog kept in memory and persisted to a
//! single JSON document after every change.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
