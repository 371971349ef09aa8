//! Error types for the climate store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database file not found: {path}")]
    DatabaseNotFound { path: PathBuf },

    #[error("Database {path} has no '{table}' table")]
    MissingTable { path: PathBuf, table: &'static str },

    #[error("Query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
