//! Error types for the core library

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store matched no row for an update it expected to apply.
    #[error("Concurrency conflict while updating task {0}")]
    Concurrency(Uuid),

    #[error("Store misconfigured: {0}")]
    Misconfigured(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.message().contains("no such table") => {
                Error::Misconfigured(db.message().to_string())
            }
            _ => Error::Storage(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::Storage(format!("Migration failed: {}", err))
    }
}
