// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeaLogError {
    #[error("Failed to open database: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Database connection is closed")]
    ConnectionClosed,

    #[error("Failed to initialize schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Database Error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TeaLogError>;
