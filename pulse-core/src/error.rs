use thiserror::Error as ThisError;

/// Failures raised by the storage layer. A missing row is never one of these;
/// lookups return `Option` instead.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StorageError {
    pub fn migration<D: std::fmt::Display>(d: D) -> Self {
        StorageError::Migration(d.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
