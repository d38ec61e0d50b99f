pub mod db;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod seed;
pub mod storage;
pub mod validation;

pub use error::{StorageError, StorageResult};
pub use storage::{SqliteStorage, Storage};
