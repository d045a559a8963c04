//! Error type for `habitat-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A column held a value that does not map back to the domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("habit not found: {0}")]
  HabitNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
