//! Error types for `habitat-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid habit name: {0}")]
  InvalidHabitName(String),

  /// The habit was created after the day stats were requested for.
  #[error("habit created on {creation_date} has no stats as of {today}")]
  InvalidDateRange {
    creation_date: NaiveDate,
    today:         NaiveDate,
  },

  #[error("habit not found: {0}")]
  HabitNotFound(Uuid),

  #[error("habit {0} belongs to another user")]
  NotOwner(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
