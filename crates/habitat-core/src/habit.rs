//! Habits and their completion log.
//!
//! A habit carries the mutable streak state (`last_completed_date`,
//! `streak_count`). Every completion also produces an [`ActivityLog`] row;
//! logs are append-only and disappear only when their habit is deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Longest accepted habit name, counted in characters after trimming.
pub const MAX_NAME_CHARS: usize = 30;

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A recurring activity owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
  pub habit_id:            Uuid,
  pub owner_id:            Uuid,
  pub name:                String,
  /// Day the habit was created; never changes afterwards.
  pub creation_date:       NaiveDate,
  /// `None` until the habit is first marked done.
  pub last_completed_date: Option<NaiveDate>,
  /// Consecutive days completed. Resets lazily on the next completion, so a
  /// stale value survives until then.
  pub streak_count:        u32,
}

impl Habit {
  /// Whether the habit has already been marked done on `day`.
  pub fn is_done_on(&self, day: NaiveDate) -> bool {
    self.last_completed_date == Some(day)
  }
}

// ─── NewHabit ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::HabitStore::create_habit`]. The id is assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewHabit {
  pub owner_id:      Uuid,
  pub name:          String,
  pub creation_date: NaiveDate,
}

impl NewHabit {
  /// Validate and trim `name`. Rejects empty names and names longer than
  /// [`MAX_NAME_CHARS`].
  pub fn new(
    owner_id: Uuid,
    name: &str,
    creation_date: NaiveDate,
  ) -> Result<Self> {
    let name = validate_name(name)?;
    Ok(Self { owner_id, name, creation_date })
  }
}

fn validate_name(raw: &str) -> Result<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(Error::InvalidHabitName("name must not be empty".into()));
  }
  let len = trimmed.chars().count();
  if len > MAX_NAME_CHARS {
    return Err(Error::InvalidHabitName(format!(
      "name is {len} characters, at most {MAX_NAME_CHARS} allowed"
    )));
  }
  Ok(trimmed.to_owned())
}

// ─── Activity log ────────────────────────────────────────────────────────────

/// One recorded completion of a habit. Never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
  pub log_id:          Uuid,
  pub habit_id:        Uuid,
  pub completion_date: NaiveDate,
}

/// A completion produced by the streak engine, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewActivityLog {
  pub habit_id:        Uuid,
  pub completion_date: NaiveDate,
}
