//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::NaiveDate;
use habitat_core::habit::{ActivityLog, Habit};
use uuid::Uuid;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn encode_streak(n: u32) -> i64 { i64::from(n) }

pub fn decode_streak(n: i64) -> Result<u32> {
  u32::try_from(n).map_err(|_| Error::Decode(format!("streak out of range: {n}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `habits` row.
pub struct RawHabit {
  pub habit_id:            String,
  pub owner_id:            String,
  pub name:                String,
  pub creation_date:       String,
  pub last_completed_date: Option<String>,
  pub streak_count:        i64,
}

impl RawHabit {
  /// Column list matching [`RawHabit::from_row`].
  pub const COLUMNS: &'static str =
    "habit_id, owner_id, name, creation_date, last_completed_date, streak_count";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      habit_id:            row.get(0)?,
      owner_id:            row.get(1)?,
      name:                row.get(2)?,
      creation_date:       row.get(3)?,
      last_completed_date: row.get(4)?,
      streak_count:        row.get(5)?,
    })
  }

  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      habit_id:            decode_uuid(&self.habit_id)?,
      owner_id:            decode_uuid(&self.owner_id)?,
      name:                self.name,
      creation_date:       decode_date(&self.creation_date)?,
      last_completed_date: self
        .last_completed_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      streak_count:        decode_streak(self.streak_count)?,
    })
  }
}

/// Raw values read directly from an `activity_logs` row.
pub struct RawLog {
  pub log_id:          String,
  pub habit_id:        String,
  pub completion_date: String,
}

impl RawLog {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      log_id:          row.get(0)?,
      habit_id:        row.get(1)?,
      completion_date: row.get(2)?,
    })
  }

  pub fn into_log(self) -> Result<ActivityLog> {
    Ok(ActivityLog {
      log_id:          decode_uuid(&self.log_id)?,
      habit_id:        decode_uuid(&self.habit_id)?,
      completion_date: decode_date(&self.completion_date)?,
    })
  }
}
