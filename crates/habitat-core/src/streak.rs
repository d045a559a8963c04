//! The streak engine.
//!
//! A pure state transition over `(last_completed_date, streak_count, today)`.
//! It does not look habits up, check ownership, or persist anything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, NewActivityLog};

/// Which branch of the streak rules fired for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
  /// First completion ever.
  Started,
  /// Last completion was yesterday.
  Extended,
  /// Already completed today; the streak stays where it was.
  Unchanged,
  /// Gap of two or more days, or a last completion dated in the future.
  Reset,
}

/// Compute the streak after completing on `today`.
pub fn advance_streak(
  last_completed: Option<NaiveDate>,
  streak: u32,
  today: NaiveDate,
) -> (u32, StreakChange) {
  let Some(last) = last_completed else {
    return (1, StreakChange::Started);
  };
  match today.signed_duration_since(last).num_days() {
    1 => (streak.saturating_add(1), StreakChange::Extended),
    0 => (streak, StreakChange::Unchanged),
    _ => (1, StreakChange::Reset),
  }
}

/// Apply a completion on `today` to `habit`.
///
/// Every call yields a log entry and moves `last_completed_date` to `today`,
/// including repeated calls on the same day.
pub fn mark_done(habit: Habit, today: NaiveDate) -> (Habit, NewActivityLog) {
  let (habit, log, _) = mark_done_with_change(habit, today);
  (habit, log)
}

/// Like [`mark_done`], also reporting which rule fired.
pub fn mark_done_with_change(
  mut habit: Habit,
  today: NaiveDate,
) -> (Habit, NewActivityLog, StreakChange) {
  let (streak, change) =
    advance_streak(habit.last_completed_date, habit.streak_count, today);
  habit.streak_count = streak;
  habit.last_completed_date = Some(today);

  let log = NewActivityLog { habit_id: habit.habit_id, completion_date: today };
  (habit, log, change)
}
