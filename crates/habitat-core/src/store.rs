//! The `HabitStore` trait.
//!
//! Implemented by storage backends (e.g. `habitat-store-sqlite`). The tracker
//! and front-ends depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::habit::{ActivityLog, Habit, NewActivityLog, NewHabit};

/// Abstraction over a habit store backend.
///
/// Habits are mutable in their streak fields only. Activity logs are
/// append-only and are removed solely by deleting their habit.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Persist a new habit with a store-assigned id and a zero streak.
  fn create_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve a habit by id. Returns `None` if not found.
  fn get_habit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + '_;

  /// All habits of `owner_id`, oldest first.
  fn list_habits(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Overwrite the stored name and streak state of an existing habit.
  ///
  /// `owner_id` and `creation_date` are never changed. Returns an error if
  /// the habit does not exist.
  fn save_habit<'a>(
    &'a self,
    habit: &'a Habit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete a habit together with all of its activity logs.
  fn delete_habit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Activity logs ─────────────────────────────────────────────────────

  /// Append a completion row with a store-assigned id.
  fn append_log(
    &self,
    input: NewActivityLog,
  ) -> impl Future<Output = Result<ActivityLog, Self::Error>> + Send + '_;

  /// Every log row of a habit, in insertion order.
  fn list_logs(
    &self,
    habit_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ActivityLog>, Self::Error>> + Send + '_;

  /// Save `habit` and append `log` as one atomic unit.
  fn record_completion<'a>(
    &'a self,
    habit: &'a Habit,
    log: NewActivityLog,
  ) -> impl Future<Output = Result<ActivityLog, Self::Error>> + Send + 'a;
}
