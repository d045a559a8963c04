//! [`HabitTracker`] — runs the habit flows against a store and a clock.
//!
//! Every operation is scoped to an owner. A habit belonging to someone else
//! is reported as [`Error::NotOwner`] and left untouched.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  clock::Clock,
  habit::{ActivityLog, Habit, NewHabit},
  stats::{HabitStats, compute_stats},
  store::HabitStore,
  streak::{StreakChange, mark_done_with_change},
};

/// Outcome of marking a habit done.
#[derive(Debug, Clone, Serialize)]
pub struct Completion {
  pub habit:  Habit,
  pub log:    ActivityLog,
  pub change: StreakChange,
}

pub struct HabitTracker<S, C> {
  store: S,
  clock: C,
}

impl<S, C> HabitTracker<S, C>
where
  S: HabitStore,
  C: Clock,
{
  pub fn new(store: S, clock: C) -> Self { Self { store, clock } }

  pub fn store(&self) -> &S { &self.store }

  pub fn today(&self) -> NaiveDate { self.clock.today() }

  /// Create a habit for `owner_id`, dated today.
  pub async fn create_habit(&self, owner_id: Uuid, name: &str) -> Result<Habit> {
    let input = NewHabit::new(owner_id, name, self.today())?;
    let habit = self.store.create_habit(input).await.map_err(Error::store)?;
    tracing::info!(habit_id = %habit.habit_id, name = %habit.name, "habit created");
    Ok(habit)
  }

  /// The habits of `owner_id`, oldest first.
  pub async fn habits_for(&self, owner_id: Uuid) -> Result<Vec<Habit>> {
    self.store.list_habits(owner_id).await.map_err(Error::store)
  }

  /// Record a completion for today and advance the streak.
  pub async fn mark_done(&self, owner_id: Uuid, habit_id: Uuid) -> Result<Completion> {
    let habit = self.habit(owner_id, habit_id).await?;
    let (habit, new_log, change) = mark_done_with_change(habit, self.today());

    let log = self
      .store
      .record_completion(&habit, new_log)
      .await
      .map_err(Error::store)?;

    tracing::info!(
      %habit_id,
      streak = habit.streak_count,
      ?change,
      "habit marked done"
    );
    Ok(Completion { habit, log, change })
  }

  /// Completion statistics for a habit as of today.
  pub async fn stats(&self, owner_id: Uuid, habit_id: Uuid) -> Result<HabitStats> {
    let habit = self.habit(owner_id, habit_id).await?;
    let logs = self.store.list_logs(habit_id).await.map_err(Error::store)?;
    let stats = compute_stats(&habit, &logs, self.today())?;
    tracing::debug!(%habit_id, count = stats.completion_count, "stats computed");
    Ok(stats)
  }

  /// Delete a habit and its logs.
  pub async fn delete_habit(&self, owner_id: Uuid, habit_id: Uuid) -> Result<()> {
    self.habit(owner_id, habit_id).await?;
    self.store.delete_habit(habit_id).await.map_err(Error::store)?;
    tracing::info!(%habit_id, "habit deleted");
    Ok(())
  }

  /// Load a habit, checking that `owner_id` owns it.
  pub async fn habit(&self, owner_id: Uuid, habit_id: Uuid) -> Result<Habit> {
    let habit = self
      .store
      .get_habit(habit_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::HabitNotFound(habit_id))?;

    if habit.owner_id != owner_id {
      tracing::warn!(%habit_id, %owner_id, "rejected access to another user's habit");
      return Err(Error::NotOwner(habit_id));
    }
    Ok(habit)
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::HashMap, sync::Mutex};

  use chrono::Days;

  use super::*;
  use crate::{clock::FixedClock, habit::NewActivityLog};

  // A minimal in-memory store for exercising the tracker.
  #[derive(Default)]
  struct MemoryStore {
    inner: Mutex<Inner>,
  }

  #[derive(Default)]
  struct Inner {
    habits: Vec<Habit>,
    logs:   HashMap<Uuid, Vec<ActivityLog>>,
  }

  #[derive(Debug, thiserror::Error)]
  #[error("habit not found: {0}")]
  struct Missing(Uuid);

  impl MemoryStore {
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
      f(&mut self.inner.lock().unwrap())
    }
  }

  impl Inner {
    fn append(&mut self, input: NewActivityLog) -> ActivityLog {
      let log = ActivityLog {
        log_id:          Uuid::new_v4(),
        habit_id:        input.habit_id,
        completion_date: input.completion_date,
      };
      self.logs.entry(input.habit_id).or_default().push(log.clone());
      log
    }

    fn save(&mut self, habit: &Habit) -> Result<(), Missing> {
      let slot = self
        .habits
        .iter_mut()
        .find(|h| h.habit_id == habit.habit_id)
        .ok_or(Missing(habit.habit_id))?;
      *slot = habit.clone();
      Ok(())
    }
  }

  impl HabitStore for MemoryStore {
    type Error = Missing;

    async fn create_habit(&self, input: NewHabit) -> Result<Habit, Missing> {
      let habit = Habit {
        habit_id:            Uuid::new_v4(),
        owner_id:            input.owner_id,
        name:                input.name,
        creation_date:       input.creation_date,
        last_completed_date: None,
        streak_count:        0,
      };
      self.with(|s| s.habits.push(habit.clone()));
      Ok(habit)
    }

    async fn get_habit(&self, id: Uuid) -> Result<Option<Habit>, Missing> {
      Ok(self.with(|s| s.habits.iter().find(|h| h.habit_id == id).cloned()))
    }

    async fn list_habits(&self, owner_id: Uuid) -> Result<Vec<Habit>, Missing> {
      Ok(self.with(|s| {
        s.habits.iter().filter(|h| h.owner_id == owner_id).cloned().collect()
      }))
    }

    async fn save_habit(&self, habit: &Habit) -> Result<(), Missing> {
      self.with(|s| s.save(habit))
    }

    async fn delete_habit(&self, id: Uuid) -> Result<(), Missing> {
      self.with(|s| {
        let before = s.habits.len();
        s.habits.retain(|h| h.habit_id != id);
        s.logs.remove(&id);
        if s.habits.len() == before { Err(Missing(id)) } else { Ok(()) }
      })
    }

    async fn append_log(&self, input: NewActivityLog) -> Result<ActivityLog, Missing> {
      Ok(self.with(|s| s.append(input)))
    }

    async fn list_logs(&self, habit_id: Uuid) -> Result<Vec<ActivityLog>, Missing> {
      Ok(self.with(|s| s.logs.get(&habit_id).cloned().unwrap_or_default()))
    }

    async fn record_completion(
      &self,
      habit: &Habit,
      log: NewActivityLog,
    ) -> Result<ActivityLog, Missing> {
      self.with(|s| {
        s.save(habit)?;
        Ok(s.append(log))
      })
    }
  }

  fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4)
      .unwrap()
      .checked_add_days(Days::new(n))
      .unwrap()
  }

  fn tracker_on(store: MemoryStore, n: u64) -> HabitTracker<MemoryStore, FixedClock> {
    HabitTracker::new(store, FixedClock(day(n)))
  }

  #[tokio::test]
  async fn create_sets_creation_date_and_zero_streak() {
    let tracker = tracker_on(MemoryStore::default(), 0);
    let owner = Uuid::new_v4();

    let habit = tracker.create_habit(owner, " Gym ").await.unwrap();
    assert_eq!(habit.name, "Gym");
    assert_eq!(habit.creation_date, day(0));
    assert_eq!(habit.streak_count, 0);
    assert!(habit.last_completed_date.is_none());
  }

  #[tokio::test]
  async fn create_rejects_invalid_name() {
    let tracker = tracker_on(MemoryStore::default(), 0);
    let err = tracker.create_habit(Uuid::new_v4(), "   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidHabitName(_)));
    assert!(tracker.store().with(|s| s.habits.is_empty()));
  }

  #[tokio::test]
  async fn streak_across_days() {
    let owner = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 0);
    let habit = tracker.create_habit(owner, "Read").await.unwrap();
    let mut store = tracker.store;

    let mut streaks = Vec::new();
    // Day 0, 1, 1 again, 2, then skip to 5.
    for n in [0, 1, 1, 2, 5] {
      let t = tracker_on(store, n);
      let done = t.mark_done(owner, habit.habit_id).await.unwrap();
      assert_eq!(done.log.completion_date, day(n));
      streaks.push((done.habit.streak_count, done.change));
      store = t.store;
    }

    assert_eq!(streaks, vec![
      (1, StreakChange::Started),
      (2, StreakChange::Extended),
      (2, StreakChange::Unchanged),
      (3, StreakChange::Extended),
      (1, StreakChange::Reset),
    ]);

    let stored = store.with(|s| s.habits[0].clone());
    assert_eq!(stored.streak_count, 1);
    assert_eq!(stored.last_completed_date, Some(day(5)));
    assert_eq!(store.with(|s| s.logs[&habit.habit_id].len()), 5);
  }

  #[tokio::test]
  async fn stats_reflect_logged_rows() {
    let owner = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 1);
    let habit = tracker.create_habit(owner, "Walk").await.unwrap();
    tracker.mark_done(owner, habit.habit_id).await.unwrap();
    tracker.mark_done(owner, habit.habit_id).await.unwrap();

    let stats = tracker.stats(owner, habit.habit_id).await.unwrap();
    assert_eq!(stats.completion_count, 2);
    assert_eq!(stats.days_since_start, 1);
    assert_eq!(stats.completion_rate, 200);
    // day(1) is a Tuesday.
    assert_eq!(stats.weekday_histogram.counts(), [0, 2, 0, 0, 0, 0, 0]);
  }

  #[tokio::test]
  async fn stats_before_creation_is_invalid_range() {
    let owner = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 3);
    let habit = tracker.create_habit(owner, "Swim").await.unwrap();

    let earlier = tracker_on(tracker.store, 2);
    let err = earlier.stats(owner, habit.habit_id).await.unwrap_err();
    assert!(matches!(err, Error::InvalidDateRange { .. }));
  }

  #[tokio::test]
  async fn other_owner_cannot_touch_habit() {
    let victim = Uuid::new_v4();
    let attacker = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 0);
    let habit = tracker.create_habit(victim, "Journal").await.unwrap();

    let err = tracker.mark_done(attacker, habit.habit_id).await.unwrap_err();
    assert!(matches!(err, Error::NotOwner(id) if id == habit.habit_id));

    let err = tracker.stats(attacker, habit.habit_id).await.unwrap_err();
    assert!(matches!(err, Error::NotOwner(_)));

    let err = tracker.delete_habit(attacker, habit.habit_id).await.unwrap_err();
    assert!(matches!(err, Error::NotOwner(_)));

    let still_there = tracker.store().with(|s| s.habits[0].clone());
    assert_eq!(still_there, habit);
    assert!(tracker.store().with(|s| s.logs.is_empty()));
  }

  #[tokio::test]
  async fn missing_habit_is_not_found() {
    let tracker = tracker_on(MemoryStore::default(), 0);
    let id = Uuid::new_v4();
    let err = tracker.mark_done(Uuid::new_v4(), id).await.unwrap_err();
    assert!(matches!(err, Error::HabitNotFound(missing) if missing == id));
  }

  #[tokio::test]
  async fn delete_removes_habit_and_logs() {
    let owner = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 0);
    let habit = tracker.create_habit(owner, "Gym").await.unwrap();
    tracker.mark_done(owner, habit.habit_id).await.unwrap();

    tracker.delete_habit(owner, habit.habit_id).await.unwrap();
    assert!(tracker.habits_for(owner).await.unwrap().is_empty());
    assert!(tracker.store().list_logs(habit.habit_id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn habits_for_lists_only_own_habits_in_order() {
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();
    let tracker = tracker_on(MemoryStore::default(), 0);
    tracker.create_habit(me, "First").await.unwrap();
    tracker.create_habit(other, "Theirs").await.unwrap();
    tracker.create_habit(me, "Second").await.unwrap();

    let names: Vec<_> = tracker
      .habits_for(me)
      .await
      .unwrap()
      .into_iter()
      .map(|h| h.name)
      .collect();
    assert_eq!(names, ["First", "Second"]);
  }
}
