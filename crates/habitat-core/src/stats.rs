//! Per-habit statistics, derived from the completion log.
//!
//! Read-only: nothing here mutates a habit or its logs.

use chrono::{Datelike as _, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  habit::{ActivityLog, Habit},
};

const WEEK: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

// ─── Weekday histogram ───────────────────────────────────────────────────────

/// Completion rows per weekday, indexed from Monday (0) to Sunday (6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayHistogram {
  counts: [u32; 7],
}

impl WeekdayHistogram {
  pub fn record(&mut self, date: NaiveDate) {
    let idx = date.weekday().num_days_from_monday() as usize;
    self.counts[idx] = self.counts[idx].saturating_add(1);
  }

  pub fn get(&self, day: Weekday) -> u32 {
    self.counts[day.num_days_from_monday() as usize]
  }

  /// Counts in Monday-first order.
  pub fn counts(&self) -> [u32; 7] { self.counts }

  /// All seven weekdays with their counts, zero buckets included.
  pub fn iter(&self) -> impl Iterator<Item = (Weekday, u32)> + '_ {
    WEEK.into_iter().map(move |d| (d, self.get(d)))
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
  /// Log rows, not distinct days.
  pub completion_count:  u64,
  /// Days from creation to today, both inclusive.
  pub days_since_start:  u64,
  /// Whole-number percentage of `completion_count / days_since_start`.
  /// Exceeds 100 when a habit is logged several times on one day.
  pub completion_rate:   u64,
  pub weekday_histogram: WeekdayHistogram,
}

/// Aggregate `logs` for `habit` as of `today`.
///
/// Fails with [`Error::InvalidDateRange`] when the habit was created after
/// `today`. The order of `logs` does not matter.
pub fn compute_stats(
  habit: &Habit,
  logs: &[ActivityLog],
  today: NaiveDate,
) -> Result<HabitStats> {
  let elapsed = today.signed_duration_since(habit.creation_date).num_days();
  if elapsed < 0 {
    return Err(Error::InvalidDateRange {
      creation_date: habit.creation_date,
      today,
    });
  }
  let days_since_start = elapsed as u64 + 1;

  let completion_count = logs.len() as u64;
  let completion_rate = percentage(completion_count, days_since_start);

  let mut weekday_histogram = WeekdayHistogram::default();
  for log in logs {
    weekday_histogram.record(log.completion_date);
  }

  Ok(HabitStats {
    completion_count,
    days_since_start,
    completion_rate,
    weekday_histogram,
  })
}

/// Half-way values round to even, so 12.5 becomes 12 and 37.5 becomes 38.
fn percentage(count: u64, days: u64) -> u64 {
  ((count as f64 / days as f64) * 100.0).round_ties_even() as u64
}
