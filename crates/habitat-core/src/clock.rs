//! Source of "today" for the tracker.
//!
//! The engine never reads the system time itself; callers inject a [`Clock`].

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
