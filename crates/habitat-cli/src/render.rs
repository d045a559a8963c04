//! Plain-text rendering of command results.

use std::fmt::Write as _;

use chrono::NaiveDate;
use habitat_core::{
  habit::Habit,
  stats::HabitStats,
  streak::StreakChange,
  tracker::Completion,
};

pub fn habit_line(habit: &Habit, today: NaiveDate) -> String {
  let done = if habit.is_done_on(today) { "  [done today]" } else { "" };
  format!(
    "{}  {:<30}  {} day streak{done}",
    habit.habit_id, habit.name, habit.streak_count
  )
}

pub fn habit_list(habits: &[Habit], today: NaiveDate) -> String {
  if habits.is_empty() {
    return "No habits yet. Create one with `habitat add <name>`.".to_owned();
  }
  habits
    .iter()
    .map(|h| habit_line(h, today))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn completion(done: &Completion) -> String {
  let note = match done.change {
    StreakChange::Started => "streak started",
    StreakChange::Extended => "streak extended",
    StreakChange::Unchanged => "already done today",
    StreakChange::Reset => "streak restarted",
  };
  format!(
    "{}: {} day streak ({note})",
    done.habit.name, done.habit.streak_count
  )
}

pub fn stats(habit: &Habit, stats: &HabitStats) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{}", habit.name);
  let _ = writeln!(out, "  completions:     {}", stats.completion_count);
  let _ = writeln!(out, "  days tracked:    {}", stats.days_since_start);
  let _ = writeln!(out, "  completion rate: {}%", stats.completion_rate);
  for (day, count) in stats.weekday_histogram.iter() {
    let _ = writeln!(out, "  {day}  {count}");
  }
  out.trim_end().to_owned()
}
