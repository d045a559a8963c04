//! Core types and logic for the Habitat habit tracker.
//!
//! Holds the streak engine, the stats aggregator and the [`store::HabitStore`]
//! abstraction. This crate is free of database and transport dependencies;
//! storage backends and front-ends depend on it.

pub mod clock;
pub mod error;
pub mod habit;
pub mod stats;
pub mod store;
pub mod streak;
pub mod tracker;

pub use error::{Error, Result};
