//! # schedule-engine
//!
//! Deterministic schedule validation for festival-goers.
//!
//! Given the screenings someone has picked, the engine reports every pair
//! that overlaps in time or leaves too little time to walk between venues,
//! and can audit a whole schedule at once.
//!
//! ## Modules
//!
//! - [`model`] — Venue, Film, Screening and `HH:MM` time values
//! - [`geo`] — Haversine distance and walking-time estimates
//! - [`conflict`] — Pairwise and whole-schedule conflict detection
//! - [`catalog`] — Explicit festival catalog with lookups and a demo fixture
//! - [`selection`] — Selection store trait with memory and JSON-file backends
//! - [`config`] — Travel-model parameters
//! - [`error`] — Error types

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod error;
pub mod geo;
pub mod model;
pub mod selection;

pub use catalog::Catalog;
pub use config::TravelModel;
pub use conflict::{
    check_conflicts, has_time_overlap, is_same_calendar_day, suggested_alternatives,
    travel_conflict, validate_full_schedule, Conflict, ConflictKind, ScheduleReport,
    ScheduleValidator,
};
pub use error::ScheduleError;
pub use geo::{distance_km, travel_minutes};
pub use model::{time_to_minutes, Coordinates, Film, Screening, TimeOfDay, Venue};
pub use selection::{JsonFileSelection, MemorySelection, SelectionStore};
