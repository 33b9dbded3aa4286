//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod journal;
pub mod stats;

pub use journal::ActivityJournal;
pub use stats::StatsService;
