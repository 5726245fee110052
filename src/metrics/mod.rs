//! Derived dashboard statistics and progression trends.
//!
//! Everything in this module is a pure function over a workout entry
//! list; the current time is always passed in by the caller.

mod dashboard;
mod progression;

pub use dashboard::{
    days_since_last_workout, personal_records, recent_entries, DashboardStats,
};
pub use progression::{progression, Trend};
