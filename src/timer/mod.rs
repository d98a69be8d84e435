//! Staged countdown timer
//!
//! The state machine shared by the two-stage roast stopwatch and the
//! repeating backwash cycle. Scheduling lives in `tasks::timer_driver`.

pub mod phase;
pub mod presets;
pub mod staged;

// Re-export main types
pub use phase::{minutes_seconds, parse_duration_field, Phase};
pub use presets::{stopwatch_timer, BackwashProgram, StopwatchFields};
pub use staged::{StagedTimer, TickOutcome, TimerStatus};
