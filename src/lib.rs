//! Roast Bench - A state-managed HTTP server for café timers and calculators
//! 
//! This library provides the staged countdown timer behind the two-stage
//! roast stopwatch and the backwash cycle, the driver task that ticks it,
//! and the roast, café revenue, bean mix and price list calculators.

pub mod api;
pub mod calc;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, TimerKind, TimerSettings};
pub use timer::{Phase, StagedTimer, TimerStatus};
pub use utils::signals::shutdown_signal;
