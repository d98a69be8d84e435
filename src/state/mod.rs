//! State management module
//! 
//! This module contains the timer controllers, their published snapshots and
//! the shared application state.

pub mod app_state;
pub mod controller;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerSettings, TimerSignal, TimerSlot};
pub use controller::TimerController;
pub use timer_state::{TimerKind, TimerState};
