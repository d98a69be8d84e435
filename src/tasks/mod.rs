//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod timer_driver;

// Re-export main functions
pub use timer_driver::{spawn_timer_driver, timer_driver_task};
