//! Utility functions module
//! 
//! This module contains formatting helpers and signal handling used
//! throughout the application.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_currency, format_mm_ss};
pub use signals::shutdown_signal;
