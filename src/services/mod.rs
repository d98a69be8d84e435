//! Side-effect services module
//!
//! This module contains the fire-and-forget audio cue player used by the
//! timer driver.

pub mod audio;

// Re-export main types and functions
pub use audio::{check_cue_player, play_cue, Cue, CueSink};
