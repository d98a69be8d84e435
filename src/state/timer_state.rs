//! Published timer snapshots

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{services::Cue, timer::TimerStatus};

/// Which feature a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Stopwatch,
    Backwash,
}

impl TimerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::Stopwatch => "stopwatch",
            TimerKind::Backwash => "backwash",
        }
    }

    /// Cue played when one of this timer's phases runs out
    pub fn cue(&self) -> Cue {
        match self {
            TimerKind::Stopwatch => Cue::StageBeep,
            TimerKind::Backwash => Cue::BackwashBeep,
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a timer as seen by the display and status sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub kind: TimerKind,
    pub status: TimerStatus,
    /// `mm:ss` remaining in the current phase
    pub display: String,
    /// Human-readable phase/round/run state
    pub status_text: String,
    pub phase_index: Option<usize>,
    pub phase_label: Option<String>,
    pub round: u32,
    pub total_rounds: u32,
    pub remaining_seconds: u64,
    pub updated_at: DateTime<Utc>,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }
}
