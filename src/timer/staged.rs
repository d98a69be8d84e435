//! Multi-stage countdown state machine
//!
//! `StagedTimer` knows nothing about wall-clock time. Whoever owns it calls
//! [`StagedTimer::tick`] once per period while it is running; the returned
//! [`TickOutcome`] tells the caller when to play a cue or stop scheduling.

use serde::{Deserialize, Serialize};

use super::Phase;

/// Lifecycle of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Complete,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Complete => "complete",
        }
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Index of the phase that just ran out, if any
    pub phase_completed: Option<usize>,
    /// Round number (1-based) that just finished, if any
    pub round_completed: Option<u32>,
    /// The final phase of the final round finished on this tick
    pub finished: bool,
}

impl TickOutcome {
    /// A phase boundary was crossed, so a cue is due
    pub fn cue_due(&self) -> bool {
        self.phase_completed.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct StagedTimer {
    phases: Vec<Phase>,
    total_rounds: u32,
    /// `None` is the terminal sentinel (complete, or nothing configured)
    current_phase: Option<usize>,
    /// 1-based, never above `total_rounds`
    current_round: u32,
    remaining_seconds: u64,
    status: TimerStatus,
}

impl StagedTimer {
    /// Create an idle timer loaded with `phases`, repeated `total_rounds` times
    pub fn new(phases: Vec<Phase>, total_rounds: u32) -> Self {
        let mut timer = Self {
            phases: Vec::new(),
            total_rounds: 1,
            current_phase: None,
            current_round: 1,
            remaining_seconds: 0,
            status: TimerStatus::Idle,
        };
        timer.configure(phases, total_rounds);
        timer
    }

    /// Single-pass timer
    pub fn single_pass(phases: Vec<Phase>) -> Self {
        Self::new(phases, 1)
    }

    /// Replace the phase configuration and reset to the first phase.
    ///
    /// A round count of zero is treated as one.
    pub fn configure(&mut self, phases: Vec<Phase>, total_rounds: u32) {
        self.phases = phases;
        self.total_rounds = total_rounds.max(1);
        self.reset();
    }

    /// Begin or resume counting down.
    ///
    /// Returns `false` without changing anything when already running,
    /// complete, or when the current phase has nothing left to count.
    pub fn start(&mut self) -> bool {
        match self.status {
            TimerStatus::Running | TimerStatus::Complete => false,
            TimerStatus::Idle | TimerStatus::Paused => {
                if self.current_phase.is_none() || self.remaining_seconds == 0 {
                    return false;
                }
                self.status = TimerStatus::Running;
                true
            }
        }
    }

    /// Stop counting, keeping the current position. Returns `false` if not running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    /// Stop and rewind to the first phase of the first round
    pub fn reset(&mut self) {
        self.status = TimerStatus::Idle;
        self.current_round = 1;
        match self.phases.first() {
            Some(first) => {
                self.current_phase = Some(0);
                self.remaining_seconds = first.duration_seconds;
            }
            None => {
                self.current_phase = None;
                self.remaining_seconds = 0;
            }
        }
    }

    /// Advance by one period. A no-op unless running.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.status != TimerStatus::Running {
            return outcome;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return outcome;
        }

        let Some(index) = self.current_phase else {
            self.finish();
            outcome.finished = true;
            return outcome;
        };
        outcome.phase_completed = Some(index);

        if let Some(next) = self.next_phase_from(index + 1) {
            self.enter_phase(next);
            return outcome;
        }

        outcome.round_completed = Some(self.current_round);
        if self.current_round < self.total_rounds {
            if let Some(first) = self.next_phase_from(0) {
                self.current_round += 1;
                self.enter_phase(first);
                return outcome;
            }
        }

        self.finish();
        outcome.finished = true;
        outcome
    }

    fn next_phase_from(&self, start: usize) -> Option<usize> {
        self.phases
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, phase)| phase.duration_seconds > 0)
            .map(|(index, _)| index)
    }

    fn enter_phase(&mut self, index: usize) {
        self.current_phase = Some(index);
        self.remaining_seconds = self.phases[index].duration_seconds;
    }

    fn finish(&mut self) {
        self.status = TimerStatus::Complete;
        self.current_phase = None;
        self.remaining_seconds = 0;
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn current_phase(&self) -> Option<usize> {
        self.current_phase
    }

    pub fn current_phase_label(&self) -> Option<&str> {
        self.current_phase
            .and_then(|index| self.phases.get(index))
            .map(|phase| phase.label.as_str())
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Ticks needed to run a fresh timer to completion, saturating at `u64::MAX`
    pub fn total_ticks(&self) -> u64 {
        self.phases
            .iter()
            .map(|p| p.duration_seconds)
            .fold(0, u64::saturating_add)
            .saturating_mul(u64::from(self.total_rounds))
    }
}
