//! Per-feature timer ownership and status text

use chrono::Utc;
use tracing::{debug, info};

use super::{TimerKind, TimerState};
use crate::{
    timer::{stopwatch_timer, BackwashProgram, StagedTimer, StopwatchFields, TickOutcome, TimerStatus},
    utils::format_mm_ss,
};

/// Owns the single timer instance of one feature
#[derive(Debug, Clone)]
pub struct TimerController {
    kind: TimerKind,
    timer: StagedTimer,
    /// Backwash program currently loaded
    program: Option<BackwashProgram>,
}

impl TimerController {
    /// Stopwatch controller loaded with the given stage fields
    pub fn stopwatch(fields: &StopwatchFields) -> Self {
        Self {
            kind: TimerKind::Stopwatch,
            timer: stopwatch_timer(fields),
            program: None,
        }
    }

    /// Backwash controller with no program loaded
    pub fn backwash() -> Self {
        Self {
            kind: TimerKind::Backwash,
            timer: StagedTimer::single_pass(Vec::new()),
            program: None,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn timer(&self) -> &StagedTimer {
        &self.timer
    }

    pub fn program(&self) -> Option<BackwashProgram> {
        self.program
    }

    pub fn start(&mut self) -> bool {
        let started = self.timer.start();
        if started {
            info!("{} started ({}s left in phase)", self.kind, self.timer.remaining_seconds());
        } else {
            debug!("{} start ignored in state {}", self.kind, self.timer.status().as_str());
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.timer.pause();
        if paused {
            info!("{} paused ({}s left in phase)", self.kind, self.timer.remaining_seconds());
        }
        paused
    }

    /// Start when stopped, pause when running
    pub fn toggle(&mut self) -> bool {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        info!("{} reset", self.kind);
    }

    /// Load new stage fields. Any run in progress is reset.
    pub fn configure_stopwatch(&mut self, fields: &StopwatchFields) {
        self.timer.configure(fields.phases(), 1);
        info!(
            "{} configured: stage 1 = {}s, stage 2 = {}s",
            self.kind,
            self.timer.phases()[0].duration_seconds,
            self.timer.phases()[1].duration_seconds
        );
    }

    /// Replace whatever is loaded with `program` and run it from the top
    pub fn run_program(&mut self, program: BackwashProgram) -> bool {
        self.program = Some(program);
        self.timer.configure(program.phases(), program.rounds());
        info!(
            "Starting {}... ({}s on / {}s off x {})",
            program.label(),
            program.on_seconds(),
            program.off_seconds(),
            program.rounds()
        );
        self.start()
    }

    /// Unload the program and return to the ready state
    pub fn clear(&mut self) {
        self.program = None;
        self.timer.configure(Vec::new(), 1);
        info!("{} cleared", self.kind);
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();
        if let Some(phase) = outcome.phase_completed {
            debug!("{} phase {} complete (round {})", self.kind, phase, self.timer.current_round());
        }
        if outcome.finished {
            info!("{} complete", self.kind);
        }
        outcome
    }

    pub fn status_text(&self) -> String {
        match self.kind {
            TimerKind::Stopwatch => self.stopwatch_status(),
            TimerKind::Backwash => self.backwash_status(),
        }
    }

    fn stopwatch_status(&self) -> String {
        let stage = self.timer.current_phase().map(|i| i + 1).unwrap_or(0);
        match self.timer.status() {
            TimerStatus::Idle => "Ready".to_string(),
            TimerStatus::Running => format!("Stage {} running", stage),
            TimerStatus::Paused => format!("Stage {} paused", stage),
            TimerStatus::Complete => "Complete".to_string(),
        }
    }

    fn backwash_status(&self) -> String {
        let Some(program) = self.program else {
            return "Status: ready".to_string();
        };
        let round = self.timer.current_round();
        let phase = self.timer.current_phase_label().unwrap_or("on");
        match self.timer.status() {
            TimerStatus::Idle => format!("{} ready", program.label()),
            TimerStatus::Running => format!("{} - round {} ({})", program.label(), round, phase),
            TimerStatus::Paused => {
                format!("{} paused - round {} ({})", program.label(), round, phase)
            }
            TimerStatus::Complete => format!("{} complete.", program.label()),
        }
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            kind: self.kind,
            status: self.timer.status(),
            display: format_mm_ss(self.timer.remaining_seconds()),
            status_text: self.status_text(),
            phase_index: self.timer.current_phase(),
            phase_label: self.timer.current_phase_label().map(str::to_string),
            round: self.timer.current_round(),
            total_rounds: self.timer.total_rounds(),
            remaining_seconds: self.timer.remaining_seconds(),
            updated_at: Utc::now(),
        }
    }
}
