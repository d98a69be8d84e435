//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{TimerController, TimerKind, TimerState};
use crate::{
    services::{play_cue, CueSink},
    timer::{BackwashProgram, StopwatchFields, TickOutcome},
};

/// Notifications for the driver task of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// Timer entered the running state (or restarted from scratch)
    Started,
    /// Timer left the running state
    Stopped,
}

/// Runtime settings shared by both timers
#[derive(Debug, Clone)]
pub struct TimerSettings {
    pub tick_period: Duration,
    pub cue_sink: CueSink,
    /// Whether the backwash cycle may be paused and resumed
    pub backwash_pause: bool,
    pub stopwatch_defaults: StopwatchFields,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            cue_sink: CueSink::Bell,
            backwash_pause: true,
            stopwatch_defaults: StopwatchFields::default(),
        }
    }
}

/// A controller together with its notification channels
#[derive(Debug)]
pub struct TimerSlot {
    pub controller: Arc<Mutex<TimerController>>,
    /// Run-state changes consumed by the driver task
    pub signal_tx: broadcast::Sender<TimerSignal>,
    /// Latest snapshot for display/status consumers
    pub update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _update_rx: watch::Receiver<TimerState>,
}

impl TimerSlot {
    fn new(controller: TimerController) -> Self {
        let (signal_tx, _) = broadcast::channel(16);
        let (update_tx, update_rx) = watch::channel(controller.snapshot());
        Self {
            controller: Arc::new(Mutex::new(controller)),
            signal_tx,
            update_tx,
            _update_rx: update_rx,
        }
    }
}

/// Main application state that owns both timers
#[derive(Debug)]
pub struct AppState {
    pub stopwatch: TimerSlot,
    pub backwash: TimerSlot,
    pub settings: TimerSettings,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with both timers idle
    pub fn new(port: u16, host: String, settings: TimerSettings) -> Self {
        Self {
            stopwatch: TimerSlot::new(TimerController::stopwatch(&settings.stopwatch_defaults)),
            backwash: TimerSlot::new(TimerController::backwash()),
            settings,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    pub fn slot(&self, kind: TimerKind) -> &TimerSlot {
        match kind {
            TimerKind::Stopwatch => &self.stopwatch,
            TimerKind::Backwash => &self.backwash,
        }
    }

    /// Apply `op` to a timer under its lock and publish the resulting snapshot.
    ///
    /// The snapshot and any driver signal chosen by `signal_for` are sent
    /// before the lock is released, so consumers see them in mutation order.
    fn update_timer<F, S, R>(&self, kind: TimerKind, op: F, signal_for: S) -> Result<(R, TimerState), String>
    where
        F: FnOnce(&mut TimerController) -> R,
        S: FnOnce(&R, &TimerState) -> Option<TimerSignal>,
    {
        let slot = self.slot(kind);
        let mut controller = slot.controller.lock()
            .map_err(|e| format!("Failed to lock {} timer: {}", kind, e))?;

        let result = op(&mut *controller);
        let snapshot = controller.snapshot();

        // Notify display/status watchers
        if let Err(e) = slot.update_tx.send(snapshot.clone()) {
            warn!("Failed to send {} timer update: {}", kind, e);
        }
        if let Some(signal) = signal_for(&result, &snapshot) {
            self.signal(kind, signal);
        }
        drop(controller);

        Ok((result, snapshot))
    }

    /// Record a user-triggered action and apply it
    fn timer_action<F, S, R>(
        &self,
        kind: TimerKind,
        action: &str,
        op: F,
        signal_for: S,
    ) -> Result<(R, TimerState), String>
    where
        F: FnOnce(&mut TimerController) -> R,
        S: FnOnce(&R, &TimerState) -> Option<TimerSignal>,
    {
        let outcome = self.update_timer(kind, op, signal_for)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(format!("{}-{}", kind, action));
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(outcome)
    }

    fn signal(&self, kind: TimerKind, signal: TimerSignal) {
        // No receivers just means no driver is attached yet.
        if self.slot(kind).signal_tx.send(signal).is_err() {
            warn!("No driver listening for {} {:?} signal", kind, signal);
        }
    }

    /// Start or resume a timer. Returns whether it began running.
    pub fn start_timer(&self, kind: TimerKind) -> Result<(bool, TimerState), String> {
        self.timer_action(kind, "start", |c| c.start(), |started, _| {
            started.then_some(TimerSignal::Started)
        })
    }

    /// Pause a running timer. Returns whether it was running.
    pub fn pause_timer(&self, kind: TimerKind) -> Result<(bool, TimerState), String> {
        self.timer_action(kind, "pause", |c| c.pause(), |paused, _| {
            paused.then_some(TimerSignal::Stopped)
        })
    }

    /// Pause when running, start otherwise
    pub fn toggle_timer(&self, kind: TimerKind) -> Result<(bool, TimerState), String> {
        self.timer_action(kind, "toggle", |c| c.toggle(), |changed, snapshot| {
            match (*changed, snapshot.is_running()) {
                (false, _) => None,
                (true, true) => Some(TimerSignal::Started),
                (true, false) => Some(TimerSignal::Stopped),
            }
        })
    }

    /// Rewind the stopwatch to stage 1, or return the backwash to ready
    pub fn reset_timer(&self, kind: TimerKind) -> Result<TimerState, String> {
        let ((), snapshot) = self.timer_action(
            kind,
            "reset",
            |c| match c.kind() {
                TimerKind::Stopwatch => c.reset(),
                TimerKind::Backwash => c.clear(),
            },
            |_, _| Some(TimerSignal::Stopped),
        )?;
        Ok(snapshot)
    }

    /// Load new stopwatch stage fields, resetting any run in progress
    pub fn configure_stopwatch(&self, fields: &StopwatchFields) -> Result<TimerState, String> {
        let ((), snapshot) = self.timer_action(
            TimerKind::Stopwatch,
            "configure",
            |c| c.configure_stopwatch(fields),
            |_, _| Some(TimerSignal::Stopped),
        )?;
        Ok(snapshot)
    }

    /// Run a backwash program from scratch, replacing any cycle in progress.
    ///
    /// The backwash cue sounds as round 1 begins.
    pub fn run_backwash(&self, program: BackwashProgram) -> Result<(bool, TimerState), String> {
        info!("Backwash trigger: {}", program.label());
        let (started, snapshot) = self.timer_action(
            TimerKind::Backwash,
            "run",
            |c| c.run_program(program),
            |started, _| started.then_some(TimerSignal::Started),
        )?;
        if started {
            play_cue(TimerKind::Backwash.cue(), &self.settings.cue_sink);
        }
        Ok((started, snapshot))
    }

    /// Advance a timer by one period (driver use only)
    pub fn tick_timer(&self, kind: TimerKind) -> Result<(TickOutcome, TimerState), String> {
        self.update_timer(kind, |c| c.tick(), |_, _| None)
    }

    /// Get the current snapshot of a timer
    pub fn get_timer_state(&self, kind: TimerKind) -> Result<TimerState, String> {
        self.slot(kind).controller.lock()
            .map(|controller| controller.snapshot())
            .map_err(|e| format!("Failed to lock {} timer: {}", kind, e))
    }

    /// Watch a timer's published snapshots
    pub fn subscribe_updates(&self, kind: TimerKind) -> watch::Receiver<TimerState> {
        self.slot(kind).update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerStatus;

    fn state() -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            TimerSettings {
                cue_sink: CueSink::Silent,
                stopwatch_defaults: StopwatchFields::from_seconds(90, 30),
                ..TimerSettings::default()
            },
        )
    }

    #[test]
    fn start_and_pause_emit_driver_signals() {
        let state = state();
        let mut signals = state.stopwatch.signal_tx.subscribe();

        let (started, snapshot) = state.start_timer(TimerKind::Stopwatch).unwrap();
        assert!(started);
        assert_eq!(snapshot.status, TimerStatus::Running);
        assert_eq!(signals.try_recv().unwrap(), TimerSignal::Started);

        // A second start changes nothing and wakes nobody.
        let (started, _) = state.start_timer(TimerKind::Stopwatch).unwrap();
        assert!(!started);
        assert!(signals.try_recv().is_err());

        let (paused, _) = state.pause_timer(TimerKind::Stopwatch).unwrap();
        assert!(paused);
        assert_eq!(signals.try_recv().unwrap(), TimerSignal::Stopped);
    }

    #[test]
    fn signals_follow_mutation_order() {
        let state = state();
        state.start_timer(TimerKind::Stopwatch).unwrap();
        let mut signals = state.stopwatch.signal_tx.subscribe();

        state.pause_timer(TimerKind::Stopwatch).unwrap();
        state.start_timer(TimerKind::Stopwatch).unwrap();
        assert_eq!(signals.try_recv().unwrap(), TimerSignal::Stopped);
        assert_eq!(signals.try_recv().unwrap(), TimerSignal::Started);
        assert!(state.get_timer_state(TimerKind::Stopwatch).unwrap().is_running());
    }

    #[test]
    fn ticks_publish_snapshots() {
        let state = state();
        let updates = state.subscribe_updates(TimerKind::Stopwatch);
        state.start_timer(TimerKind::Stopwatch).unwrap();
        state.tick_timer(TimerKind::Stopwatch).unwrap();
        assert_eq!(updates.borrow().display, "01:29");
    }

    #[test]
    fn configure_resets_and_records_action() {
        let state = state();
        state.start_timer(TimerKind::Stopwatch).unwrap();
        let fields = StopwatchFields {
            stage1_minutes: "abc".to_string(),
            ..StopwatchFields::default()
        };
        let snapshot = state.configure_stopwatch(&fields).unwrap();
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(snapshot.display, "00:00");

        let (started, _) = state.start_timer(TimerKind::Stopwatch).unwrap();
        assert!(!started);

        let (last_action, last_time) = state.get_last_action();
        assert_eq!(last_action.as_deref(), Some("stopwatch-start"));
        assert!(last_time.is_some());
    }

    #[test]
    fn backwash_reset_returns_to_ready() {
        let state = state();
        let (started, _) = state.run_backwash(BackwashProgram::TenSecond).unwrap();
        assert!(started);
        let snapshot = state.reset_timer(TimerKind::Backwash).unwrap();
        assert_eq!(snapshot.status_text, "Status: ready");
        assert_eq!(snapshot.display, "00:00");
    }
}
