//! Timer driver background task
//!
//! One driver per timer. It sleeps until the timer is started, then ticks it
//! once per period until it is paused, reset or completes.

use std::sync::Arc;
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info, warn};

use crate::{
    services::play_cue,
    state::{AppState, TimerKind, TimerSignal},
};

/// Subscribe to `kind`'s signals and spawn its driver.
///
/// The subscription is taken before spawning so that a start issued right
/// after this call is never missed.
pub fn spawn_timer_driver(state: Arc<AppState>, kind: TimerKind) -> JoinHandle<()> {
    let signal_rx = state.slot(kind).signal_tx.subscribe();
    tokio::spawn(timer_driver_task(state, kind, signal_rx))
}

/// Current run state, treating a poisoned lock as stopped
fn is_running(state: &AppState, kind: TimerKind) -> bool {
    matches!(state.get_timer_state(kind).map(|s| s.is_running()), Ok(true))
}

/// Background task that ticks a timer while it is running
pub async fn timer_driver_task(
    state: Arc<AppState>,
    kind: TimerKind,
    mut signal_rx: Receiver<TimerSignal>,
) {
    info!("Starting {} driver task", kind);
    let period = state.settings.tick_period;

    loop {
        // Wait for the timer to be started
        match signal_rx.recv().await {
            Ok(TimerSignal::Started) => {}
            // A stop that arrives after a later start leaves the timer running
            Ok(TimerSignal::Stopped) if !is_running(&state, kind) => continue,
            Ok(TimerSignal::Stopped) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("{} driver lagged by {} signals", kind, skipped);
                if !is_running(&state, kind) {
                    continue;
                }
            }
            Err(RecvError::Closed) => {
                info!("{} signal channel closed, driver exiting", kind);
                return;
            }
        }

        debug!("{} driver ticking every {:?}", kind, period);
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                // Tick - advance the countdown
                _ = interval.tick() => {
                    let (outcome, snapshot) = match state.tick_timer(kind) {
                        Ok(result) => result,
                        Err(e) => {
                            error!("Failed to tick {} timer: {}", kind, e);
                            break;
                        }
                    };

                    debug!("{} tick: {} ({})", kind, snapshot.display, snapshot.status_text);

                    if outcome.cue_due() {
                        play_cue(kind.cue(), &state.settings.cue_sink);
                    }

                    if outcome.finished {
                        info!("{} finished: {}", kind, snapshot.status_text);
                        break;
                    }

                    if !snapshot.is_running() {
                        break;
                    }
                }

                // Run-state change - restart or stop ticking
                signal = signal_rx.recv() => {
                    match signal {
                        Ok(TimerSignal::Started) => {
                            debug!("{} restarted, realigning ticks", kind);
                            interval.reset();
                        }
                        Ok(TimerSignal::Stopped) => {
                            if is_running(&state, kind) {
                                debug!("{} stop superseded by a later start", kind);
                            } else {
                                debug!("{} stopped, driver going idle", kind);
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("{} driver lagged by {} signals", kind, skipped);
                        }
                        Err(RecvError::Closed) => {
                            info!("{} signal channel closed, driver exiting", kind);
                            return;
                        }
                    }
                }
            }
        }
    }
}
