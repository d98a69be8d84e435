//! Audible cues for phase completion
//!
//! Cues are fire-and-forget: playback runs on a spawned task and any failure
//! is logged and dropped.

use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info, warn};

/// Sounds the timers can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Roast stage finished
    StageBeep,
    /// Backwash on/off switch
    BackwashBeep,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::StageBeep => "stage-beep",
            Cue::BackwashBeep => "backwash-beep",
        }
    }
}

/// Where cues are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueSink {
    /// Terminal bell on stdout
    Bell,
    /// External player invoked as `<program> <cue-name>`
    Command(String),
    Silent,
}

/// Play `cue` without waiting for it to finish
pub fn play_cue(cue: Cue, sink: &CueSink) {
    match sink {
        CueSink::Silent => {
            debug!("Cue {} suppressed (silent)", cue.name());
        }
        CueSink::Bell => {
            tokio::spawn(async move {
                if let Err(e) = ring_bell().await {
                    debug!("Could not play {}: {}", cue.name(), e);
                }
            });
        }
        CueSink::Command(program) => {
            let program = program.clone();
            tokio::spawn(async move {
                if let Err(e) = run_cue_command(&program, cue).await {
                    warn!("Could not play {}: {}", cue.name(), e);
                }
            });
        }
    }
}

async fn ring_bell() -> Result<(), String> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"\x07")
        .await
        .map_err(|e| format!("Failed to write bell: {}", e))?;
    stdout
        .flush()
        .await
        .map_err(|e| format!("Failed to flush stdout: {}", e))
}

async fn run_cue_command(program: &str, cue: Cue) -> Result<(), String> {
    debug!("Playing {} via {}", cue.name(), program);

    let output = Command::new(program)
        .arg(cue.name())
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr));
    }

    Ok(())
}

/// Check that the configured cue player can be launched
pub async fn check_cue_player(sink: &CueSink) -> Result<(), String> {
    let CueSink::Command(program) = sink else {
        return Ok(());
    };

    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("{} is not available, cues will be dropped", program))?;

    info!("Cue player {} is available", program);
    Ok(())
}
