//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::{services::CueSink, state::TimerSettings, timer::StopwatchFields};

/// How phase-completion cues are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CueMode {
    /// Ring the terminal bell
    Bell,
    /// Run an external player command
    Command,
    /// No sound
    Silent,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "roast-bench")]
#[command(about = "A state-managed HTTP server for café roast timers, backwash cycles and pricing calculators")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Timer tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// How to play phase-completion cues
    #[arg(long, value_enum, default_value = "bell")]
    pub cue: CueMode,

    /// Player invoked as `<command> <cue-name>` when --cue=command
    #[arg(long, default_value = "paplay")]
    pub cue_command: String,

    /// Disallow pausing a running backwash cycle
    #[arg(long)]
    pub no_backwash_pause: bool,

    /// Default stopwatch stage 1 length in seconds
    #[arg(long, default_value = "0")]
    pub stage1: u64,

    /// Default stopwatch stage 2 length in seconds
    #[arg(long, default_value = "0")]
    pub stage2: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn cue_sink(&self) -> CueSink {
        match self.cue {
            CueMode::Bell => CueSink::Bell,
            CueMode::Command => CueSink::Command(self.cue_command.clone()),
            CueMode::Silent => CueSink::Silent,
        }
    }

    /// Timer settings derived from the CLI flags
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_period: Duration::from_millis(self.tick_ms),
            cue_sink: self.cue_sink(),
            backwash_pause: !self.no_backwash_pause,
            stopwatch_defaults: StopwatchFields::from_seconds(self.stage1, self.stage2),
        }
    }
}
