//! Timer configurations used by the stopwatch and backwash features

use serde::{Deserialize, Serialize};

use super::{phase::minutes_seconds, Phase, StagedTimer};

/// Minute/second fields for the two roast stages.
///
/// Fields are kept as raw text so that malformed input degrades to zero
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwatchFields {
    #[serde(default, deserialize_with = "lenient_field")]
    pub stage1_minutes: String,
    #[serde(default, deserialize_with = "lenient_field")]
    pub stage1_seconds: String,
    #[serde(default, deserialize_with = "lenient_field")]
    pub stage2_minutes: String,
    #[serde(default, deserialize_with = "lenient_field")]
    pub stage2_seconds: String,
}

impl StopwatchFields {
    /// Fields for the given stage lengths in seconds
    pub fn from_seconds(stage1: u64, stage2: u64) -> Self {
        Self {
            stage1_minutes: (stage1 / 60).to_string(),
            stage1_seconds: (stage1 % 60).to_string(),
            stage2_minutes: (stage2 / 60).to_string(),
            stage2_seconds: (stage2 % 60).to_string(),
        }
    }

    pub fn phases(&self) -> Vec<Phase> {
        vec![
            Phase::new(
                minutes_seconds(&self.stage1_minutes, &self.stage1_seconds),
                "Stage 1",
            ),
            Phase::new(
                minutes_seconds(&self.stage2_minutes, &self.stage2_seconds),
                "Stage 2",
            ),
        ]
    }
}

/// Accept numbers, strings or null for an input field
fn lenient_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Build the two-stage single-pass roast timer
pub fn stopwatch_timer(fields: &StopwatchFields) -> StagedTimer {
    StagedTimer::single_pass(fields.phases())
}

/// Fixed on/off backwash programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackwashProgram {
    /// 10 s on, 10 s off, 5 rounds
    TenSecond,
    /// 5 s on, 5 s off, 10 rounds
    FiveSecond,
}

impl BackwashProgram {
    pub fn on_seconds(&self) -> u64 {
        match self {
            BackwashProgram::TenSecond => 10,
            BackwashProgram::FiveSecond => 5,
        }
    }

    pub fn off_seconds(&self) -> u64 {
        self.on_seconds()
    }

    pub fn rounds(&self) -> u32 {
        match self {
            BackwashProgram::TenSecond => 5,
            BackwashProgram::FiveSecond => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackwashProgram::TenSecond => "10-second cycle",
            BackwashProgram::FiveSecond => "5-second cycle",
        }
    }

    pub fn phases(&self) -> Vec<Phase> {
        vec![
            Phase::new(self.on_seconds(), "on"),
            Phase::new(self.off_seconds(), "off"),
        ]
    }

    pub fn timer(&self) -> StagedTimer {
        StagedTimer::new(self.phases(), self.rounds())
    }
}
