//! Engine-facing timer settings.
//!
//! `EngineConfig` is the validated, flat settings struct the engine
//! works with; the user-editable TOML file (`storage::Config`) converts
//! into it. Invalid values are clamped to safe minimums rather than
//! rejected - a bad settings write must never leave the timer unable
//! to count.

use serde::{Deserialize, Serialize};

use super::phases::Phase;

/// Validated engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    /// Work phases completed before a LongBreak is inserted.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_work: bool,
    /// Debounce before an auto-started phase actually begins, so the
    /// completion notification dispatches first. Milliseconds.
    #[serde(default = "default_auto_start_delay_ms")]
    pub auto_start_delay_ms: u64,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_work_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_auto_start_delay_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            long_break_interval: default_long_break_interval(),
            auto_start_breaks: false,
            auto_start_work: false,
            auto_start_delay_ms: default_auto_start_delay_ms(),
            notifications_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Full duration of a phase, in seconds.
    pub fn phase_duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }

    /// Clamp every field into its valid range. Durations are at least
    /// one second, the long-break interval at least one work phase.
    pub fn clamped(mut self) -> Self {
        self.work_secs = self.work_secs.max(1);
        self.short_break_secs = self.short_break_secs.max(1);
        self.long_break_secs = self.long_break_secs.max(1);
        self.long_break_interval = self.long_break_interval.max(1);
        self
    }

    /// Merge a partial update, clamping the result.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            work_secs: patch.work_secs.unwrap_or(self.work_secs),
            short_break_secs: patch.short_break_secs.unwrap_or(self.short_break_secs),
            long_break_secs: patch.long_break_secs.unwrap_or(self.long_break_secs),
            long_break_interval: patch.long_break_interval.unwrap_or(self.long_break_interval),
            auto_start_breaks: patch.auto_start_breaks.unwrap_or(self.auto_start_breaks),
            auto_start_work: patch.auto_start_work.unwrap_or(self.auto_start_work),
            auto_start_delay_ms: patch.auto_start_delay_ms.unwrap_or(self.auto_start_delay_ms),
            notifications_enabled: patch
                .notifications_enabled
                .unwrap_or(self.notifications_enabled),
        }
        .clamped()
    }
}

/// Partial settings update for `FocusEngine::update_settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default)]
    pub work_secs: Option<u64>,
    #[serde(default)]
    pub short_break_secs: Option<u64>,
    #[serde(default)]
    pub long_break_secs: Option<u64>,
    #[serde(default)]
    pub long_break_interval: Option<u32>,
    #[serde(default)]
    pub auto_start_breaks: Option<bool>,
    #[serde(default)]
    pub auto_start_work: Option<bool>,
    #[serde(default)]
    pub auto_start_delay_ms: Option<u64>,
    #[serde(default)]
    pub notifications_enabled: Option<bool>,
}
