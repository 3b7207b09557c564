use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 150.0;
pub const DEFAULT_SCROLLED_OFFSET: f64 = 50.0;
pub const DEFAULT_AUTOPLAY_PERIOD_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// A section becomes a candidate once its top edge is at or above this
    /// offset from the viewport top.
    pub activation_threshold: f64,
    /// Page scroll offset past which the navigation bar reports "scrolled".
    pub scrolled_offset: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            scrolled_offset: DEFAULT_SCROLLED_OFFSET,
        }
    }
}

/// What a resume does to an armed autoplay timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausePolicy {
    /// The timer keeps its phase; ticks while paused are dropped.
    #[default]
    KeepCadence,
    /// Resuming replaces the timer so the next advance is a full period away.
    RestartOnResume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_period_ms: u64,
    pub pause_policy: PausePolicy,
}

impl CarouselConfig {
    pub fn with_period_ms(autoplay_period_ms: u64) -> Self {
        Self {
            autoplay_period_ms,
            ..Self::default()
        }
    }

    pub fn autoplay_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_period_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_period_ms: DEFAULT_AUTOPLAY_PERIOD_MS,
            pause_policy: PausePolicy::default(),
        }
    }
}
