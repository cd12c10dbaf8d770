//! Tunables for timers and the grid backdrop.
//!
//! The page may pass a JSON object to `start_game_with_config`; any key it
//! leaves out keeps its default, and nonsense values are pulled back into
//! range by [`GameConfig::sanitized`].

use serde::Deserialize;

use crate::log::console_log;
use crate::schedule::AmbushPolicy;

/// Smallest accepted rung spacing, in CSS pixels.
pub const MIN_RUNG_SPACING: f64 = 4.0;

fn default_ambush_interval() -> f64 { 14_000.0 }
fn default_ambush_skip() -> f64 { 0.42 }
fn default_speech_interval() -> f64 { 6_500.0 }
fn default_mission_interval() -> f64 { 5_200.0 }
fn default_flash_ms() -> f64 { 900.0 }
fn default_toast_ms() -> f64 { 2_200.0 }
fn default_rung_spacing() -> f64 { 44.0 }
fn default_scroll_step() -> f64 { 0.65 }
fn default_rails_per_side() -> i32 { 16 }
fn default_orb_count() -> usize { 8 }
fn default_sound() -> bool { true }

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_ambush_interval")]
    pub ambush_interval_ms: f64,
    /// An idle ambush tick fires only when its draw is strictly above this.
    #[serde(default = "default_ambush_skip")]
    pub ambush_skip_threshold: f64,
    #[serde(default = "default_speech_interval")]
    pub speech_interval_ms: f64,
    #[serde(default = "default_mission_interval")]
    pub mission_interval_ms: f64,
    #[serde(default = "default_flash_ms")]
    pub success_flash_ms: f64,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: f64,
    #[serde(default = "default_rung_spacing")]
    pub rung_spacing: f64,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
    #[serde(default = "default_rails_per_side")]
    pub rails_per_side: i32,
    #[serde(default = "default_orb_count")]
    pub orb_count: usize,
    #[serde(default = "default_sound")]
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ambush_interval_ms: default_ambush_interval(),
            ambush_skip_threshold: default_ambush_skip(),
            speech_interval_ms: default_speech_interval(),
            mission_interval_ms: default_mission_interval(),
            success_flash_ms: default_flash_ms(),
            toast_ms: default_toast_ms(),
            rung_spacing: default_rung_spacing(),
            scroll_step: default_scroll_step(),
            rails_per_side: default_rails_per_side(),
            orb_count: default_orb_count(),
            sound_enabled: default_sound(),
        }
    }
}

fn positive_or(field: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        console_log!("config: {field} = {value} rejected, using {fallback}");
        fallback
    }
}

fn noted<T: PartialEq + std::fmt::Debug>(field: &str, given: T, used: T) -> T {
    if given != used {
        console_log!("config: {field} = {given:?} clamped to {used:?}");
    }
    used
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<GameConfig>(json).map(GameConfig::sanitized)
    }

    /// Replace non-positive or non-finite timings and sizes with defaults,
    /// clamp the ambush threshold into `[0, 1]` and keep the grid drawable.
    /// Every adjustment is logged.
    pub fn sanitized(mut self) -> Self {
        let d = GameConfig::default();
        self.ambush_interval_ms = positive_or("ambush_interval_ms", self.ambush_interval_ms, d.ambush_interval_ms);
        self.speech_interval_ms = positive_or("speech_interval_ms", self.speech_interval_ms, d.speech_interval_ms);
        self.mission_interval_ms = positive_or("mission_interval_ms", self.mission_interval_ms, d.mission_interval_ms);
        self.success_flash_ms = positive_or("success_flash_ms", self.success_flash_ms, d.success_flash_ms);
        self.toast_ms = positive_or("toast_ms", self.toast_ms, d.toast_ms);
        let spacing = positive_or("rung_spacing", self.rung_spacing, d.rung_spacing);
        self.rung_spacing = noted("rung_spacing", spacing, spacing.max(MIN_RUNG_SPACING));
        if !self.scroll_step.is_finite() || self.scroll_step < 0.0 {
            console_log!("config: scroll_step = {} rejected, using {}", self.scroll_step, d.scroll_step);
            self.scroll_step = d.scroll_step;
        }
        self.ambush_skip_threshold = if self.ambush_skip_threshold.is_nan() {
            console_log!("config: ambush_skip_threshold is NaN, using {}", d.ambush_skip_threshold);
            d.ambush_skip_threshold
        } else {
            let t = self.ambush_skip_threshold;
            noted("ambush_skip_threshold", t, t.clamp(0.0, 1.0))
        };
        self.rails_per_side = noted("rails_per_side", self.rails_per_side, self.rails_per_side.clamp(0, 64));
        self.orb_count = noted("orb_count", self.orb_count, self.orb_count.min(64));
        self
    }

    pub fn ambush_policy(&self) -> AmbushPolicy {
        AmbushPolicy {
            interval_ms: self.ambush_interval_ms,
            skip_threshold: self.ambush_skip_threshold,
        }
    }
}
