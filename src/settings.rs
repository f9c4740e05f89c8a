//! Game settings and preferences
//!
//! Loaded from a JSON file on native and from LocalStorage on web.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not read or write settings file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("settings are not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Level every 60 points, continuous lane-offset panning
    #[default]
    Standard,
    /// Level every 100 points, hard left/right panning
    Relaxed,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Standard => "Standard",
            Preset::Relaxed => "Relaxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(Preset::Standard),
            "relaxed" | "classic" => Some(Preset::Relaxed),
            _ => None,
        }
    }

    /// Points needed per level
    pub fn level_threshold(&self) -> u64 {
        match self {
            Preset::Standard => 60,
            Preset::Relaxed => 100,
        }
    }

    /// Pan applied per lane of offset between obstacle and player
    pub fn pan_per_lane(&self) -> f32 {
        match self {
            Preset::Standard => 0.7,
            Preset::Relaxed => 1.0,
        }
    }
}

/// Simulation timing, scoring and spawn rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Time between spawns at speed 1 (ms)
    pub spawn_interval_ms: u64,
    /// Time between ticks at speed 1 (ms)
    pub base_tick_ms: u64,
    /// Time between footsteps at speed 1 (ms)
    pub footstep_period_ms: u64,
    /// Points per level
    pub level_threshold: u64,
    /// Speed gained per level
    pub speed_step: f32,
    /// Delay after game over before a new run may start (ms)
    pub restart_delay_ms: u64,
    /// Probability a spawn is a cane
    pub cane_weight: f64,
    /// Probability a spawn is a skateboard (coins take the rest)
    pub skateboard_weight: f64,
    /// Keep dodged coins hovering just behind the player
    pub coin_grace: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 2000,
            base_tick_ms: 100,
            footstep_period_ms: 400,
            level_threshold: 60,
            speed_step: 0.2,
            restart_delay_ms: 2000,
            cane_weight: 0.4,
            skateboard_weight: 0.3,
            coin_grace: false,
        }
    }
}

/// How obstacle position maps to stereo pan and volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTuning {
    /// Pan per lane of offset (clamped to [-1, 1])
    pub pan_per_lane: f32,
    /// Distance over which an approaching obstacle fades in
    pub approach_range: f32,
    /// Quietest an approaching obstacle gets
    pub approach_floor: f32,
    /// Ticks for a passed obstacle to fade to silence
    pub fade_ticks: f32,
    /// Whether coins play a loop while approaching
    pub coin_cue: bool,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            pan_per_lane: 0.7,
            approach_range: 120.0,
            approach_floor: 0.05,
            fade_ticks: 10.0,
            coin_cue: true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the rules were derived from
    pub preset: Preset,

    // === Simulation ===
    pub rules: Rules,
    pub audio: AudioTuning,

    // === Output ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Accessibility ===
    /// Send level-up and game-over announcements to the screen reader
    pub announce: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Standard,

            rules: Rules::default(),
            audio: AudioTuning::default(),

            // Output
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Accessibility
            announce: true,
        }
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates preset-dependent rules)
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.rules.level_threshold = preset.level_threshold();
        self.audio.pan_per_lane = preset.pan_per_lane();
    }

    /// Effective output gain for the audio engine
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let r = &self.rules;
        positive("rules.spawn_interval_ms", r.spawn_interval_ms)?;
        positive("rules.base_tick_ms", r.base_tick_ms)?;
        positive("rules.footstep_period_ms", r.footstep_period_ms)?;
        positive("rules.level_threshold", r.level_threshold)?;

        if !r.speed_step.is_finite() || r.speed_step < 0.0 {
            return Err(invalid("rules.speed_step", "must be a finite value >= 0"));
        }
        for (field, w) in [
            ("rules.cane_weight", r.cane_weight),
            ("rules.skateboard_weight", r.skateboard_weight),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(invalid(field, "must be within [0, 1]"));
            }
        }
        if r.cane_weight + r.skateboard_weight > 1.0 {
            return Err(invalid(
                "rules.skateboard_weight",
                "cane and skateboard weights must not sum above 1",
            ));
        }

        let a = &self.audio;
        if !a.pan_per_lane.is_finite() || a.pan_per_lane < 0.0 {
            return Err(invalid("audio.pan_per_lane", "must be a finite value >= 0"));
        }
        if !a.approach_range.is_finite() || a.approach_range <= 0.0 {
            return Err(invalid("audio.approach_range", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&a.approach_floor) {
            return Err(invalid("audio.approach_floor", "must be within [0, 1]"));
        }
        if !a.fade_ticks.is_finite() || a.fade_ticks <= 0.0 {
            return Err(invalid("audio.fade_ticks", "must be > 0"));
        }

        for (field, v) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(field, "must be within [0, 1]"));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sidewalk_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

fn positive(field: &'static str, value: u64) -> Result<(), SettingsError> {
    if value == 0 {
        Err(invalid(field, "must be > 0"))
    } else {
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
