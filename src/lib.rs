//! Sidewalk Runner - a three-lane endless runner played by ear
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `audio`: Cue model and the sink interface audio engines implement
//! - `platform`: Clock, timer scheduling and input decoding
//! - `game`: Controller that owns a run and drives the simulation
//! - `settings`: Tunable rules and audio preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, GameListener, GameOverReport};
pub use settings::{Preset, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Number of lanes (0 = left, 1 = middle, 2 = right)
    pub const LANE_COUNT: u8 = 3;
    /// Lane the player starts each run in
    pub const START_LANE: u8 = 1;

    /// Distance every obstacle spawns at; 0 is level with the player
    pub const SPAWN_DISTANCE: i32 = 100;
    /// Obstacles are cleaned up once their distance drops below this
    pub const PASSED_DISTANCE: i32 = -5;

    /// Coins are collected within +/- this distance
    pub const COIN_PICKUP_RANGE: i32 = 1;
    /// Canes and skateboards hit within +/- this distance
    pub const HIT_RANGE: i32 = 2;

    /// Coin grace window: a dodged coin in (GRACE_FLOOR, PASSED_DISTANCE)
    /// is pulled back to GRACE_RESET instead of being dropped
    pub const GRACE_FLOOR: i32 = -10;
    pub const GRACE_RESET: i32 = -4;

    /// Inclusive coin value range
    pub const COIN_MIN: u32 = 1;
    pub const COIN_MAX: u32 = 1000;

    /// Footsteps cycle through this many samples
    pub const FOOTSTEP_VARIANTS: u8 = 3;

    /// Maximum timer firings per pump to prevent spiral of death
    pub const MAX_TIMERS_PER_PUMP: usize = 8;
}
