//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per timer firing, never wall-clock driven
//! - Randomness only through `RandomSource`
//! - Stable iteration order (spawn order)
//! - No audio or platform dependencies; effects come out as `GameEvent`s

pub mod autopilot;
pub mod collision;
pub mod cue;
pub mod leveling;
pub mod movement;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::choose_input;
pub use collision::{Contact, contact, resolve_collisions};
pub use cue::{cue_params, pan_for, refresh_cues, volume_for};
pub use leveling::{check_level_up, level_for_score, speed_for_level};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use spawner::{maybe_spawn, spawn_obstacle};
pub use state::{GameEvent, GamePhase, GameState, HitCause, Lane, Obstacle, ObstacleKind};
pub use tick::{InputEvent, apply_input, tick};
