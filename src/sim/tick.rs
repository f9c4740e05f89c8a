//! Fixed timestep simulation tick
//!
//! One tick is strictly Spawn -> Movement/Cleanup -> Collision.

use serde::{Deserialize, Serialize};

use crate::audio::CueKind;

use super::collision::resolve_collisions;
use super::cue::refresh_cues;
use super::movement::advance_obstacles;
use super::rng::RandomSource;
use super::spawner::maybe_spawn;
use super::state::{GameEvent, GameState};

/// Decoded player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Left,
    Right,
    Jump,
}

/// Advance the run by one tick at clock time `now_ms`.
///
/// No-op unless the run is active, so a timer that fires just after the
/// player was hit changes nothing.
pub fn tick(
    state: &mut GameState,
    now_ms: u64,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if !state.running() {
        return;
    }

    state.ticks += 1;
    maybe_spawn(state, now_ms, rng, events);
    advance_obstacles(state, events);
    resolve_collisions(state, events);
    log::trace!(
        "Tick {}: {} obstacles, score {}",
        state.ticks,
        state.obstacles.len(),
        state.score
    );
}

/// Apply one input to the player.
///
/// Lane changes take effect at once: every obstacle cue is re-panned here
/// rather than on the next tick. Returns the one-shot cue to play, or None
/// when the input was ignored (not running, or already at the edge).
pub fn apply_input(
    state: &mut GameState,
    input: InputEvent,
    events: &mut Vec<GameEvent>,
) -> Option<CueKind> {
    if !state.running() {
        return None;
    }

    let (lane, cue) = match input {
        InputEvent::Left => (state.player_lane.left()?, CueKind::TurnLeft),
        InputEvent::Right => (state.player_lane.right()?, CueKind::TurnRight),
        InputEvent::Jump => return Some(CueKind::Jump),
    };
    state.player_lane = lane;
    refresh_cues(state, events);
    Some(cue)
}
