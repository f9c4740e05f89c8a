//! Obstacle spawning
//!
//! One obstacle per spawn window; the window shrinks as speed increases.

use crate::audio::CueId;
use crate::consts::*;
use crate::settings::Rules;

use super::cue::cue_params;
use super::rng::RandomSource;
use super::state::{GameEvent, GameState, Lane, Obstacle, ObstacleKind};

/// Whether the spawn window has elapsed at `now_ms`
pub fn spawn_due(state: &GameState, now_ms: u64) -> bool {
    let elapsed = now_ms.saturating_sub(state.last_spawn_ms) as f64;
    elapsed > state.rules.spawn_interval_ms as f64 / state.speed as f64
}

/// Map a uniform draw onto the spawn table
pub fn pick_kind(r: f64, rules: &Rules) -> ObstacleKind {
    if r < rules.cane_weight {
        ObstacleKind::Cane
    } else if r < rules.cane_weight + rules.skateboard_weight {
        ObstacleKind::Skateboard
    } else {
        ObstacleKind::Coin
    }
}

/// Spawn one obstacle at the far end of a random lane
pub fn spawn_obstacle(
    state: &mut GameState,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let kind = pick_kind(rng.unit(), &state.rules);
    let lane = Lane::new(rng.int_inclusive(0, LANE_COUNT as u32 - 1) as u8).unwrap_or_default();
    let coin_amount = if kind == ObstacleKind::Coin {
        rng.int_inclusive(COIN_MIN, COIN_MAX)
    } else {
        0
    };

    let id = state.next_entity_id();
    let audible = kind != ObstacleKind::Coin || state.audio.coin_cue;
    let cue = audible.then(|| {
        (
            CueId(id),
            cue_params(lane, SPAWN_DISTANCE, state.player_lane, &state.audio),
        )
    });

    state.obstacles.push(Obstacle {
        id,
        kind,
        lane,
        distance: SPAWN_DISTANCE,
        coin_amount,
        cue: cue.map(|(cue_id, _)| cue_id),
    });
    log::debug!(
        "Spawned {} #{} in lane {} (coins: {})",
        kind.as_str(),
        id,
        lane.index(),
        coin_amount
    );
    events.push(GameEvent::Spawned { id, kind, lane, cue });
    id
}

/// Spawn if the window has elapsed, restarting the window
pub fn maybe_spawn(
    state: &mut GameState,
    now_ms: u64,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    if !spawn_due(state, now_ms) {
        return None;
    }
    let id = spawn_obstacle(state, rng, events);
    state.last_spawn_ms = now_ms;
    Some(id)
}
