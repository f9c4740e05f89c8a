//! Idle/demo mode - a simple player that dodges by ear
//!
//! Sees only what a listener could: which lane each obstacle is in and how
//! close it is. Used by the headless runner and for soak tests.

use crate::consts::*;

use super::state::{GameState, Lane, ObstacleKind};
use super::tick::InputEvent;

/// Hazards closer than this in the player's lane trigger a dodge
pub const DANGER_DISTANCE: i32 = 6;
/// Coins closer than this are worth chasing
pub const COIN_CHASE_DISTANCE: i32 = 12;

/// Nearest upcoming hazard in `lane` that can still hit, if any
fn nearest_hazard(state: &GameState, lane: Lane) -> Option<i32> {
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.kind != ObstacleKind::Coin && o.distance >= -HIT_RANGE)
        .map(|o| o.distance)
        .min()
}

/// Whether `lane` is clear of hazards for the next `margin` ticks
fn lane_clear(state: &GameState, lane: Lane, margin: i32) -> bool {
    nearest_hazard(state, lane).is_none_or(|d| d > margin)
}

fn step_toward(from: Lane, to: Lane) -> Option<InputEvent> {
    match to.offset_from(from) {
        0 => None,
        d if d < 0 => Some(InputEvent::Left),
        _ => Some(InputEvent::Right),
    }
}

/// Pick at most one input for this tick
pub fn choose_input(state: &GameState) -> Option<InputEvent> {
    if !state.running() {
        return None;
    }
    let here = state.player_lane;

    // Dodge: move to the neighbor whose nearest hazard is farthest away
    if !lane_clear(state, here, DANGER_DISTANCE) {
        let escape = [here.left(), here.right()]
            .into_iter()
            .flatten()
            .filter(|&lane| lane_clear(state, lane, HIT_RANGE))
            .max_by_key(|&lane| {
                let room = nearest_hazard(state, lane).unwrap_or(i32::MAX);
                (room, lane == Lane::MIDDLE)
            });
        return escape.and_then(|lane| step_toward(here, lane));
    }

    // Chase the nearest coin we can reach before it enters the pickup window
    let target = state
        .obstacles
        .iter()
        .filter(|o| {
            o.kind == ObstacleKind::Coin
                && o.distance > COIN_PICKUP_RANGE
                && o.distance <= COIN_CHASE_DISTANCE
                && o.lane.offset_from(here).abs() < o.distance
        })
        .min_by_key(|o| o.distance)?;

    let next = if target.lane.offset_from(here) < 0 {
        here.left()
    } else {
        here.right()
    };
    match next {
        Some(lane) if target.lane != here && lane_clear(state, lane, DANGER_DISTANCE) => {
            step_toward(here, lane)
        }
        _ => None,
    }
}
