//! Player/obstacle collision detection
//!
//! Only obstacles in the player's lane can collide. Coins are collected in a
//! narrow window around the player; canes and skateboards hit in a wider one.

use crate::consts::*;

use super::leveling::check_level_up;
use super::state::{GameEvent, GamePhase, GameState, HitCause, Lane, Obstacle, ObstacleKind};

/// Outcome of checking one obstacle against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Pickup,
    Hit(HitCause),
}

/// Classify an obstacle's contact with a player standing in `player_lane`
pub fn contact(obstacle: &Obstacle, player_lane: Lane) -> Contact {
    if obstacle.lane != player_lane {
        return Contact::None;
    }
    match obstacle.kind.hit_cause() {
        None if obstacle.distance.abs() <= COIN_PICKUP_RANGE => Contact::Pickup,
        Some(cause) if obstacle.distance.abs() <= HIT_RANGE => Contact::Hit(cause),
        _ => Contact::None,
    }
}

/// Resolve pickups and hits in spawn order.
///
/// A hit ends the run: phase becomes `Ended`, every obstacle cue stops, and
/// no further obstacles are checked. Returns the cause in that case.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<HitCause> {
    let mut i = 0;
    while i < state.obstacles.len() {
        match contact(&state.obstacles[i], state.player_lane) {
            Contact::None => i += 1,
            Contact::Pickup => {
                let coin = state.remove_obstacle(i, events);
                debug_assert_eq!(coin.kind, ObstacleKind::Coin);
                state.score += coin.coin_amount as u64;
                log::debug!("Collected {} coins (score {})", coin.coin_amount, state.score);
                events.push(GameEvent::CoinCollected {
                    amount: coin.coin_amount,
                    score: state.score,
                });
                check_level_up(state, events);
            }
            Contact::Hit(cause) => {
                log::info!("Hit by a {} with score {}", cause, state.score);
                state.phase = GamePhase::Ended;
                events.push(GameEvent::Hit {
                    cause,
                    score: state.score,
                });
                state.silence_obstacles(events);
                return Some(cause);
            }
        }
    }
    None
}
