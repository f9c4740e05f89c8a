//! Score-driven level and speed progression

use super::state::{GameEvent, GameState};

/// Level a score earns: one level per `threshold` points, starting at 1
pub fn level_for_score(score: u64, threshold: u64) -> u32 {
    let level = score / threshold.max(1) + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Speed multiplier for a level
pub fn speed_for_level(level: u32, step: f32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * step
}

/// Raise level and speed if the score has crossed a threshold.
///
/// Returns true on level up. Never lowers either value.
pub fn check_level_up(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let new_level = level_for_score(state.score, state.rules.level_threshold);
    if new_level <= state.level {
        return false;
    }

    state.level = new_level;
    state.speed = speed_for_level(new_level, state.rules.speed_step);
    log::info!("Level up! Level {} at speed {:.1}", state.level, state.speed);
    events.push(GameEvent::LevelUp {
        level: state.level,
        speed: state.speed,
    });
    true
}
