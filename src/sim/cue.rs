//! Obstacle position to stereo pan and volume
//!
//! Lane offset drives pan and distance drives loudness. There is no real
//! 3D model: an obstacle gets louder as it approaches, then fades out over
//! a few ticks once it has passed.

use crate::audio::CueParams;
use crate::settings::AudioTuning;

use super::state::{GameEvent, GameState, Lane};

/// Pan for an obstacle `relative_lane` lanes right (positive) or left
/// (negative) of the player
#[inline]
pub fn pan_for(relative_lane: i32, tuning: &AudioTuning) -> f32 {
    (relative_lane as f32 * tuning.pan_per_lane).clamp(-1.0, 1.0)
}

/// Volume for an obstacle at `distance`
#[inline]
pub fn volume_for(distance: i32, tuning: &AudioTuning) -> f32 {
    let d = distance as f32;
    if distance > 0 {
        (1.0 - d / tuning.approach_range).max(tuning.approach_floor)
    } else {
        (1.0 + d / tuning.fade_ticks).max(0.0)
    }
}

/// Cue parameters for an obstacle relative to the player
pub fn cue_params(lane: Lane, distance: i32, player_lane: Lane, tuning: &AudioTuning) -> CueParams {
    CueParams {
        pan: pan_for(lane.offset_from(player_lane), tuning),
        volume: volume_for(distance, tuning),
    }
}

/// Push fresh parameters for every audible obstacle (after a lane change)
pub fn refresh_cues(state: &GameState, events: &mut Vec<GameEvent>) {
    for obstacle in &state.obstacles {
        if let Some(cue) = obstacle.cue {
            let params = cue_params(obstacle.lane, obstacle.distance, state.player_lane, &state.audio);
            events.push(GameEvent::CueMoved { cue, params });
        }
    }
}
