//! Obstacle movement and cleanup

use crate::consts::*;

use super::cue::cue_params;
use super::leveling::check_level_up;
use super::state::{GameEvent, GameState, ObstacleKind};

/// Move every obstacle one step closer, score the ones that got past,
/// and drop them from the store
pub fn advance_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.obstacles.len() {
        let player_lane = state.player_lane;
        let obstacle = &mut state.obstacles[i];
        obstacle.distance -= 1;

        // Dodged coins hover just behind the player while the grace policy is on
        if state.rules.coin_grace
            && obstacle.kind == ObstacleKind::Coin
            && obstacle.distance > GRACE_FLOOR
            && obstacle.distance < PASSED_DISTANCE
            && obstacle.lane != player_lane
        {
            log::trace!("Coin #{} held at grace distance", obstacle.id);
            obstacle.distance = GRACE_RESET;
        }

        if let Some(cue) = obstacle.cue {
            let params = cue_params(obstacle.lane, obstacle.distance, player_lane, &state.audio);
            events.push(GameEvent::CueMoved { cue, params });
        }

        if obstacle.distance < PASSED_DISTANCE {
            let passed = state.remove_obstacle(i, events);
            let points = passed.kind.avoid_points();
            state.score += points;
            log::debug!(
                "{} #{} passed (+{}, score {})",
                passed.kind.as_str(),
                passed.id,
                points,
                state.score
            );
            events.push(GameEvent::Avoided {
                kind: passed.kind,
                points,
                score: state.score,
            });
            check_level_up(state, events);
            continue;
        }

        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueId;
    use crate::settings::{AudioTuning, Rules};
    use crate::sim::state::{Lane, Obstacle};

    fn state_with(obstacles: Vec<Obstacle>) -> GameState {
        let mut state = GameState::new(Rules::default(), AudioTuning::default());
        state.begin_run(0);
        state.obstacles = obstacles;
        state
    }

    fn obstacle(id: u32, kind: ObstacleKind, lane: Lane, distance: i32) -> Obstacle {
        Obstacle {
            id,
            kind,
            lane,
            distance,
            coin_amount: if kind == ObstacleKind::Coin { 10 } else { 0 },
            cue: Some(CueId(id)),
        }
    }

    #[test]
    fn test_distance_drops_by_one() {
        let mut state = state_with(vec![
            obstacle(1, ObstacleKind::Cane, Lane::LEFT, 100),
            obstacle(2, ObstacleKind::Coin, Lane::RIGHT, 40),
        ]);
        let mut events = Vec::new();
        for _ in 0..10 {
            advance_obstacles(&mut state, &mut events);
        }
        assert_eq!(state.obstacles[0].distance, 90);
        assert_eq!(state.obstacles[1].distance, 30);
        let moves = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CueMoved { .. }))
            .count();
        assert_eq!(moves, 20);
    }

    #[test]
    fn test_avoidance_scores() {
        let mut state = state_with(vec![
            obstacle(1, ObstacleKind::Cane, Lane::LEFT, -5),
            obstacle(2, ObstacleKind::Skateboard, Lane::RIGHT, -5),
            obstacle(3, ObstacleKind::Coin, Lane::RIGHT, -5),
            obstacle(4, ObstacleKind::Cane, Lane::RIGHT, -4),
        ]);
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);

        assert_eq!(state.score, 4);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 4);
        assert_eq!(state.obstacles[0].distance, -5);

        let stopped: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CueStopped { cue } => Some(cue.0),
                _ => None,
            })
            .collect();
        assert_eq!(stopped, vec![1, 2, 3]);
        assert!(events.contains(&GameEvent::Avoided {
            kind: ObstacleKind::Coin,
            points: 0,
            score: 4
        }));
    }

    #[test]
    fn test_coin_removed_without_grace() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Coin, Lane::LEFT, -5)]);
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_coin_grace_holds_dodged_coin() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Coin, Lane::LEFT, -5)]);
        state.rules.coin_grace = true;
        let mut events = Vec::new();

        advance_obstacles(&mut state, &mut events);
        assert_eq!(state.obstacles[0].distance, GRACE_RESET);

        // Keeps hovering while the player stays out of its lane
        for _ in 0..10 {
            advance_obstacles(&mut state, &mut events);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].distance >= -5);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_coin_grace_releases_when_player_joins_lane() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Coin, Lane::LEFT, -5)]);
        state.rules.coin_grace = true;
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert_eq!(state.obstacles[0].distance, -4);

        state.player_lane = Lane::LEFT;
        advance_obstacles(&mut state, &mut events);
        advance_obstacles(&mut state, &mut events);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_coin_grace_cue_follows_held_distance() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Coin, Lane::RIGHT, -5)]);
        state.rules.coin_grace = true;
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);

        assert_eq!(state.obstacles[0].distance, GRACE_RESET);
        let expected = cue_params(Lane::RIGHT, GRACE_RESET, state.player_lane, &state.audio);
        assert_eq!(
            events,
            vec![GameEvent::CueMoved {
                cue: CueId(1),
                params: expected
            }]
        );
        assert!((expected.volume - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_coin_grace_ignores_hazards() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Cane, Lane::LEFT, -5)]);
        state.rules.coin_grace = true;
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_avoidance_triggers_level_up() {
        let mut state = state_with(vec![obstacle(1, ObstacleKind::Skateboard, Lane::LEFT, -5)]);
        state.score = 58;
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert_eq!(state.score, 61);
        assert_eq!(state.level, 2);
        assert!(events.iter().any(|e| matches!(e, GameEvent::LevelUp { level: 2, .. })));
    }
}
