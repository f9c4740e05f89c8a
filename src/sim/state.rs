//! Game state and core simulation types
//!
//! Everything a run needs lives here; the controller recreates it each run.

use serde::{Deserialize, Serialize};

use crate::audio::{CueId, CueParams};
use crate::consts::*;
use crate::settings::{AudioTuning, Rules};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a run to start
    Idle,
    /// Active gameplay
    Running,
    /// Player was hit; waiting for the restart delay
    Ended,
}

/// One of the three lanes (0 = left, 1 = middle, 2 = right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const MIDDLE: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);
    pub const ALL: [Lane; LANE_COUNT as usize] = [Lane::LEFT, Lane::MIDDLE, Lane::RIGHT];

    /// Lane by index, None if out of range
    pub fn new(index: u8) -> Option<Self> {
        (index < LANE_COUNT).then_some(Lane(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Signed lane offset of `self` relative to `other`
    pub fn offset_from(self, other: Lane) -> i32 {
        self.0 as i32 - other.0 as i32
    }

    /// Lane to the left, None at the edge
    pub fn left(self) -> Option<Lane> {
        self.0.checked_sub(1).map(Lane)
    }

    /// Lane to the right, None at the edge
    pub fn right(self) -> Option<Lane> {
        Lane::new(self.0 + 1)
    }
}

impl Default for Lane {
    fn default() -> Self {
        Lane(START_LANE)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cane,
    Skateboard,
    Coin,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Cane => "cane",
            ObstacleKind::Skateboard => "skateboard",
            ObstacleKind::Coin => "coin",
        }
    }

    /// Points for letting it pass; coins only score when collected
    pub fn avoid_points(&self) -> u64 {
        match self {
            ObstacleKind::Cane => 1,
            ObstacleKind::Skateboard => 3,
            ObstacleKind::Coin => 0,
        }
    }

    /// What ends the run if the player runs into it
    pub fn hit_cause(&self) -> Option<HitCause> {
        match self {
            ObstacleKind::Cane => Some(HitCause::Cane),
            ObstacleKind::Skateboard => Some(HitCause::Skateboard),
            ObstacleKind::Coin => None,
        }
    }
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitCause {
    Cane,
    Skateboard,
}

impl HitCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitCause::Cane => "cane",
            HitCause::Skateboard => "skateboard",
        }
    }
}

impl std::fmt::Display for HitCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An obstacle approaching on one lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: Lane,
    /// Ticks until level with the player; negative once passed
    pub distance: i32,
    /// Coin value (0 for canes and skateboards)
    pub coin_amount: u32,
    /// Looping cue following this obstacle, if audible
    pub cue: Option<CueId>,
}

/// Something the simulation wants the outside world to know about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Obstacle entered the store; `cue` is set if it should start a loop
    Spawned {
        id: u32,
        kind: ObstacleKind,
        lane: Lane,
        cue: Option<(CueId, CueParams)>,
    },
    /// An obstacle cue moved or changed loudness
    CueMoved { cue: CueId, params: CueParams },
    /// An obstacle cue must stop
    CueStopped { cue: CueId },
    /// A cane or skateboard passed the player (coins report 0 points)
    Avoided {
        kind: ObstacleKind,
        points: u64,
        score: u64,
    },
    /// Coin picked up
    CoinCollected { amount: u32, score: u64 },
    /// Level increased
    LevelUp { level: u32, speed: f32 },
    /// Player was hit; the run is over
    Hit { cause: HitCause, score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player_lane: Lane,
    /// Score (never decreases during a run)
    pub score: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Speed multiplier, starting at 1.0
    pub speed: f32,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Clock time of the last spawn (ms)
    pub last_spawn_ms: u64,
    /// Simulation ticks processed this run
    pub ticks: u64,
    /// Next footstep sample to play
    pub footstep_index: u8,
    pub rules: Rules,
    pub audio: AudioTuning,
    /// Next entity/cue ID (kept across runs so cue ids never repeat)
    next_id: u32,
}

impl GameState {
    /// Create an idle state
    pub fn new(rules: Rules, audio: AudioTuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            player_lane: Lane::default(),
            score: 0,
            level: 1,
            speed: 1.0,
            obstacles: Vec::new(),
            last_spawn_ms: 0,
            ticks: 0,
            footstep_index: 0,
            rules,
            audio,
            next_id: 1,
        }
    }

    /// Reset everything but the rules and id allocator, and start running
    pub fn begin_run(&mut self, now_ms: u64) {
        let next_id = self.next_id;
        *self = Self {
            phase: GamePhase::Running,
            last_spawn_ms: now_ms,
            next_id,
            ..Self::new(self.rules, self.audio)
        };
    }

    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity/cue ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Tick period at the current speed (ms)
    pub fn tick_interval_ms(&self) -> u64 {
        scaled_interval(self.rules.base_tick_ms, self.speed)
    }

    /// Footstep period at the current speed (ms)
    pub fn footstep_interval_ms(&self) -> u64 {
        scaled_interval(self.rules.footstep_period_ms, self.speed)
    }

    pub fn obstacle(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Stop every obstacle cue (obstacles stay in the store, silent)
    pub fn silence_obstacles(&mut self, events: &mut Vec<GameEvent>) {
        for obstacle in &mut self.obstacles {
            if let Some(cue) = obstacle.cue.take() {
                events.push(GameEvent::CueStopped { cue });
            }
        }
    }

    /// Remove the obstacle at `index`, stopping its cue first
    pub(crate) fn remove_obstacle(&mut self, index: usize, events: &mut Vec<GameEvent>) -> Obstacle {
        let obstacle = self.obstacles.remove(index);
        if let Some(cue) = obstacle.cue {
            events.push(GameEvent::CueStopped { cue });
        }
        obstacle
    }
}

/// `base / speed`, rounded, never below 1 ms
fn scaled_interval(base_ms: u64, speed: f32) -> u64 {
    ((base_ms as f64 / speed.max(f32::EPSILON) as f64).round() as u64).max(1)
}
