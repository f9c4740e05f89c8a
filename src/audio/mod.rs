//! Audio cue model
//!
//! The simulation never names sound files. It talks in cues: a closed set of
//! [`CueKind`]s, each instance identified by a [`CueId`] and positioned with
//! [`CueParams`]. Whatever plays the sound implements [`CueSink`].
//!
//! Looping cues (obstacles) are started, updated every tick and stopped when
//! the obstacle leaves the store. One-shot cues are started with a fresh id
//! and left to finish on their own.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// Identifies one cue instance for the lifetime of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CueId(pub u32);

impl std::fmt::Display for CueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cue#{}", self.0)
    }
}

/// Every sound the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    /// Cane tapping on concrete, loops while the cane approaches
    CaneApproach,
    /// Skateboard wheels, loops while the skateboard approaches
    SkateboardApproach,
    /// Jingling coin, loops while the coin approaches
    CoinLoop,
    /// Coin picked up
    CoinPickup,
    /// Player ran into a cane
    CaneHit,
    /// Player ran into a skateboard
    SkateboardHit,
    /// Level increased
    LevelUp,
    /// One of the walking samples, `step` in 0..3
    Footstep { step: u8 },
    /// Player stepped one lane left
    TurnLeft,
    /// Player stepped one lane right
    TurnRight,
    /// Player jumped
    Jump,
}

impl CueKind {
    /// Looping cue that follows an obstacle down the sidewalk
    pub fn approach(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Cane => CueKind::CaneApproach,
            ObstacleKind::Skateboard => CueKind::SkateboardApproach,
            ObstacleKind::Coin => CueKind::CoinLoop,
        }
    }

    /// Whether the cue keeps playing until explicitly stopped
    pub fn is_looping(&self) -> bool {
        matches!(
            self,
            CueKind::CaneApproach | CueKind::SkateboardApproach | CueKind::CoinLoop
        )
    }
}

/// Stereo position and loudness of a cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueParams {
    /// -1.0 (hard left) to 1.0 (hard right)
    pub pan: f32,
    /// 0.0 (silent) to 1.0 (full)
    pub volume: f32,
}

impl CueParams {
    /// Centered at full volume (footsteps, pickups, hits)
    pub const CENTER: CueParams = CueParams { pan: 0.0, volume: 1.0 };

    pub fn new(pan: f32, volume: f32) -> Self {
        Self { pan, volume }
    }
}

/// Capability interface for whatever actually plays sound.
///
/// Implementations must tolerate ids they do not know (a stop for a cue that
/// failed to start, an update after the engine dropped it): the core keeps
/// going whether or not audio is present.
pub trait CueSink {
    /// Begin playing a cue
    fn start(&mut self, id: CueId, kind: CueKind, params: CueParams);
    /// Move or re-level a playing cue
    fn update(&mut self, id: CueId, params: CueParams);
    /// Stop a cue
    fn stop(&mut self, id: CueId);
    /// Overall output gain (master x sfx volume, 0 when muted)
    fn set_output_volume(&mut self, _volume: f32) {}
}

/// Sink for when no audio engine is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CueSink for NullSink {
    fn start(&mut self, _id: CueId, _kind: CueKind, _params: CueParams) {}
    fn update(&mut self, _id: CueId, _params: CueParams) {}
    fn stop(&mut self, _id: CueId) {}
}

/// Sink that writes every cue command to the log (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl CueSink for LogSink {
    fn start(&mut self, id: CueId, kind: CueKind, params: CueParams) {
        log::debug!(
            "{} start {:?} pan={:.2} vol={:.3}",
            id,
            kind,
            params.pan,
            params.volume
        );
    }

    fn update(&mut self, id: CueId, params: CueParams) {
        log::trace!("{} pan={:.2} vol={:.3}", id, params.pan, params.volume);
    }

    fn stop(&mut self, id: CueId) {
        log::debug!("{} stop", id);
    }
}

/// A cue command as seen by a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueCommand {
    Start(CueId, CueKind, CueParams),
    Update(CueId, CueParams),
    Stop(CueId),
}

/// Sink that keeps every command, for tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub commands: Vec<CueCommand>,
    /// Last output gain pushed by the controller
    pub output_volume: Option<f32>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cues started with the given kind
    pub fn started(&self, kind: CueKind) -> Vec<CueId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                CueCommand::Start(id, k, _) if *k == kind => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Most recent parameters pushed for a cue (start or update)
    pub fn last_params(&self, id: CueId) -> Option<CueParams> {
        self.commands.iter().rev().find_map(|c| match c {
            CueCommand::Start(cid, _, p) | CueCommand::Update(cid, p) if *cid == id => Some(*p),
            _ => None,
        })
    }

    /// Whether a stop was issued for the cue
    pub fn was_stopped(&self, id: CueId) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, CueCommand::Stop(cid) if *cid == id))
    }

    /// Looping cues started and not yet stopped
    pub fn active_loops(&self) -> Vec<CueId> {
        let mut active = Vec::new();
        for c in &self.commands {
            match c {
                CueCommand::Start(id, kind, _) if kind.is_looping() => active.push(*id),
                CueCommand::Stop(id) => active.retain(|a| a != id),
                _ => {}
            }
        }
        active
    }
}

impl CueSink for RecordingSink {
    fn start(&mut self, id: CueId, kind: CueKind, params: CueParams) {
        self.commands.push(CueCommand::Start(id, kind, params));
    }

    fn update(&mut self, id: CueId, params: CueParams) {
        self.commands.push(CueCommand::Update(id, params));
    }

    fn stop(&mut self, id: CueId) {
        self.commands.push(CueCommand::Stop(id));
    }

    fn set_output_volume(&mut self, volume: f32) {
        self.output_volume = Some(volume);
    }
}
