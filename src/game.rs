//! Game controller
//!
//! Owns one run: the simulation state, the timers that drive it, and the
//! two outward surfaces (a [`CueSink`] for sound, a [`GameListener`] for
//! text). Nothing here is global, so any number of games can run side by
//! side.
//!
//! The host calls [`Game::pump`] whenever it gets control (an interval
//! timer in the browser, a loop in the headless runner) and forwards key
//! presses to [`Game::handle_input`].

use serde::Serialize;

use crate::audio::{CueId, CueKind, CueParams, CueSink};
use crate::consts::*;
use crate::platform::{Clock, Scheduler, TimerHandle};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, HitCause, InputEvent, ObstacleKind, RandomSource,
    apply_input, tick,
};

/// Text and lifecycle notifications for the UI / screen reader
pub trait GameListener {
    /// Status line update
    fn on_status(&mut self, _text: &str) {}
    /// Assertive screen reader announcement
    fn on_announce(&mut self, _text: &str) {}
    /// The run ended
    fn on_game_over(&mut self, _final_score: u64, _cause: HitCause) {}
    /// The restart delay elapsed; `start` will begin a new run
    fn on_restart_available(&mut self) {}
}

/// Listener that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl GameListener for NullListener {}

/// Listener that sends text to the log (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl GameListener for LogListener {
    fn on_status(&mut self, text: &str) {
        log::info!("{}", text);
    }

    fn on_announce(&mut self, text: &str) {
        log::debug!("Announce: {}", text);
    }
}

/// Summary of a finished (or abandoned) run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameOverReport {
    pub score: u64,
    pub level: u32,
    /// None if the run was stopped without a hit
    pub cause: Option<HitCause>,
    pub ticks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Tick,
    Footstep,
    RestartReady,
}

/// One game instance
pub struct Game<S: CueSink, L: GameListener> {
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    settings: Settings,
    state: GameState,
    scheduler: Scheduler<Task>,
    tick_timer: Option<TimerHandle>,
    footstep_timer: Option<TimerHandle>,
    restart_timer: Option<TimerHandle>,
    sink: S,
    listener: L,
    last_report: Option<GameOverReport>,
}

impl<S: CueSink, L: GameListener> Game<S, L> {
    pub fn new(
        settings: Settings,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
        mut sink: S,
        listener: L,
    ) -> Self {
        sink.set_output_volume(settings.effective_volume());
        Self {
            clock,
            rng,
            state: GameState::new(settings.rules, settings.audio),
            settings,
            scheduler: Scheduler::new(),
            tick_timer: None,
            footstep_timer: None,
            restart_timer: None,
            sink,
            listener,
            last_report: None,
        }
    }

    /// Begin a new run. Returns false (and does nothing) while a run is
    /// already active.
    pub fn start(&mut self) -> bool {
        if self.state.running() {
            log::warn!("start() ignored: a run is already active");
            return false;
        }
        if let Some(handle) = self.restart_timer.take() {
            self.scheduler.cancel(handle);
        }

        let now = self.clock.now_ms();
        self.state.rules = self.settings.rules;
        self.state.audio = self.settings.audio;
        self.state.begin_run(now);
        self.last_report = None;

        self.tick_timer = Some(self.scheduler.schedule(now, Task::Tick));
        self.footstep_timer = Some(self.scheduler.schedule(now, Task::Footstep));

        log::info!("Run started at {} ms ({} preset)", now, self.settings.preset.as_str());
        self.listener
            .on_status("Game started! Use arrow keys to play. Score: 0, Level: 1");
        true
    }

    /// Apply a player input. Returns true if it did anything.
    pub fn handle_input(&mut self, input: InputEvent) -> bool {
        let mut events = Vec::new();
        let Some(cue) = apply_input(&mut self.state, input, &mut events) else {
            log::trace!("Input {:?} ignored", input);
            return false;
        };
        let now = self.clock.now_ms();
        self.dispatch(events, now);
        self.play_one_shot(cue);
        true
    }

    /// Fire every timer due by now, at most `MAX_TIMERS_PER_PUMP` of them.
    /// Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while fired < MAX_TIMERS_PER_PUMP {
            let Some((handle, task)) = self.scheduler.pop_due(now) else {
                break;
            };
            fired += 1;
            self.fire(task, handle.due_ms());
        }
        if fired == MAX_TIMERS_PER_PUMP {
            log::debug!("Pump limit reached at {} ms", now);
        }
        fired
    }

    /// End the active run as if the player had just been hit by `cause`.
    ///
    /// Goes through the same game-over path as a real collision (status,
    /// announcement, `on_game_over`, restart timer). Returns false when no
    /// run is active.
    pub fn end(&mut self, cause: HitCause) -> bool {
        if !self.state.running() {
            log::warn!("end() ignored: no active run");
            return false;
        }
        self.state.phase = GamePhase::Ended;
        let mut events = Vec::new();
        self.state.silence_obstacles(&mut events);
        let now = self.clock.now_ms();
        self.dispatch(events, now);
        self.finish_run(cause, now);
        true
    }

    fn fire(&mut self, task: Task, due_ms: u64) {
        match task {
            Task::Tick => {
                self.tick_timer = None;
                if !self.state.running() {
                    return;
                }
                let mut events = Vec::new();
                tick(&mut self.state, due_ms, self.rng.as_mut(), &mut events);
                self.dispatch(events, due_ms);
                if self.state.running() {
                    let next = due_ms + self.state.tick_interval_ms();
                    self.tick_timer = Some(self.scheduler.schedule(next, Task::Tick));
                }
            }
            Task::Footstep => {
                self.footstep_timer = None;
                if !self.state.running() {
                    return;
                }
                let step = self.state.footstep_index;
                self.state.footstep_index = (step + 1) % FOOTSTEP_VARIANTS;
                self.play_one_shot(CueKind::Footstep { step });
                let next = due_ms + self.state.footstep_interval_ms();
                self.footstep_timer = Some(self.scheduler.schedule(next, Task::Footstep));
            }
            Task::RestartReady => {
                self.restart_timer = None;
                if self.state.phase == GamePhase::Ended {
                    self.state.phase = GamePhase::Idle;
                    log::debug!("Restart available");
                    self.listener.on_restart_available();
                }
            }
        }
    }

    /// Forward simulation events to the sink and listener
    fn dispatch(&mut self, events: Vec<GameEvent>, now_ms: u64) {
        let mut ended = None;
        for event in events {
            match event {
                GameEvent::Spawned {
                    kind,
                    cue: Some((id, params)),
                    ..
                } => self.sink.start(id, CueKind::approach(kind), params),
                GameEvent::Spawned { cue: None, .. } => {}
                GameEvent::CueMoved { cue, params } => self.sink.update(cue, params),
                GameEvent::CueStopped { cue } => self.sink.stop(cue),
                GameEvent::Avoided {
                    kind,
                    points,
                    score,
                } => {
                    if kind != ObstacleKind::Coin {
                        let unit = if points == 1 { "point" } else { "points" };
                        self.status(&format!(
                            "Avoided {}! +{} {}. Score: {}",
                            kind.as_str(),
                            points,
                            unit,
                            score
                        ));
                    }
                }
                GameEvent::CoinCollected { amount, score } => {
                    self.play_one_shot(CueKind::CoinPickup);
                    self.status(&format!("Collected {} coins! Score: {}", amount, score));
                }
                GameEvent::LevelUp { level, .. } => {
                    self.play_one_shot(CueKind::LevelUp);
                    self.announce("Level up!");
                    self.status(&format!("Level up! Now level {}. Speed increased!", level));
                }
                GameEvent::Hit { cause, .. } => {
                    self.play_one_shot(match cause {
                        HitCause::Cane => CueKind::CaneHit,
                        HitCause::Skateboard => CueKind::SkateboardHit,
                    });
                    ended = Some(cause);
                }
            }
        }
        if let Some(cause) = ended {
            self.finish_run(cause, now_ms);
        }
    }

    /// Run is already `Ended` and silent; stop the clocks and report
    fn finish_run(&mut self, cause: HitCause, now_ms: u64) {
        for handle in [self.tick_timer.take(), self.footstep_timer.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }

        let report = self.report(Some(cause));
        log::info!(
            "Run over: hit by a {} with score {} at level {} after {} ticks",
            cause,
            report.score,
            report.level,
            report.ticks
        );
        let message = format!(
            "Game Over! You were hit by a {}. Final Score: {}",
            cause, report.score
        );
        self.status(&message);
        self.announce(&message);
        self.last_report = Some(report);
        self.listener.on_game_over(report.score, cause);

        let due = now_ms + self.state.rules.restart_delay_ms;
        self.restart_timer = Some(self.scheduler.schedule(due, Task::RestartReady));
    }

    fn play_one_shot(&mut self, kind: CueKind) {
        let id = CueId(self.state.next_entity_id());
        self.sink.start(id, kind, CueParams::CENTER);
    }

    fn status(&mut self, text: &str) {
        self.listener.on_status(text);
    }

    fn announce(&mut self, text: &str) {
        if self.settings.announce {
            self.listener.on_announce(text);
        }
    }

    /// Snapshot of the current run
    pub fn report(&self, cause: Option<HitCause>) -> GameOverReport {
        GameOverReport {
            score: self.state.score,
            level: self.state.level,
            cause,
            ticks: self.state.ticks,
        }
    }

    /// Report of the last finished run, cleared when a new run starts
    pub fn last_report(&self) -> Option<GameOverReport> {
        self.last_report
    }

    /// When the next timer is due, if any
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings. Output volume applies at once; rules and tuning
    /// from the next run.
    pub fn set_settings(&mut self, settings: Settings) {
        self.sink.set_output_volume(settings.effective_volume());
        self.settings = settings;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::platform::ManualClock;
    use crate::settings::Preset;
    use crate::sim::{Lane, ScriptedRandom, SeededRandom};

    #[derive(Debug, Default)]
    struct Recorder {
        statuses: Vec<String>,
        announcements: Vec<String>,
        game_overs: Vec<(u64, HitCause)>,
        restarts: u32,
    }

    impl GameListener for Recorder {
        fn on_status(&mut self, text: &str) {
            self.statuses.push(text.to_string());
        }

        fn on_announce(&mut self, text: &str) {
            self.announcements.push(text.to_string());
        }

        fn on_game_over(&mut self, final_score: u64, cause: HitCause) {
            self.game_overs.push((final_score, cause));
        }

        fn on_restart_available(&mut self) {
            self.restarts += 1;
        }
    }

    type TestGame = Game<RecordingSink, Recorder>;

    fn game_with(settings: Settings, rng: impl RandomSource + 'static) -> (TestGame, ManualClock) {
        let clock = ManualClock::new(0);
        let game = Game::new(
            settings,
            Box::new(clock.clone()),
            Box::new(rng),
            RecordingSink::new(),
            Recorder::default(),
        );
        (game, clock)
    }

    fn scripted(rng: ScriptedRandom) -> (TestGame, ManualClock) {
        game_with(Settings::default(), rng)
    }

    /// Move time forward in small steps, pumping as a host would
    fn advance(game: &mut TestGame, clock: &ManualClock, ms: u64) {
        for _ in 0..ms / 10 {
            clock.advance(10);
            game.pump();
        }
    }

    fn distance_of(game: &TestGame, id: CueId) -> Option<i32> {
        game.state().obstacle(id.0).map(|o| o.distance)
    }

    /// Pump until the obstacle behind `id` sits at `distance`
    fn advance_until(game: &mut TestGame, clock: &ManualClock, id: CueId, distance: i32) {
        let mut guard = 0;
        while distance_of(game, id) != Some(distance) {
            advance(game, clock, 10);
            guard += 1;
            assert!(guard < 20_000, "obstacle never reached {distance}");
        }
    }

    fn footsteps(game: &TestGame) -> usize {
        game.sink()
            .commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    crate::audio::CueCommand::Start(_, CueKind::Footstep { .. }, _)
                )
            })
            .count()
    }

    /// Spawn a 500-coin in the right lane and step into it at `distance`
    fn step_into_coin_at(distance: i32) -> TestGame {
        let (mut game, clock) =
            scripted(ScriptedRandom::new().spawn(ObstacleKind::Coin, Lane::RIGHT, 500));
        game.start();
        advance(&mut game, &clock, 2_100);
        let coin = game.sink().started(CueKind::CoinLoop)[0];
        advance_until(&mut game, &clock, coin, distance);
        assert!(game.handle_input(InputEvent::Right));
        advance(&mut game, &clock, 300);
        game
    }

    #[test]
    fn test_start_announces_and_schedules() {
        let (mut game, _clock) = scripted(ScriptedRandom::new());
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.start());
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(
            game.listener().statuses,
            vec!["Game started! Use arrow keys to play. Score: 0, Level: 1"]
        );

        // First tick and first footstep are due immediately
        assert_eq!(game.next_due(), Some(0));
        assert_eq!(game.pump(), 2);
        assert_eq!(game.state().ticks, 1);
        assert_eq!(game.sink().started(CueKind::Footstep { step: 0 }).len(), 1);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let (mut game, clock) = scripted(ScriptedRandom::new());
        assert!(game.start());
        advance(&mut game, &clock, 500);
        let ticks = game.state().ticks;
        assert!(!game.start());
        assert_eq!(game.state().ticks, ticks);
        assert_eq!(game.listener().statuses.len(), 1);
    }

    #[test]
    fn test_footsteps_cycle() {
        let (mut game, clock) = scripted(ScriptedRandom::new());
        game.start();
        game.pump();
        advance(&mut game, &clock, 1_200);

        let steps: Vec<u8> = game
            .sink()
            .commands
            .iter()
            .filter_map(|c| match c {
                crate::audio::CueCommand::Start(_, CueKind::Footstep { step }, _) => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_input_ignored_when_idle() {
        let (mut game, _clock) = scripted(ScriptedRandom::new());
        assert!(!game.handle_input(InputEvent::Left));
        assert!(!game.handle_input(InputEvent::Jump));
        assert!(game.sink().commands.is_empty());
    }

    #[test]
    fn test_lane_change_repans_without_tick() {
        let (mut game, clock) = scripted(ScriptedRandom::new().spawn(ObstacleKind::Cane, Lane::LEFT, 0));
        game.start();
        game.pump();
        advance(&mut game, &clock, 2_100);

        let cane = game.sink().started(CueKind::CaneApproach);
        assert_eq!(cane.len(), 1);
        let cane = cane[0];
        let params = game.sink().last_params(cane).expect("cane cue");
        assert!((params.pan + 0.7).abs() < 1e-6);

        let ticks = game.state().ticks;
        assert!(game.handle_input(InputEvent::Left));
        assert_eq!(game.state().ticks, ticks);
        assert_eq!(game.state().player_lane, Lane::LEFT);
        assert_eq!(game.sink().last_params(cane).map(|p| p.pan), Some(0.0));
        assert_eq!(game.sink().started(CueKind::TurnLeft).len(), 1);

        // Already at the edge: nothing happens, no cue
        assert!(!game.handle_input(InputEvent::Left));
        assert_eq!(game.sink().started(CueKind::TurnLeft).len(), 1);
    }

    #[test]
    fn test_coin_pickup_scores_and_levels() {
        let (mut game, clock) = scripted(ScriptedRandom::new().spawn(ObstacleKind::Coin, Lane::RIGHT, 500));
        game.start();
        game.pump();
        advance(&mut game, &clock, 2_100);
        let coin = game.sink().started(CueKind::CoinLoop)[0];

        let mut guard = 0;
        while distance_of(&game, coin) != Some(1) {
            advance(&mut game, &clock, 10);
            guard += 1;
            assert!(guard < 20_000, "coin never arrived");
        }
        assert!(game.handle_input(InputEvent::Right));
        advance(&mut game, &clock, 100);

        assert_eq!(game.state().score, 500);
        assert_eq!(distance_of(&game, coin), None);
        assert!(game.sink().was_stopped(coin));
        assert_eq!(game.sink().started(CueKind::CoinPickup).len(), 1);
        assert_eq!(game.sink().started(CueKind::LevelUp).len(), 1);
        assert_eq!(game.state().level, 9);

        let statuses = &game.listener().statuses;
        assert!(statuses.contains(&"Collected 500 coins! Score: 500".to_string()));
        assert!(statuses.contains(&"Level up! Now level 9. Speed increased!".to_string()));
        assert_eq!(game.listener().announcements, vec!["Level up!"]);
    }

    #[test]
    fn test_coin_collected_when_stepping_in_level_with_it() {
        let game = step_into_coin_at(0);
        assert_eq!(game.state().score, 500);
        assert_eq!(game.sink().started(CueKind::CoinPickup).len(), 1);
    }

    #[test]
    fn test_coin_missed_when_stepping_in_after_it_passed() {
        // Collision runs on the next tick, by which time the coin is at -2
        let game = step_into_coin_at(-1);
        assert_eq!(game.state().score, 0);
        assert!(game.sink().started(CueKind::CoinPickup).is_empty());
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_avoided_cane_status() {
        let (mut game, clock) = scripted(ScriptedRandom::new().spawn(ObstacleKind::Cane, Lane::LEFT, 0));
        game.start();
        game.pump();
        advance(&mut game, &clock, 13_000);

        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state().score, 1);
        assert!(
            game.listener()
                .statuses
                .contains(&"Avoided cane! +1 point. Score: 1".to_string())
        );
    }

    #[test]
    fn test_skateboard_hit_ends_run() {
        let (mut game, clock) =
            scripted(ScriptedRandom::new().spawn(ObstacleKind::Skateboard, Lane::MIDDLE, 0));
        game.start();
        game.pump();
        advance(&mut game, &clock, 12_000);

        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.listener().game_overs, vec![(0, HitCause::Skateboard)]);
        let over = "Game Over! You were hit by a skateboard. Final Score: 0".to_string();
        assert_eq!(game.listener().statuses.last(), Some(&over));
        assert_eq!(game.listener().announcements.last(), Some(&over));
        assert_eq!(game.sink().started(CueKind::SkateboardHit).len(), 1);
        assert!(game.sink().active_loops().is_empty());

        let report = game.last_report().expect("report");
        assert_eq!(report.cause, Some(HitCause::Skateboard));
        assert_eq!(report.score, 0);

        // No further ticks or footsteps, only the restart timer remains
        let ticks = game.state().ticks;
        let commands = game.sink().commands.len();
        advance(&mut game, &clock, 1_000);
        assert_eq!(game.state().ticks, ticks);
        assert_eq!(game.sink().commands.len(), commands);
        assert!(!game.handle_input(InputEvent::Left));

        advance(&mut game, &clock, 1_000);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.listener().restarts, 1);

        assert!(game.start());
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().ticks, 0);
        assert!(game.last_report().is_none());
    }

    #[test]
    fn test_sidestep_into_passing_skateboard() {
        let (mut game, clock) =
            scripted(ScriptedRandom::new().spawn(ObstacleKind::Skateboard, Lane::LEFT, 0));
        game.start();
        advance(&mut game, &clock, 2_100);
        let board = game.sink().started(CueKind::SkateboardApproach)[0];
        advance_until(&mut game, &clock, board, -1);
        assert_eq!(game.phase(), GamePhase::Running);

        let ticks = game.state().ticks;
        assert!(game.handle_input(InputEvent::Left));
        advance(&mut game, &clock, 100);

        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.state().ticks, ticks + 1);
        assert_eq!(distance_of(&game, board), Some(-2));
        assert_eq!(
            game.last_report().and_then(|r| r.cause),
            Some(HitCause::Skateboard)
        );

        let ticks = game.state().ticks;
        let steps = footsteps(&game);
        advance(&mut game, &clock, 1_000);
        assert_eq!(game.state().ticks, ticks);
        assert_eq!(footsteps(&game), steps);
    }

    #[test]
    fn test_end_takes_game_over_path() {
        let (mut game, clock) = scripted(ScriptedRandom::new());
        game.start();
        advance(&mut game, &clock, 300);
        assert!(game.end(HitCause::Cane));

        assert_eq!(game.listener().game_overs, vec![(0, HitCause::Cane)]);
        assert_eq!(
            game.listener().statuses.last().map(String::as_str),
            Some("Game Over! You were hit by a cane. Final Score: 0")
        );
        assert_eq!(game.last_report().and_then(|r| r.cause), Some(HitCause::Cane));
        // Only the restart timer is left
        assert_eq!(game.next_due(), Some(2_300));
    }

    #[test]
    fn test_settings_drive_output_volume() {
        let (mut game, _clock) = scripted(ScriptedRandom::new());
        assert_eq!(game.sink().output_volume, Some(0.8));

        let muted = Settings {
            muted: true,
            ..Settings::default()
        };
        game.set_settings(muted);
        assert_eq!(game.sink().output_volume, Some(0.0));
        assert!(game.settings().muted);
    }

    #[test]
    fn test_restart_allowed_before_delay() {
        let (mut game, clock) = scripted(ScriptedRandom::new());
        game.start();
        advance(&mut game, &clock, 300);
        assert!(game.end(HitCause::Cane));
        assert_eq!(game.phase(), GamePhase::Ended);

        // Starting early cancels the pending restart notification
        assert!(game.start());
        advance(&mut game, &clock, 3_000);
        assert_eq!(game.listener().restarts, 0);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_end_requires_running() {
        let (mut game, _clock) = scripted(ScriptedRandom::new());
        assert!(!game.end(HitCause::Cane));
        assert!(game.listener().game_overs.is_empty());
    }

    #[test]
    fn test_announce_can_be_disabled() {
        let settings = Settings {
            announce: false,
            ..Settings::default()
        };
        let (mut game, clock) = game_with(
            settings,
            ScriptedRandom::new().spawn(ObstacleKind::Cane, Lane::MIDDLE, 0),
        );
        game.start();
        advance(&mut game, &clock, 12_000);
        assert_eq!(game.phase(), GamePhase::Ended);
        assert!(game.listener().announcements.is_empty());
        assert!(game.listener().statuses.last().is_some_and(|s| s.starts_with("Game Over!")));
    }

    #[test]
    fn test_pump_is_bounded() {
        let (mut game, clock) = scripted(ScriptedRandom::new());
        game.start();
        clock.advance(60_000);
        assert_eq!(game.pump(), MAX_TIMERS_PER_PUMP);
        // Catch-up continues on the next pump from the scheduled times
        assert!(game.next_due().is_some_and(|due| due < 60_000));
    }

    #[test]
    fn test_relaxed_preset_applies_on_start() {
        let (mut game, clock) = scripted(ScriptedRandom::new().spawn(ObstacleKind::Cane, Lane::RIGHT, 0));
        game.set_settings(Settings::from_preset(Preset::Relaxed));
        game.start();
        game.pump();
        advance(&mut game, &clock, 2_100);
        let cane = game.sink().started(CueKind::CaneApproach)[0];
        assert_eq!(game.sink().last_params(cane).map(|p| p.pan), Some(1.0));
        assert_eq!(game.state().rules.level_threshold, 100);
    }

    #[test]
    fn test_instances_are_independent() {
        let (mut a, clock_a) = game_with(Settings::default(), SeededRandom::new(7));
        let (mut b, clock_b) = game_with(Settings::default(), SeededRandom::new(7));
        a.start();
        b.start();
        advance(&mut a, &clock_a, 5_000);
        assert_eq!(b.state().ticks, 0);

        advance(&mut b, &clock_b, 5_000);
        assert_eq!(a.state().ticks, b.state().ticks);
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.sink().commands, b.sink().commands);

        a.handle_input(InputEvent::Right);
        assert_eq!(b.state().player_lane, Lane::MIDDLE);
    }
}
