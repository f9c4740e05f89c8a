//! Sidewalk Runner entry point
//!
//! In the browser this wires the game to the DOM, the keyboard and Web
//! Audio. Natively it plays a headless run and prints the result as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use sidewalk_runner::audio::web::WebAudioSink;
    use sidewalk_runner::platform::{PerformanceClock, from_key};
    use sidewalk_runner::sim::{GamePhase, HitCause, SeededRandom};
    use sidewalk_runner::{Game, GameListener, Settings};

    /// How often the host pumps the game timers (ms)
    const PUMP_INTERVAL_MS: i32 = 10;

    /// Writes status text and announcements into the page
    struct DomListener;

    impl DomListener {
        fn set_text(id: &str, text: &str) {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
            {
                el.set_text_content(Some(text));
            }
        }

        fn set_class(id: &str, class: &str) {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
            {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    impl GameListener for DomListener {
        fn on_status(&mut self, text: &str) {
            Self::set_text("status", text);
        }

        fn on_announce(&mut self, text: &str) {
            // #announcer is an aria-live="assertive" region
            Self::set_text("announcer", "");
            Self::set_text("announcer", text);
        }

        fn on_game_over(&mut self, final_score: u64, cause: HitCause) {
            log::info!("Game over ({}): {}", cause, final_score);
        }

        fn on_restart_available(&mut self) {
            Self::set_class("start-btn", "");
        }
    }

    type WebGame = Game<WebAudioSink, DomListener>;

    fn new_game() -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Game::new(
            settings,
            Box::new(PerformanceClock),
            Box::new(SeededRandom::new(seed)),
            WebAudioSink::new(),
            DomListener,
        )
    }

    /// Flip mute, persist it, and hand the new settings to the game
    fn toggle_mute(game: &mut WebGame) {
        let mut settings = game.settings().clone();
        settings.muted = !settings.muted;
        settings.save();
        let text = if settings.muted { "Sound muted" } else { "Sound on" };
        game.set_settings(settings);
        DomListener::set_text("announcer", text);
    }

    fn start(game: &mut WebGame) {
        // Audio may only start from a user gesture
        game.sink().resume();
        if game.start() {
            DomListener::set_class("start-btn", "hidden");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Sidewalk Runner starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let game = Rc::new(RefCell::new(new_game()));

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "m" || key == "M" {
                    toggle_mute(&mut g);
                    return;
                }
                if g.phase() != GamePhase::Running {
                    if key == "Enter" {
                        start(&mut g);
                    }
                    return;
                }
                if let Some(input) = from_key(&key) {
                    event.prevent_default();
                    g.handle_input(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start(&mut game.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Timer pump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().pump();
            });
            let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                PUMP_INTERVAL_MS,
            );
            closure.forget();
        }

        log::info!("Sidewalk Runner ready - press Enter or the start button");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use sidewalk_runner::audio::LogSink;
    use sidewalk_runner::game::LogListener;
    use sidewalk_runner::platform::ManualClock;
    use sidewalk_runner::sim::{GamePhase, SeededRandom, choose_input};
    use sidewalk_runner::{Game, GameOverReport, Preset, Settings, SettingsError};

    #[derive(Parser)]
    #[command(name = "sidewalk-runner")]
    #[command(about = "Play a headless Sidewalk Runner run and print the final report")]
    pub struct Args {
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON settings file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Preset to apply on top of the settings (standard, relaxed)
        #[arg(long)]
        preset: Option<String>,
        /// Stop after this many ticks even if still alive
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,
        /// Stand still instead of dodging
        #[arg(long)]
        no_autopilot: bool,
    }

    #[derive(Serialize)]
    struct RunSummary {
        seed: u64,
        preset: &'static str,
        #[serde(flatten)]
        report: GameOverReport,
    }

    fn load_settings(args: &Args) -> Result<Settings, SettingsError> {
        let mut settings = match &args.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some(name) = &args.preset {
            let preset = Preset::from_str(name).ok_or_else(|| SettingsError::Invalid {
                field: "preset",
                reason: format!("unknown preset '{}'", name),
            })?;
            settings.apply_preset(preset);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn run(args: &Args) -> Result<String, SettingsError> {
        let settings = load_settings(args)?;
        let seed = args.seed.unwrap_or_else(rand::random::<u64>);
        let preset = settings.preset.as_str();
        log::info!("Headless run with seed {} ({} preset)", seed, preset);

        let clock = ManualClock::new(0);
        let mut game = Game::new(
            settings,
            Box::new(clock.clone()),
            Box::new(SeededRandom::new(seed)),
            LogSink,
            LogListener,
        );
        game.start();

        let mut last_input_tick = None;
        while game.phase() == GamePhase::Running && game.state().ticks < args.max_ticks {
            let ticks = game.state().ticks;
            if !args.no_autopilot && last_input_tick != Some(ticks) {
                if let Some(input) = choose_input(game.state()) {
                    game.handle_input(input);
                    last_input_tick = Some(ticks);
                }
            }
            let Some(due) = game.next_due() else { break };
            clock.set(due);
            game.pump();
        }

        let report = game.last_report().unwrap_or_else(|| game.report(None));
        let summary = RunSummary {
            seed,
            preset,
            report,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();

    let args = headless::Args::parse();
    match headless::run(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
