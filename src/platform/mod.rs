//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`Clock`)
//! - Timers (`Scheduler`)
//! - Input events (key names to `InputEvent`)

pub mod input;
pub mod scheduler;
pub mod time;

pub use input::from_key;
pub use scheduler::{Scheduler, TimerHandle};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
#[cfg(target_arch = "wasm32")]
pub use time::PerformanceClock;
pub use time::{Clock, ManualClock};
