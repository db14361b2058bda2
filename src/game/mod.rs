//! Core game module: grid primitives, configuration, the state machine and
//! the session driver.

mod cheat;
mod components;
mod config;
mod constants;
mod events;
mod motion;
mod session;
mod state;

pub use cheat::*;
pub use components::*;
pub use config::*;
pub use constants::*;
pub use events::*;
pub use motion::*;
pub use session::*;
pub use state::*;
