//! Tick-driven snake game core: grid simulation, collision and growth state
//! machine, and the sprite model the renderer consumes.
//!
//! Nothing in this crate touches a window or an event loop. A frontend drives
//! [`game::Session`] with its own [`game::Scheduler`] and [`game::Renderer`].

pub mod entity;
pub mod food;
pub mod game;
pub mod snake;
pub mod sprite;
