//! Glue between [`GameState`] and whatever owns the clock and the screen.
//!
//! The game never sleeps or spawns timers itself. After every frame it hands
//! the scheduler the interval to wait, and the scheduler calls
//! [`Session::on_tick`] once that interval has elapsed. During `GameOver`
//! nothing is re-armed; a reset re-arms it.

use std::time::Duration;

use tracing::debug;

use super::{Frame, GamePhase, GameState, InputEvent, InputOutcome};

/// Draws frames.
pub trait Renderer {
    fn draw(&mut self, frame: Frame);
}

/// Arranges for [`Session::on_tick`] to be called once `interval` has passed.
pub trait Scheduler {
    fn schedule_next(&mut self, interval: Duration);
}

pub struct Session<R, S> {
    state: GameState,
    renderer: R,
    scheduler: S,
}

impl<R: Renderer, S: Scheduler> Session<R, S> {
    pub fn new(state: GameState, renderer: R, scheduler: S) -> Self {
        Session {
            state,
            renderer,
            scheduler,
        }
    }

    /// Draws the opening frame and arms the first tick.
    pub fn start(&mut self) {
        let frame = self.state.frame();
        self.present(frame);
    }

    pub fn on_tick(&mut self) {
        let frame = self.state.tick();
        self.present(frame);
    }

    pub fn on_input(&mut self, event: InputEvent) -> InputOutcome {
        let outcome = self.state.handle_input(event);
        if outcome == InputOutcome::Restarted {
            self.start();
        }
        outcome
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn present(&mut self, frame: Frame) {
        let running = frame.phase == GamePhase::Running;
        let interval = frame.status.interval;
        self.renderer.draw(frame);
        if running {
            self.scheduler.schedule_next(interval);
        } else {
            debug!("game over, tick not re-armed");
        }
    }
}
