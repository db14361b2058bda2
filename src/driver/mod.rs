//! Driver plugin - owns the game session and fires ticks when the interval
//! the game asked for has elapsed.

use std::time::Duration;

use arcade_snake::game::{Frame, GameState, Renderer, Scheduler, Session};
use bevy::prelude::*;

/// Plugin for the session resource and the tick clock.
pub struct DriverPlugin;

impl Plugin for DriverPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (GameSet::Input, GameSet::Tick, GameSet::Draw, GameSet::Hud).chain(),
        )
        .add_systems(Startup, start_session)
        .add_systems(Update, fire_scheduled_tick.in_set(GameSet::Tick));
    }
}

/// Per-frame ordering: read keys, maybe tick, draw the result, update the HUD.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Tick,
    Draw,
    Hud,
}

/// Holds the latest frame until the rendering plugin picks it up.
#[derive(Default)]
pub struct FrameSink {
    pending: Option<Frame>,
}

impl FrameSink {
    pub fn take(&mut self) -> Option<Frame> {
        self.pending.take()
    }
}

impl Renderer for FrameSink {
    fn draw(&mut self, frame: Frame) {
        self.pending = Some(frame);
    }
}

/// One-shot bevy timer re-armed by the session after every frame.
#[derive(Default)]
pub struct TimerScheduler {
    timer: Option<Timer>,
}

impl TimerScheduler {
    /// Advances the armed timer; `true` once it fires, after which it is
    /// disarmed until the session schedules again.
    fn poll(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.is_finished() {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

impl Scheduler for TimerScheduler {
    fn schedule_next(&mut self, interval: Duration) {
        self.timer = Some(Timer::new(interval, TimerMode::Once));
    }
}

#[derive(Resource)]
pub struct GameSession(pub Session<FrameSink, TimerScheduler>);

impl GameSession {
    pub fn new(state: GameState) -> Self {
        GameSession(Session::new(state, FrameSink::default(), TimerScheduler::default()))
    }
}

fn start_session(mut session: ResMut<GameSession>) {
    session.0.start();
}

fn fire_scheduled_tick(time: Res<Time>, mut session: ResMut<GameSession>) {
    if session.0.scheduler_mut().poll(time.delta()) {
        session.0.on_tick();
    }
}
