//! Drives whole games through the public session API with a recording
//! renderer and a manual clock.

use std::time::Duration;

use arcade_snake::game::{
    Board, Direction, Frame, GameConfig, GameOverReason, GamePhase, GameState, InputEvent,
    InputOutcome, Renderer, Scheduler, Session, TickEvent,
};
use arcade_snake::sprite::SpriteSet;

#[derive(Default)]
struct Screen {
    frames: Vec<Frame>,
}

impl Renderer for Screen {
    fn draw(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}

#[derive(Default)]
struct Clock {
    armed: Option<Duration>,
}

impl Scheduler for Clock {
    fn schedule_next(&mut self, interval: Duration) {
        self.armed = Some(interval);
    }
}

fn session(width: u32, height: u32, cheat: bool) -> Session<Screen, Clock> {
    let config = GameConfig {
        board: Board::new(width, height),
        cell_size: 4,
        seed: Some(11),
        cheat,
        ..GameConfig::default()
    };
    let state = GameState::new(config, SpriteSet::solid(4)).unwrap();
    Session::new(state, Screen::default(), Clock::default())
}

/// Fires the armed tick, if any. Returns false when the clock is idle.
fn fire(session: &mut Session<Screen, Clock>) -> bool {
    if session.scheduler_mut().armed.take().is_some() {
        session.on_tick();
        true
    } else {
        false
    }
}

fn arrow_towards(session: &Session<Screen, Clock>) -> InputEvent {
    let head = session.state().snake().head();
    let food = session.state().food().position();
    if food.col > head.col {
        InputEvent::ArrowRight
    } else if food.col < head.col {
        InputEvent::ArrowLeft
    } else if food.row > head.row {
        InputEvent::ArrowDown
    } else {
        InputEvent::ArrowUp
    }
}

#[test]
fn chasing_food_scores_grows_and_speeds_up() {
    let mut session = session(10, 10, true);
    session.start();

    for target in 1..=3 {
        let mut ticks = 0;
        while session.state().score() < target {
            session.on_input(arrow_towards(&session));
            assert!(fire(&mut session), "clock stopped while running");
            ticks += 1;
            assert!(ticks < 40, "never reached food {target}");
        }
        let frame = session.renderer().frames.last().unwrap();
        assert_eq!(frame.event, TickEvent::Ate { score: target });
        assert_eq!(session.state().snake().len(), 3 + target as usize);
        assert_eq!(
            session.state().interval(),
            Duration::from_millis(200 - 5 * u64::from(target))
        );
        assert!(session.state().food().is_active());
        assert!(!session.state().snake().occupies(session.state().food().position()));
    }

    let frame = session.renderer().frames.last().unwrap();
    // Food plus every segment.
    assert_eq!(frame.sprites.len(), session.state().snake().len() + 1);
    assert_eq!(frame.sprites.last().unwrap().position, session.state().snake().head());
    let interval = session.state().interval();
    assert_eq!(session.scheduler_mut().armed, Some(interval));
}

#[test]
fn wall_ends_the_game_and_reset_restarts_it() {
    let mut session = session(8, 8, false);
    session.start();

    while fire(&mut session) {}
    assert_eq!(session.state().phase(), GamePhase::GameOver);
    assert_eq!(session.state().game_over_reason(), Some(GameOverReason::Wall));
    let over = session.renderer().frames.last().unwrap();
    assert_eq!(over.event, TickEvent::GameOver(GameOverReason::Wall));
    assert_eq!(over.game_over, Some(GameOverReason::Wall));

    assert_eq!(session.on_input(InputEvent::ArrowUp), InputOutcome::Ignored);
    assert!(!fire(&mut session));

    assert_eq!(session.on_input(InputEvent::Reset), InputOutcome::Restarted);
    assert_eq!(session.state().phase(), GamePhase::Running);
    assert_eq!(session.state().score(), 0);
    assert_eq!(session.state().snake().heading(), Direction::Right);
    assert!(fire(&mut session));
}

#[test]
fn cheat_toggled_mid_game_saves_the_snake() {
    let mut session = session(8, 8, false);
    session.start();
    assert_eq!(session.on_input(InputEvent::Reset), InputOutcome::Ignored);
    assert_eq!(
        session.on_input(InputEvent::ToggleCheat),
        InputOutcome::CheatToggled(true)
    );

    // Far more ticks than the board is wide: the snake wraps instead of dying.
    for _ in 0..40 {
        assert!(fire(&mut session));
    }
    assert_eq!(session.state().phase(), GamePhase::Running);
    assert!(session.renderer().frames.iter().skip(1).all(|frame| frame.cheat));

    assert_eq!(
        session.on_input(InputEvent::ToggleCheat),
        InputOutcome::CheatToggled(false)
    );
    while fire(&mut session) {}
    assert_eq!(session.state().phase(), GamePhase::GameOver);
}
