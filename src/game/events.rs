//! Inputs accepted by the game and the events a tick reports back.

use super::Direction;

/// Discrete input delivered by the frontend.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ToggleCheat,
    Reset,
}

impl InputEvent {
    /// The heading an arrow event asks for.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputEvent::ArrowUp => Some(Direction::Up),
            InputEvent::ArrowDown => Some(Direction::Down),
            InputEvent::ArrowLeft => Some(Direction::Left),
            InputEvent::ArrowRight => Some(Direction::Right),
            InputEvent::ToggleCheat | InputEvent::Reset => None,
        }
    }
}

/// What [`GameState::handle_input`](super::GameState::handle_input) did with an input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputOutcome {
    /// Dropped: wrong phase, or a reversal the snake refused.
    Ignored,
    /// The queued heading was updated.
    Steered,
    /// Cheat mode flipped; carries the new value.
    CheatToggled(bool),
    /// The game left `GameOver` and starts over.
    Restarted,
}

/// Why a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
    /// No free cell was left for food.
    BoardFull,
}

/// Result of a single tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickEvent {
    /// Nothing moved: the game is over, or a frame was requested without ticking.
    Idle,
    Moved,
    Ate { score: u32 },
    GameOver(GameOverReason),
}
