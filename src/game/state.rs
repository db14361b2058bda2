//! The tick-driven state machine tying snake, food, score and speed together.

use std::collections::HashSet;
use std::time::Duration;

use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use super::{
    ANIMATION_STEPS, CheatMode, ConfigError, Direction, GROWTH_PER_FOOD, GameConfig,
    GameOverReason, GridPosition, InputEvent, InputOutcome, Pose, TickEvent, Tween, keyframes,
};
use crate::entity::{Entity, RenderItem};
use crate::food::Food;
use crate::snake::{AdvanceResult, Snake};
use crate::sprite::{SpriteCache, SpriteHandle, SpriteSet};

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

/// Score and the delay the scheduler should wait before the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub score: u32,
    pub interval: Duration,
}

impl Status {
    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }
}

/// Everything a renderer needs after a tick.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Food first, then the snake from tail to head so the head ends on top.
    pub sprites: Vec<RenderItem>,
    /// The move into this frame, one entry per animation step in the same
    /// drawing order. A frame with nothing to animate has a single entry.
    pub keyframes: Vec<Vec<Pose>>,
    pub status: Status,
    pub phase: GamePhase,
    pub event: TickEvent,
    pub cheat: bool,
    pub game_over: Option<GameOverReason>,
}

pub struct GameState {
    config: GameConfig,
    snake: Snake,
    food: Food,
    head_sprite: SpriteHandle,
    body_sprite: SpriteHandle,
    cache: SpriteCache,
    score: u32,
    interval: Duration,
    phase: GamePhase,
    game_over: Option<GameOverReason>,
    cheat: CheatMode,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig, sprites: SpriteSet) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sprites = sprites.sized(config.cell_size);
        let mut state = GameState {
            snake: Snake::spawn(config.board, config.initial_length),
            food: Food::new(sprites.food),
            head_sprite: sprites.head,
            body_sprite: sprites.body,
            cache: SpriteCache::default(),
            score: 0,
            interval: config.speed.interval_for(0),
            phase: GamePhase::Running,
            game_over: None,
            cheat: CheatMode::new(config.cheat),
            rng,
            config,
        };
        state.start_round();
        Ok(state)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn cheat(&self) -> CheatMode {
        self.cheat
    }

    pub fn status(&self) -> Status {
        Status {
            score: self.score,
            interval: self.interval,
        }
    }

    /// Advances the simulation by one cell and returns what to draw.
    pub fn tick(&mut self) -> Frame {
        let before = self.snake_layout();
        let event = match self.phase {
            GamePhase::Running => self.step(),
            GamePhase::GameOver => TickEvent::Idle,
        };
        trace!(?event, score = self.score, "tick");
        self.build_frame(event, Some(before.as_slice()))
    }

    /// The current picture, without advancing.
    pub fn frame(&mut self) -> Frame {
        self.build_frame(TickEvent::Idle, None)
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        match (event, self.phase) {
            (InputEvent::ToggleCheat, _) => {
                let active = self.cheat.toggle();
                info!(active, "cheat mode toggled");
                InputOutcome::CheatToggled(active)
            }
            (InputEvent::Reset, GamePhase::GameOver) => {
                self.reset();
                InputOutcome::Restarted
            }
            (InputEvent::Reset, GamePhase::Running) => InputOutcome::Ignored,
            (_, GamePhase::GameOver) => InputOutcome::Ignored,
            (arrow, GamePhase::Running) => {
                let Some(direction) = arrow.direction() else {
                    return InputOutcome::Ignored;
                };
                if self.cheat.is_active() {
                    self.snake.force_direction(direction);
                    InputOutcome::Steered
                } else if self.snake.set_direction(direction) {
                    InputOutcome::Steered
                } else {
                    InputOutcome::Ignored
                }
            }
        }
    }

    /// Back to the starting position. Cheat mode is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.interval = self.config.speed.interval_for(0);
        self.phase = GamePhase::Running;
        self.game_over = None;
        self.snake = Snake::spawn(self.config.board, self.config.initial_length);
        self.start_round();
        info!(cheat = self.cheat.is_active(), "game reset");
    }

    fn start_round(&mut self) {
        if !self.respawn_food() {
            // Only reachable on a board the starting snake fills completely.
            self.end(GameOverReason::BoardFull);
        }
    }

    fn step(&mut self) -> TickEvent {
        let board = self.config.board;
        // Growth applies on the tick the food is reached, so check ahead.
        let eating = self.food.is_at(self.snake.next_head(board, self.cheat));
        if eating {
            self.snake.grow(GROWTH_PER_FOOD);
        }

        match self.snake.advance(board, self.cheat) {
            AdvanceResult::AteSelf => self.end(GameOverReason::SelfCollision),
            AdvanceResult::Moved if !self.cheat.is_active() && !board.contains(self.snake.head()) => {
                self.end(GameOverReason::Wall)
            }
            AdvanceResult::Moved if eating => self.eat(),
            AdvanceResult::Moved => TickEvent::Moved,
        }
    }

    fn eat(&mut self) -> TickEvent {
        self.score = self.score.saturating_add(self.config.score_unit);
        let interval = self.config.speed.interval_for(self.score);
        if interval != self.interval {
            debug!(score = self.score, interval_ms = interval.as_millis() as u64, "speeding up");
        }
        self.interval = interval;

        if !self.respawn_food() {
            warn!(score = self.score, "no free cell left for food");
            return self.end(GameOverReason::BoardFull);
        }
        TickEvent::Ate { score: self.score }
    }

    fn respawn_food(&mut self) -> bool {
        let occupied: HashSet<GridPosition> = self.snake.segments().collect();
        self.food.respawn(&occupied, self.config.board, &mut self.rng)
    }

    fn end(&mut self, reason: GameOverReason) -> TickEvent {
        self.phase = GamePhase::GameOver;
        self.game_over = Some(reason);
        info!(?reason, score = self.score, "game over");
        TickEvent::GameOver(reason)
    }

    /// Every segment with the direction it faces, head first.
    fn snake_layout(&self) -> Vec<(GridPosition, Direction)> {
        let headings = self.snake.segment_headings(self.config.board);
        self.snake.segments().zip(headings).collect()
    }

    fn segment_sprite(&self, index: usize, facing: Direction) -> SpriteHandle {
        let mut sprite = if index == 0 {
            self.head_sprite.clone()
        } else {
            self.body_sprite.clone()
        };
        sprite.set_angle(facing.angle() as i32);
        sprite
    }

    fn build_frame(&mut self, event: TickEvent, before: Option<&[(GridPosition, Direction)]>) -> Frame {
        let board = self.config.board;
        let food = self.food.render(&mut self.cache);
        let layout = self.snake_layout();

        let mut sprites = Vec::with_capacity(layout.len() + 1);
        sprites.extend(food.clone());
        for (index, &(cell, facing)) in layout.iter().enumerate().rev() {
            // A head that crashed through the wall has nowhere to be drawn.
            if !board.contains(cell) {
                continue;
            }
            let sprite = self.segment_sprite(index, facing);
            sprites.push(Entity::new(cell, sprite).render_cached(&mut self.cache));
        }

        let tweens: Vec<Tween> = match (before, event) {
            // A crash does not move anything: the head turns in place toward
            // the heading that killed it.
            (
                Some(before),
                TickEvent::GameOver(GameOverReason::Wall | GameOverReason::SelfCollision),
            ) => before
                .iter()
                .enumerate()
                .rev()
                .map(|(index, &(cell, facing))| {
                    let still = Tween::still(cell, self.segment_sprite(index, facing));
                    if index == 0 {
                        Tween {
                            target_angle: self.snake.heading().angle(),
                            ..still
                        }
                    } else {
                        still
                    }
                })
                .collect(),
            (Some(before), TickEvent::Moved | TickEvent::Ate { .. } | TickEvent::GameOver(_)) => layout
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, (cell, _))| board.contains(*cell))
                .map(|(index, &(cell, facing))| {
                    // A segment added by growth appears where it ends up.
                    let (from, was_facing) = before.get(index).copied().unwrap_or((cell, facing));
                    Tween {
                        from,
                        to: cell,
                        sprite: self.segment_sprite(index, was_facing),
                        target_angle: facing.angle(),
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        let steps = if tweens.is_empty() {
            vec![sprites.iter().cloned().map(Pose::from).collect()]
        } else {
            let mut steps = keyframes(&tweens, board, ANIMATION_STEPS, &mut self.cache);
            if let Some(food) = &food {
                for step in &mut steps {
                    step.insert(0, Pose::from(food.clone()));
                }
            }
            steps
        };

        Frame {
            sprites,
            keyframes: steps,
            status: self.status(),
            phase: self.phase,
            event,
            cheat: self.cheat.is_active(),
            game_over: self.game_over,
        }
    }
}
