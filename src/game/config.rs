//! Session configuration: board size, growth, scoring and the speed curve.

use std::time::Duration;

use thiserror::Error;

use super::{
    BASE_TICK_INTERVAL, Board, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CELL_SIZE,
    INITIAL_SNAKE_LENGTH, MAX_BOARD_SIDE, MIN_TICK_INTERVAL, SCORE_UNIT, TICK_INTERVAL_STEP,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },
    #[error("board is {width}x{height}, each side may be at most {max} cells")]
    BoardTooLarge { width: u32, height: u32, max: u32 },
    #[error("a snake of length {length} does not fit left of the center of a {width}-wide board")]
    SnakeDoesNotFit { length: usize, width: u32 },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("score unit must be positive")]
    ZeroScoreUnit,
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("minimum tick interval must be positive")]
    ZeroFloor,
    #[error("minimum tick interval {floor:?} exceeds the base interval {base:?}")]
    FloorAboveBase { floor: Duration, base: Duration },
}

/// Maps a score to the delay between ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SpeedCurve {
    pub base: Duration,
    pub step: Duration,
    pub floor: Duration,
}

impl SpeedCurve {
    /// `max(floor, base - step * score)`.
    pub fn interval_for(&self, score: u32) -> Duration {
        match self.step.checked_mul(score) {
            Some(speedup) => self.base.saturating_sub(speedup).max(self.floor),
            None => self.floor,
        }
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Difficulty::Easy.speed_curve()
    }
}

/// Speed presets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Average,
    Difficult,
}

impl Difficulty {
    pub fn speed_curve(&self) -> SpeedCurve {
        match self {
            Difficulty::Easy => SpeedCurve {
                base: BASE_TICK_INTERVAL,
                step: TICK_INTERVAL_STEP,
                floor: MIN_TICK_INTERVAL,
            },
            Difficulty::Average => SpeedCurve {
                base: Duration::from_millis(150),
                step: Duration::from_millis(4),
                floor: Duration::from_millis(45),
            },
            Difficulty::Difficult => SpeedCurve {
                base: Duration::from_millis(110),
                step: Duration::from_millis(3),
                floor: Duration::from_millis(40),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub board: Board,
    pub initial_length: usize,
    pub score_unit: u32,
    pub speed: SpeedCurve,
    /// Edge length in pixels of the bitmaps handed to the renderer.
    pub cell_size: u32,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
    /// Whether cheat mode starts switched on.
    pub cheat: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT),
            initial_length: INITIAL_SNAKE_LENGTH,
            score_unit: SCORE_UNIT,
            speed: SpeedCurve::default(),
            cell_size: DEFAULT_CELL_SIZE,
            seed: None,
            cheat: false,
        }
    }
}

impl GameConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.speed = difficulty.speed_curve();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Board { width, height } = self.board;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width,
                height,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        // The body trails left of the head, which sits on the center column.
        if self.initial_length > (width / 2) as usize + 1 {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_length,
                width,
            });
        }
        if self.score_unit == 0 {
            return Err(ConfigError::ZeroScoreUnit);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.speed.floor.is_zero() {
            return Err(ConfigError::ZeroFloor);
        }
        if self.speed.floor > self.speed.base {
            return Err(ConfigError::FloorAboveBase {
                floor: self.speed.floor,
                base: self.speed.base,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        for difficulty in [Difficulty::Easy, Difficulty::Average, Difficulty::Difficult] {
            assert_eq!(GameConfig::default().with_difficulty(difficulty).validate(), Ok(()));
        }
    }

    #[test]
    fn interval_shrinks_with_score_down_to_the_floor() {
        let curve = SpeedCurve::default();
        assert_eq!(curve.interval_for(0), Duration::from_millis(200));
        assert_eq!(curve.interval_for(10), Duration::from_millis(150));
        assert_eq!(curve.interval_for(30), Duration::from_millis(50));
        assert_eq!(curve.interval_for(1_000), Duration::from_millis(50));
        assert_eq!(curve.interval_for(u32::MAX), Duration::from_millis(50));

        let mut previous = curve.interval_for(0);
        for score in 1..100 {
            let next = curve.interval_for(score);
            assert!(next <= previous);
            assert!(next >= curve.floor);
            previous = next;
        }
    }

    #[test]
    fn rejects_boards_too_narrow_for_the_snake() {
        let config = GameConfig {
            board: Board::new(3, 10),
            initial_length: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 3, width: 3 })
        );
    }

    #[test]
    fn rejects_oversized_boards() {
        for board in [
            Board::new(3_000_000_000, 10),
            Board::new(20, MAX_BOARD_SIDE + 1),
        ] {
            let config = GameConfig {
                board,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::BoardTooLarge {
                    width: board.width,
                    height: board.height,
                    max: MAX_BOARD_SIDE,
                })
            );
        }

        let largest = GameConfig {
            board: Board::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE),
            ..GameConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_speed_curve() {
        let config = GameConfig {
            speed: SpeedCurve {
                base: Duration::from_millis(40),
                step: Duration::from_millis(1),
                floor: Duration::from_millis(60),
            },
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FloorAboveBase { .. })));
    }
}
