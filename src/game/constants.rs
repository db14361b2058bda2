//! Game constants for board size, timing, growth and asset names.

use std::time::Duration;

// Board dimensions
pub const DEFAULT_BOARD_WIDTH: u32 = 20;
pub const DEFAULT_BOARD_HEIGHT: u32 = 20;
pub const MAX_BOARD_SIDE: u32 = 1024;

// Snake
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const SCORE_UNIT: u32 = 1;
pub const GROWTH_PER_FOOD: u32 = 1;

// Timing: interval = max(MIN_TICK_INTERVAL, BASE_TICK_INTERVAL - TICK_INTERVAL_STEP * score)
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const TICK_INTERVAL_STEP: Duration = Duration::from_millis(5);
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

// Food placement
pub const RANDOM_SPAWN_ATTEMPTS: usize = 64;

// Animation: sub-steps drawn per tick
pub const ANIMATION_STEPS: u32 = 5;

// Sprites
pub const DEFAULT_CELL_SIZE: u32 = 32;
pub const SNAKE_HEAD_ASSET: &str = "snake_head.png";
pub const SNAKE_BODY_ASSET: &str = "snake_body.png";
pub const FOOD_ASSET: &str = "apple.png";
