//! Food - the single item on the board, respawned away from the snake.

use std::collections::HashSet;

use rand::prelude::*;
use tracing::{debug, warn};

use crate::entity::{Entity, RenderItem};
use crate::game::{Board, GridPosition, RANDOM_SPAWN_ATTEMPTS};
use crate::sprite::{SpriteCache, SpriteHandle};

#[derive(Clone, Debug)]
pub struct Food {
    entity: Entity,
    active: bool,
}

impl Food {
    /// Inactive until the first [`respawn`](Self::respawn).
    pub fn new(sprite: SpriteHandle) -> Self {
        Food {
            entity: Entity::new(GridPosition::default(), sprite),
            active: false,
        }
    }

    pub fn position(&self) -> GridPosition {
        self.entity.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the head just entered the food's cell.
    pub fn is_at(&self, pos: GridPosition) -> bool {
        self.active && self.entity.position == pos
    }

    /// Puts the food on `pos` unconditionally.
    pub fn place(&mut self, pos: GridPosition) {
        self.entity.move_to(pos);
        self.active = true;
    }

    /// Moves the food to a uniformly random cell of `board` outside
    /// `occupied`. A bounded number of blind draws is tried first, then the
    /// free cells are enumerated. Returns `false` and deactivates the food
    /// when the board has no free cell.
    pub fn respawn<R: Rng>(
        &mut self,
        occupied: &HashSet<GridPosition>,
        board: Board,
        rng: &mut R,
    ) -> bool {
        for _ in 0..RANDOM_SPAWN_ATTEMPTS {
            let candidate = GridPosition::new(
                rng.random_range(0..board.width as i32),
                rng.random_range(0..board.height as i32),
            );
            if !occupied.contains(&candidate) {
                debug!(position = %candidate, "food respawned");
                self.place(candidate);
                return true;
            }
        }

        let free: Vec<GridPosition> = board.cells().filter(|cell| !occupied.contains(cell)).collect();
        match free.choose(rng) {
            Some(&cell) => {
                warn!(free = free.len(), "crowded board, food placed by full scan");
                self.place(cell);
                true
            }
            None => {
                self.active = false;
                false
            }
        }
    }

    pub fn render(&self, cache: &mut SpriteCache) -> Option<RenderItem> {
        self.active.then(|| self.entity.render_cached(cache))
    }
}
