//! Anything drawn on the grid: snake segments and food.

use std::sync::Arc;

use crate::game::GridPosition;
use crate::sprite::{Bitmap, SpriteCache, SpriteHandle, SpriteKey};

/// One sprite ready to be drawn at a grid cell.
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub position: GridPosition,
    pub key: SpriteKey,
    pub bitmap: Arc<Bitmap>,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub position: GridPosition,
    pub sprite: SpriteHandle,
}

impl Entity {
    pub fn new(position: GridPosition, sprite: SpriteHandle) -> Self {
        Entity { position, sprite }
    }

    /// No bounds check; whoever owns the entity decides what is legal.
    pub fn move_to(&mut self, position: GridPosition) {
        self.position = position;
    }

    pub fn render(&self) -> (GridPosition, Bitmap) {
        (self.position, self.sprite.render())
    }

    pub fn render_cached(&self, cache: &mut SpriteCache) -> RenderItem {
        let (key, bitmap) = cache.render(&self.sprite);
        RenderItem {
            position: self.position,
            key,
            bitmap,
        }
    }
}
