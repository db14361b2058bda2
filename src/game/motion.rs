//! Sub-tick animation. Between two ticks every sprite slides from its old
//! cell to its new one and turns a share of the way on each step, so the
//! renderer never has to snap a segment across a cell or through a corner.

use std::sync::Arc;

use super::{Board, GridPosition};
use crate::entity::RenderItem;
use crate::sprite::{Bitmap, SpriteCache, SpriteHandle, SpriteKey};

/// Signed shortest turn from `from` to `to`, in `-179..=180` degrees.
/// A half turn is always taken clockwise.
pub fn turn_delta(from: u16, to: u16) -> i32 {
    let diff = (i32::from(to) - i32::from(from)).rem_euclid(360);
    if diff > 180 { diff - 360 } else { diff }
}

/// A sprite at a fractional cell position, for one animation step.
#[derive(Clone, Debug)]
pub struct Pose {
    pub col: f32,
    pub row: f32,
    pub key: SpriteKey,
    pub bitmap: Arc<Bitmap>,
}

impl From<RenderItem> for Pose {
    fn from(item: RenderItem) -> Self {
        Pose {
            col: item.position.col as f32,
            row: item.position.row as f32,
            key: item.key,
            bitmap: item.bitmap,
        }
    }
}

/// How one sprite gets from the previous frame to the current one.
#[derive(Clone, Debug)]
pub struct Tween {
    pub from: GridPosition,
    pub to: GridPosition,
    /// Starts at the angle the sprite had on the previous frame.
    pub sprite: SpriteHandle,
    pub target_angle: u16,
}

impl Tween {
    /// A sprite that neither moves nor turns.
    pub fn still(at: GridPosition, sprite: SpriteHandle) -> Self {
        Tween {
            from: at,
            to: at,
            target_angle: sprite.angle(),
            sprite,
        }
    }

    /// Poses for steps `1..=steps`. Each step covers an equal share of the
    /// slide and of the remaining turn, so the last pose sits exactly on
    /// `to` at `target_angle`.
    pub fn poses(&self, board: Board, steps: u32, cache: &mut SpriteCache) -> Vec<Pose> {
        let steps = steps.max(1);
        let (d_col, d_row) = slide(self.from, self.to, board);
        let mut sprite = self.sprite.clone();

        (1..=steps)
            .map(|step| {
                let remaining = (steps - step + 1) as i32;
                sprite.pivot(turn_delta(sprite.angle(), self.target_angle) / remaining);

                let (col, row) = if step == steps {
                    (self.to.col as f32, self.to.row as f32)
                } else {
                    let t = step as f32 / steps as f32;
                    (
                        self.from.col as f32 + t * d_col,
                        self.from.row as f32 + t * d_row,
                    )
                };
                let (key, bitmap) = cache.render(&sprite);
                Pose {
                    col,
                    row,
                    key,
                    bitmap,
                }
            })
            .collect()
    }
}

/// Cell offset from `from` to `to`. A jump of more than one cell along an
/// axis is a wrap through the border, so it slides out over the edge
/// instead of back across the board.
fn slide(from: GridPosition, to: GridPosition, board: Board) -> (f32, f32) {
    let wrapped = |delta: i32, side: u32| {
        if delta.abs() > 1 {
            delta - delta.signum() * side as i32
        } else {
            delta
        }
    };
    (
        wrapped(to.col - from.col, board.width) as f32,
        wrapped(to.row - from.row, board.height) as f32,
    )
}

/// Lays the per-sprite poses out as keyframes: entry `i` holds every
/// sprite's pose for step `i + 1`, in drawing order.
pub fn keyframes(
    tweens: &[Tween],
    board: Board,
    steps: u32,
    cache: &mut SpriteCache,
) -> Vec<Vec<Pose>> {
    let steps = steps.max(1) as usize;
    let mut frames = vec![Vec::with_capacity(tweens.len()); steps];
    for tween in tweens {
        for (frame, pose) in frames.iter_mut().zip(tween.poses(board, steps as u32, cache)) {
            frame.push(pose);
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteSet;

    fn pos(col: i32, row: i32) -> GridPosition {
        GridPosition::new(col, row)
    }

    #[test]
    fn turns_take_the_short_way_round() {
        assert_eq!(turn_delta(0, 90), 90);
        assert_eq!(turn_delta(90, 0), -90);
        assert_eq!(turn_delta(270, 0), 90);
        assert_eq!(turn_delta(0, 270), -90);
        assert_eq!(turn_delta(90, 270), 180);
        assert_eq!(turn_delta(270, 90), 180);
        assert_eq!(turn_delta(180, 180), 0);
    }

    #[test]
    fn slides_evenly_and_lands_on_the_cell() {
        let mut cache = SpriteCache::default();
        let mut sprite = SpriteSet::solid(2).body;
        sprite.set_angle(90);
        let tween = Tween {
            from: pos(2, 3),
            to: pos(3, 3),
            sprite,
            target_angle: 90,
        };

        let poses = tween.poses(Board::new(8, 8), 5, &mut cache);
        let cols: Vec<f32> = poses.iter().map(|pose| pose.col).collect();
        assert_eq!(cols.len(), 5);
        assert!((cols[0] - 2.2).abs() < 1e-5);
        assert!((cols[2] - 2.6).abs() < 1e-5);
        assert_eq!(cols[4], 3.0);
        assert!(poses.iter().all(|pose| pose.row == 3.0));
        assert!(poses.iter().all(|pose| pose.key.transform.angle == 90));
    }

    #[test]
    fn turns_a_share_per_step() {
        let mut cache = SpriteCache::default();
        let mut sprite = SpriteSet::solid(2).head;
        sprite.set_angle(90);
        let tween = Tween {
            from: pos(4, 4),
            to: pos(4, 3),
            sprite,
            target_angle: 0,
        };

        let angles: Vec<u16> = tween
            .poses(Board::new(8, 8), 5, &mut cache)
            .iter()
            .map(|pose| pose.key.transform.angle)
            .collect();
        assert_eq!(angles, vec![72, 54, 36, 18, 0]);

        let mut left = SpriteSet::solid(2).head;
        left.set_angle(270);
        let wrap = Tween {
            target_angle: 0,
            ..Tween::still(pos(1, 1), left)
        };
        let angles: Vec<u16> = wrap
            .poses(Board::new(8, 8), 5, &mut cache)
            .iter()
            .map(|pose| pose.key.transform.angle)
            .collect();
        assert_eq!(angles, vec![288, 306, 324, 342, 0]);
    }

    #[test]
    fn wrapping_slides_out_over_the_edge() {
        let mut cache = SpriteCache::default();
        let tween = Tween {
            from: pos(7, 2),
            to: pos(0, 2),
            ..Tween::still(pos(0, 0), SpriteSet::solid(2).head)
        };
        let poses = tween.poses(Board::new(8, 8), 5, &mut cache);
        assert!((poses[0].col - 7.2).abs() < 1e-5);
        assert!((poses[3].col - 7.8).abs() < 1e-5);
        assert_eq!(poses[4].col, 0.0);
    }

    #[test]
    fn keyframes_keep_drawing_order() {
        let mut cache = SpriteCache::default();
        let sprites = SpriteSet::solid(2);
        let tweens = [
            Tween::still(pos(0, 0), sprites.food.clone()),
            Tween {
                from: pos(1, 1),
                to: pos(2, 1),
                ..Tween::still(pos(1, 1), sprites.head.clone())
            },
        ];

        let frames = keyframes(&tweens, Board::new(4, 4), 3, &mut cache);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|frame| frame.len() == 2));
        assert!(frames.iter().all(|frame| frame[0].key.asset == *sprites.food.id()));
        assert_eq!(frames[2][1].col, 2.0);
    }
}
