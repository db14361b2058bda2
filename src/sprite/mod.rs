//! Sprite model: shared decoded assets plus a per-entity rotation and size.
//!
//! Rendering never mutates the base asset. Every transform produces a fresh
//! [`Bitmap`], and [`SpriteCache`] memoizes them by [`SpriteKey`] since the
//! game only ever asks for a handful of angles.

mod bitmap;
mod loader;

use std::collections::HashMap;
use std::sync::Arc;

pub use bitmap::*;
pub use loader::*;

/// Name of a loaded asset, used to key cached renders.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AssetId(Arc<str>);

impl AssetId {
    pub fn new(name: &str) -> Self {
        AssetId(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rotation (clockwise degrees, always in `0..360`) and target size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SpriteTransform {
    pub angle: u16,
    pub width: u32,
    pub height: u32,
}

impl SpriteTransform {
    pub fn new(angle: i32, width: u32, height: u32) -> Self {
        SpriteTransform {
            angle: normalize_angle(angle),
            width: width.max(1),
            height: height.max(1),
        }
    }
}

pub fn normalize_angle(angle: i32) -> u16 {
    angle.rem_euclid(360) as u16
}

/// Rotates `base` clockwise by `transform.angle` on a canvas of the same
/// size, then resizes the result to `transform.width x transform.height`.
/// Both steps sample the nearest source pixel; uncovered corners are
/// transparent.
pub fn transform(base: &Bitmap, transform: SpriteTransform) -> Bitmap {
    let rotated = rotate(base, transform.angle);
    resize(&rotated, transform.width, transform.height)
}

fn rotate(base: &Bitmap, angle: u16) -> Bitmap {
    if angle == 0 {
        return base.clone();
    }
    let (sin, cos) = match angle {
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        _ => (angle as f64).to_radians().sin_cos(),
    };
    let (width, height) = base.size();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let mut out = Bitmap::filled(width, height, TRANSPARENT);

    for y in 0..height {
        for x in 0..width {
            // Inverse mapping: find the source pixel that lands on (x, y).
            let u = x as f64 + 0.5 - cx;
            let v = y as f64 + 0.5 - cy;
            let sx = (u * cos + v * sin + cx).floor();
            let sy = (-u * sin + v * cos + cy).floor();
            if sx >= 0.0 && sy >= 0.0 && sx < width as f64 && sy < height as f64 {
                out.set_pixel(x, y, base.pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}

fn resize(base: &Bitmap, width: u32, height: u32) -> Bitmap {
    if base.size() == (width, height) {
        return base.clone();
    }
    let (sw, sh) = base.size();
    let mut out = Bitmap::filled(width, height, TRANSPARENT);
    for y in 0..height {
        let sy = ((y as u64 * 2 + 1) * sh as u64 / (height as u64 * 2)) as u32;
        for x in 0..width {
            let sx = ((x as u64 * 2 + 1) * sw as u64 / (width as u64 * 2)) as u32;
            out.set_pixel(x, y, base.pixel(sx.min(sw - 1), sy.min(sh - 1)));
        }
    }
    out
}

/// Identifies one rendered variant of an asset.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SpriteKey {
    pub asset: AssetId,
    pub transform: SpriteTransform,
}

/// A shared asset plus the transform this particular owner wants.
#[derive(Clone, Debug)]
pub struct SpriteHandle {
    id: AssetId,
    asset: Arc<Bitmap>,
    transform: SpriteTransform,
}

impl SpriteHandle {
    /// Starts unrotated at the asset's native size.
    pub fn new(id: AssetId, asset: Arc<Bitmap>) -> Self {
        let (width, height) = asset.size();
        SpriteHandle {
            id,
            asset,
            transform: SpriteTransform::new(0, width, height),
        }
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn asset(&self) -> &Bitmap {
        &self.asset
    }

    pub fn angle(&self) -> u16 {
        self.transform.angle
    }

    pub fn size(&self) -> (u32, u32) {
        (self.transform.width, self.transform.height)
    }

    /// Absolute rotation, wrapped into `0..360`.
    pub fn set_angle(&mut self, angle: i32) -> &mut Self {
        self.transform.angle = normalize_angle(angle);
        self
    }

    /// Rotation relative to the current angle.
    pub fn pivot(&mut self, delta: i32) -> &mut Self {
        self.set_angle(self.transform.angle as i32 + delta)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.transform.width = width.max(1);
        self.transform.height = height.max(1);
        self
    }

    pub fn key(&self) -> SpriteKey {
        SpriteKey {
            asset: self.id.clone(),
            transform: self.transform,
        }
    }

    pub fn render(&self) -> Bitmap {
        transform(&self.asset, self.transform)
    }
}

/// Memoized renders keyed by asset and transform.
#[derive(Default, Debug)]
pub struct SpriteCache {
    renders: HashMap<SpriteKey, Arc<Bitmap>>,
}

impl SpriteCache {
    pub fn render(&mut self, sprite: &SpriteHandle) -> (SpriteKey, Arc<Bitmap>) {
        let key = sprite.key();
        let bitmap = self
            .renders
            .entry(key.clone())
            .or_insert_with(|| Arc::new(sprite.render()))
            .clone();
        (key, bitmap)
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }
}

/// The three sprites a game needs.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub head: SpriteHandle,
    pub body: SpriteHandle,
    pub food: SpriteHandle,
}

impl SpriteSet {
    /// Resizes every sprite to a square cell.
    pub fn sized(mut self, cell_size: u32) -> Self {
        for sprite in [&mut self.head, &mut self.body, &mut self.food] {
            sprite.resize(cell_size, cell_size);
        }
        self
    }

    /// Single-colour placeholders, handy for tests and headless runs.
    pub fn solid(cell_size: u32) -> Self {
        let solid = |name: &str, color: Rgba| {
            SpriteHandle::new(AssetId::new(name), Arc::new(Bitmap::filled(cell_size, cell_size, color)))
        };
        SpriteSet {
            head: solid("head", [230, 230, 230, 255]),
            body: solid("body", [128, 128, 128, 255]),
            food: solid("food", [255, 0, 0, 255]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const GREEN: Rgba = [0, 255, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];
    const WHITE: Rgba = [255, 255, 255, 255];

    /// 2x2 with a distinct colour in each corner:
    /// ```text
    /// R G
    /// B W
    /// ```
    fn corners() -> Bitmap {
        let mut bitmap = Bitmap::filled(2, 2, TRANSPARENT);
        bitmap.set_pixel(0, 0, RED);
        bitmap.set_pixel(1, 0, GREEN);
        bitmap.set_pixel(0, 1, BLUE);
        bitmap.set_pixel(1, 1, WHITE);
        bitmap
    }

    fn handle(bitmap: Bitmap) -> SpriteHandle {
        SpriteHandle::new(AssetId::new("corners"), Arc::new(bitmap))
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let rotated = transform(&corners(), SpriteTransform::new(90, 2, 2));
        assert_eq!(rotated.pixel(0, 0), BLUE);
        assert_eq!(rotated.pixel(1, 0), RED);
        assert_eq!(rotated.pixel(0, 1), WHITE);
        assert_eq!(rotated.pixel(1, 1), GREEN);
    }

    #[test]
    fn half_turn_swaps_opposite_corners() {
        let rotated = transform(&corners(), SpriteTransform::new(180, 2, 2));
        assert_eq!(rotated.pixel(0, 0), WHITE);
        assert_eq!(rotated.pixel(1, 1), RED);
    }

    #[test]
    fn angles_wrap() {
        assert_eq!(SpriteTransform::new(450, 1, 1).angle, 90);
        assert_eq!(SpriteTransform::new(-90, 1, 1).angle, 270);
        assert_eq!(SpriteTransform::new(360, 1, 1).angle, 0);

        let mut sprite = handle(corners());
        sprite.set_angle(350).pivot(20);
        assert_eq!(sprite.angle(), 10);
        sprite.pivot(-30);
        assert_eq!(sprite.angle(), 340);
    }

    #[test]
    fn full_turn_matches_the_base() {
        let base = corners();
        assert_eq!(transform(&base, SpriteTransform::new(360, 2, 2)), base);
    }

    #[test]
    fn resize_scales_by_nearest_pixel() {
        let big = transform(&corners(), SpriteTransform::new(0, 4, 4));
        assert_eq!(big.size(), (4, 4));
        assert_eq!(big.pixel(0, 0), RED);
        assert_eq!(big.pixel(1, 1), RED);
        assert_eq!(big.pixel(3, 0), GREEN);
        assert_eq!(big.pixel(0, 3), BLUE);
        assert_eq!(big.pixel(2, 2), WHITE);

        let small = transform(&big, SpriteTransform::new(0, 2, 2));
        assert_eq!(small, corners());
    }

    #[test]
    fn rendering_leaves_the_asset_untouched() {
        let mut sprite = handle(corners());
        sprite.set_angle(90).resize(8, 8);
        let rendered = sprite.render();
        assert_eq!(rendered.size(), (8, 8));
        assert_eq!(sprite.asset(), &corners());
    }

    #[test]
    fn odd_angle_keeps_the_canvas_size() {
        let base = Bitmap::filled(9, 9, RED);
        let rotated = transform(&base, SpriteTransform::new(45, 9, 9));
        assert_eq!(rotated.size(), (9, 9));
        // The center survives any rotation, the corners fall outside the source.
        assert_eq!(rotated.pixel(4, 4), RED);
        assert_eq!(rotated.pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn cache_reuses_renders_per_key() {
        let mut cache = SpriteCache::default();
        let mut sprite = handle(corners());

        let (first_key, first) = cache.render(&sprite);
        let (_, again) = cache.render(&sprite.clone());
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(cache.len(), 1);

        sprite.set_angle(90);
        let (turned_key, turned) = cache.render(&sprite);
        assert_ne!(first_key, turned_key);
        assert!(!Arc::ptr_eq(&first, &turned));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn sprite_set_resizes_everything() {
        let sprites = SpriteSet::solid(4).sized(16);
        assert_eq!(sprites.head.size(), (16, 16));
        assert_eq!(sprites.body.size(), (16, 16));
        assert_eq!(sprites.food.size(), (16, 16));
        assert_eq!(sprites.food.asset().size(), (4, 4));
    }
}
