use super::AssetError;

pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Decoded RGBA8 image, row-major.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyBitmap);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Bitmap { width, height, rgba })
    }

    /// A bitmap of a single colour. Zero dimensions are bumped to 1.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let rgba = color.repeat(width as usize * height as usize);
        Bitmap { width, height, rgba }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Panics when `(x, y)` is outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        self.rgba[i..i + 4].copy_from_slice(&color);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }
}
