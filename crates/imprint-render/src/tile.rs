//! Repeating pattern tiles for the workspace background.
//!
//! Tiles are plain RGBA8 buffers so the pattern math is testable without a
//! GPU; the scene builder wraps them in a repeating image brush.

use imprint_core::objects::SerializableColor;

/// One square RGBA8 tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTile {
    /// Premultiplied-alpha-free RGBA bytes, row major, 4 per pixel.
    pub pixels: Vec<u8>,
    /// Side length in pixels.
    pub side: u32,
}

impl PatternTile {
    fn blank(side: u32) -> Self {
        Self {
            pixels: vec![0; (side * side * 4) as usize],
            side,
        }
    }

    fn put(&mut self, x: u32, y: u32, color: SerializableColor) {
        let i = ((y * self.side + x) * 4) as usize;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = color.a;
    }

    /// Alpha at a pixel, for tests.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[((y * self.side + x) * 4 + 3) as usize]
    }
}

/// Minimum usable pattern spacing in pixels.
const MIN_GRID_SIZE: f64 = 2.0;

fn tile_side(grid_size: f64) -> u32 {
    grid_size.max(MIN_GRID_SIZE).round() as u32
}

/// A dot pattern tile: one filled circle centered in a `grid_size` square,
/// transparent elsewhere.
pub fn dots_tile(grid_size: f64, color: SerializableColor, opacity: f64) -> PatternTile {
    let side = tile_side(grid_size);
    let color = color.with_opacity(opacity);
    let mut tile = PatternTile::blank(side);

    let center = side as f64 / 2.0;
    let radius = (side as f64 / 10.0).max(1.0);
    for y in 0..side {
        for x in 0..side {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            if dx * dx + dy * dy <= radius * radius {
                tile.put(x, y, color);
            }
        }
    }
    tile
}

/// A checkerboard tile covering a 2x2 block of `grid_size` squares, with
/// the top-left and bottom-right squares filled.
pub fn checkerboard_tile(grid_size: f64, color: SerializableColor, opacity: f64) -> PatternTile {
    let cell = tile_side(grid_size);
    let side = cell * 2;
    let color = color.with_opacity(opacity);
    let mut tile = PatternTile::blank(side);

    for y in 0..side {
        for x in 0..side {
            let filled = (x / cell + y / cell) % 2 == 0;
            if filled {
                tile.put(x, y, color);
            }
        }
    }
    tile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_tile_center_filled_corner_clear() {
        let tile = dots_tile(20.0, SerializableColor::black(), 1.0);
        assert_eq!(tile.side, 20);
        assert!(tile.alpha_at(10, 10) > 0);
        assert_eq!(tile.alpha_at(0, 0), 0);
        assert_eq!(tile.alpha_at(19, 19), 0);
    }

    #[test]
    fn test_checkerboard_quadrants() {
        let tile = checkerboard_tile(10.0, SerializableColor::black(), 1.0);
        assert_eq!(tile.side, 20);
        // Top-left and bottom-right filled, the other two clear.
        assert!(tile.alpha_at(2, 2) > 0);
        assert!(tile.alpha_at(12, 12) > 0);
        assert_eq!(tile.alpha_at(12, 2), 0);
        assert_eq!(tile.alpha_at(2, 12), 0);
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let full = dots_tile(16.0, SerializableColor::black(), 1.0);
        let half = dots_tile(16.0, SerializableColor::black(), 0.5);
        assert_eq!(full.alpha_at(8, 8), 255);
        assert_eq!(half.alpha_at(8, 8), 128);
    }

    #[test]
    fn test_tiny_grid_size_clamped() {
        let tile = dots_tile(0.0, SerializableColor::black(), 1.0);
        assert_eq!(tile.side, 2);
        assert_eq!(tile.pixels.len(), 16);
    }
}
