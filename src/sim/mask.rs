//! Opacity masks for pixel-accurate collision
//!
//! A mask is a row-major bitmap with one bit per image pixel, set where the
//! pixel is opaque enough to count as solid.

use glam::{IVec2, Vec2};

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// A per-pixel opacity bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully transparent mask
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Fully solid mask
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    /// Build a mask from tightly packed RGBA8 pixels.
    ///
    /// Missing trailing pixels (short buffer) are treated as transparent.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        let mut mask = Self::empty(width, height);
        for (i, px) in rgba.chunks_exact(4).take(width * height).enumerate() {
            mask.bits[i] = px[3] > ALPHA_THRESHOLD;
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Size in pixels as a float vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = solid;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotate counter-clockwise (on screen) by `degrees` about the center.
    ///
    /// The result is sized to the bounding box of the rotated image, so the
    /// caller recenters it on the original center.
    pub fn rotated(&self, degrees: f32) -> Mask {
        let out_size = rotated_extent(self.size(), degrees);
        let (out_w, out_h) = (out_size.x as usize, out_size.y as usize);
        let mut out = Mask::empty(out_w, out_h);

        let (sin, cos) = degrees.to_radians().sin_cos();
        let src_half = self.size() / 2.0;
        let out_half = out_size / 2.0;

        for oy in 0..out_h {
            for ox in 0..out_w {
                // Sample at pixel centers, mapping back into source space
                let d = Vec2::new(ox as f32 + 0.5, oy as f32 + 0.5) - out_half;
                let s = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + src_half;
                if s.x < 0.0 || s.y < 0.0 {
                    continue;
                }
                if self.get(s.x as usize, s.y as usize) {
                    out.set(ox, oy, true);
                }
            }
        }
        out
    }

    /// True if any solid pixel of `self` lies on a solid pixel of `other`
    /// when `other`'s top-left sits at `offset` relative to `self`'s.
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as usize, y as usize)
                    && other.get((x - offset.x) as usize, (y - offset.y) as usize)
                {
                    return true;
                }
            }
        }
        false
    }
}

/// Whole-pixel bounding size of an image of `size` rotated by `degrees`
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = size.x * cos + size.y * sin;
    let h = size.x * sin + size.y * cos;
    // Trim float noise so 90° turns stay exact
    Vec2::new((w - 1e-3).ceil().max(1.0), (h - 1e-3).ceil().max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_threshold() {
        // 2x1: opaque, faint
        let rgba = [255, 255, 255, 255, 255, 255, 255, 100];
        let mask = Mask::from_rgba(2, 1, &rgba);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_overlap_offsets() {
        let a = Mask::filled(4, 4);
        let b = Mask::filled(2, 2);
        assert!(a.overlaps(&b, IVec2::new(3, 3)));
        assert!(a.overlaps(&b, IVec2::new(-1, -1)));
        assert!(!a.overlaps(&b, IVec2::new(4, 0)));
        assert!(!a.overlaps(&b, IVec2::new(-2, 0)));
    }

    #[test]
    fn test_overlap_ignores_transparent_pixels() {
        // Two L-shapes whose boxes overlap but whose solid pixels don't
        let mut a = Mask::empty(2, 2);
        a.set(0, 0, true);
        let mut b = Mask::empty(2, 2);
        b.set(1, 1, true);
        assert!(!a.overlaps(&b, IVec2::ZERO));
        assert!(a.overlaps(&b, IVec2::new(-1, -1)));
    }

    #[test]
    fn test_rotated_extent() {
        let size = Vec2::new(40.0, 20.0);
        assert_eq!(rotated_extent(size, 0.0), size);
        assert_eq!(rotated_extent(size, 90.0), Vec2::new(20.0, 40.0));
        let diag = rotated_extent(Vec2::new(10.0, 10.0), 45.0);
        assert_eq!(diag, Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_rotate_quarter_turn_counter_clockwise() {
        // Solid pixel on the right edge moves to the top edge
        let mut mask = Mask::empty(3, 3);
        mask.set(2, 1, true);
        let rotated = mask.rotated(90.0);
        assert_eq!((rotated.width(), rotated.height()), (3, 3));
        assert!(rotated.get(1, 0));
        assert_eq!(rotated.count(), 1);
    }

    #[test]
    fn test_rotate_filled_keeps_center_solid() {
        let rotated = Mask::filled(10, 10).rotated(30.0);
        assert!(rotated.get(rotated.width() / 2, rotated.height() / 2));
        // Corners of the grown box are outside the rotated square
        assert!(!rotated.get(0, 0));
    }
}
