//! Geometry and color types
//!
//! Surfaces are laid out by the host toolkit; these types only carry the
//! rectangles and colors the skin paints with.

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rect of this size anchored at the origin
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Edges count as inside
    pub fn contains(&self, point: Point) -> bool {
        (self.x()..=self.right()).contains(&point.x)
            && (self.y()..=self.bottom()).contains(&point.y)
    }

    /// Same size, moved by `(dx, dy)`
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect::new(self.x() + dx, self.y() + dy, self.width(), self.height())
    }

    /// Shrunk by `dx` on the left and right and `dy` on the top and bottom,
    /// never below zero size
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        let width = self.width() - dx * 2.0;
        let height = self.height() - dy * 2.0;
        Rect::new(self.x() + dx, self.y() + dy, width.max(0.0), height.max(0.0))
    }

    /// Intersection of two rects, `None` when they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x().max(other.x());
        let top = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color, components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Build from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgb8(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Lighten (positive) or darken (negative) by mixing toward white or black
    pub fn shade(self, amount: f32) -> Self {
        let target = if amount >= 0.0 { Self::WHITE } else { Self::BLACK };
        let mut mixed = Self::lerp(&self, &target, amount.abs().min(1.0));
        mixed.a = self.a;
        mixed
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(&Rect::new(20.0, 0.0, 1.0, 1.0)), None);
    }

    #[test]
    fn shade_keeps_alpha() {
        let c = Color::rgba(0.5, 0.5, 0.5, 0.4).shade(1.0);
        assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 0.4));
        let d = Color::rgb(0.5, 0.5, 0.5).shade(-1.0);
        assert_eq!(d, Color::BLACK);
    }

    #[test]
    fn from_hex_matches_rgb8() {
        assert_eq!(Color::from_hex(0x00AEDB), Color::from_rgb8(0, 174, 219));
    }
}
