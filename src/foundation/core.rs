use crate::foundation::math::{ceil_snapped, floor_snapped, mul_div255_u8};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight-alpha RGBA color with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha set from a `[0, 1]` opacity (values outside are clamped).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let op = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.with_alpha((op * 255.0).round() as u8)
    }

    /// Alpha as a `[0, 1]` opacity.
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }

    /// Recover a straight color from premultiplied bytes.
    pub fn from_premultiplied(px: [u8; 4]) -> Self {
        let [r, g, b, a] = px;
        if a == 0 {
            return Self::TRANSPARENT;
        }
        let unpremul = |c: u8| -> u8 {
            ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
        };
        Self::new(unpremul(r), unpremul(g), unpremul(b), a)
    }

    /// HSB brightness: the largest color channel as a `[0, 1]` fraction.
    pub fn brightness(self) -> f32 {
        f32::from(self.r.max(self.g).max(self.b)) / 255.0
    }
}

/// Integer pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl IntRect {
    /// Create a rectangle from its edges.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from an origin and a size.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Smallest integer rectangle containing `rect`.
    ///
    /// Edges within float noise of a whole pixel snap to it instead of growing by one.
    pub fn containing(rect: Rect) -> Self {
        Self::new(
            floor_snapped(rect.x0) as i32,
            floor_snapped(rect.y0) as i32,
            ceil_snapped(rect.x1) as i32,
            ceil_snapped(rect.y1) as i32,
        )
    }

    /// Width, clamped at zero.
    pub fn width(self) -> i32 {
        self.x1.saturating_sub(self.x0).max(0)
    }

    /// Height, clamped at zero.
    pub fn height(self) -> i32 {
        self.y1.saturating_sub(self.y0).max(0)
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Top-left corner.
    pub fn origin(self) -> (i32, i32) {
        (self.x0, self.y0)
    }

    /// Shift by `(dx, dy)`.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x0.saturating_add(dx),
            self.y0.saturating_add(dy),
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
        )
    }

    /// Grow every edge outward by `d` pixels (shrink when negative).
    pub fn expanded(self, d: i32) -> Self {
        Self::new(
            self.x0.saturating_sub(d),
            self.y0.saturating_sub(d),
            self.x1.saturating_add(d),
            self.y1.saturating_add(d),
        )
    }

    /// Smallest rectangle containing both; an empty operand is ignored.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Overlap of both rectangles (possibly empty).
    pub fn intersect(self, other: Self) -> Self {
        Self::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// `true` when `(x, y)` lies inside.
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Same rectangle as floating-point geometry.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
