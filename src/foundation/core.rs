use crate::foundation::error::{StrokeError, StrokeResult};

pub use kurbo::{BezPath, Point, Rect};

/// Side length of the canonical stroke-database canvas.
pub const CANONICAL_CANVAS_SIDE: u32 = 300;

/// Drawing canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANONICAL_CANVAS_SIDE,
            height: CANONICAL_CANVAS_SIDE,
        }
    }
}

impl Canvas {
    /// Create a validated canvas; both sides must be in `1..=u16::MAX`.
    pub fn new(width: u32, height: u32) -> StrokeResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check the dimensions against what the CPU rasterizer accepts.
    pub fn validate(self) -> StrokeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StrokeError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StrokeError::validation("canvas width/height exceed u16"));
        }
        Ok(())
    }

    /// Width as a signed coordinate.
    pub fn w(self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a signed coordinate.
    pub fn h(self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

/// Integer polygon vertex in canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StrokePoint {
    /// Horizontal coordinate, growing to the right.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl StrokePoint {
    /// Build a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a floating-point kurbo point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Axis-aligned clip rectangle expressed as origin plus extent.
///
/// Extents may run past the canvas; the surface clips them to its own bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ClipRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent from `x`.
    pub width: i32,
    /// Vertical extent from `y`.
    pub height: i32,
}

impl ClipRect {
    /// Build a rectangle from origin and extent.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Convert to a kurbo rectangle (`x0,y0,x1,y1`).
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }

    /// Return `true` when `p` lies inside the half-open rectangle.
    pub fn contains(self, p: StrokePoint) -> bool {
        self.x <= p.x && p.x < self.right() && self.y <= p.y && p.y < self.bottom()
    }
}

/// Straight RGB color with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Build a color from channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Uniform gray of the given tone.
    pub const fn gray(tone: f32) -> Self {
        Self::new(tone, tone, tone)
    }

    /// Quantize to opaque RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
