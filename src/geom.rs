//! Geometric primitives used by the plotting pipeline.
//!
//! [`Point`] is a model-space coordinate. [`ScreenPoint`] and [`ScreenRect`]
//! are surface pixels with the origin at the top-left and Y growing downward.

use serde::Serialize;

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X value in model coordinates.
    pub x: f64,
    /// Y value in model coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new model point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The model origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);
}

/// A point in surface space (pixel coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f64,
    /// Y value in pixels.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A rectangle in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &ScreenRect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a new surface size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for pixel math.
    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float, for pixel math.
    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }

    /// The full surface as a rectangle at the origin.
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::from_origin_size(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    /// Check whether the surface has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A host that provides the area a plot surface should fill.
pub trait HostContainer {
    /// Current client area of the host in pixels.
    fn client_size(&self) -> SurfaceSize;
}

impl HostContainer for SurfaceSize {
    fn client_size(&self) -> SurfaceSize {
        *self
    }
}
