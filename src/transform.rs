//! Coordinate transforms between model and surface space.

use thiserror::Error;

use crate::geom::{Point, ScreenPoint, SurfaceSize};
use crate::view::{Range, Viewport};

/// Plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Errors raised when a transform would break its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// A scale was zero, negative, or not finite.
    #[error("invalid {axis} scale {value}: scale must be finite and positive")]
    InvalidScale {
        /// Offending axis.
        axis: Axis,
        /// Rejected value.
        value: f64,
    },
}

fn check_scale(axis: Axis, value: f64) -> Result<f64, TransformError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TransformError::InvalidScale { axis, value })
    }
}

/// Per-axis scale and pixel offset.
///
/// Model X maps to `x * scale_x - offset_x`. Model Y grows upward, so it maps
/// to `-y * scale_y - offset_y`. Scales are always finite and positive;
/// offsets are never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Create a transform with the given scales and zero offsets.
    pub fn with_scale(scale_x: f64, scale_y: f64) -> Result<Self, TransformError> {
        Ok(Self {
            scale_x: check_scale(Axis::X, scale_x)?,
            scale_y: check_scale(Axis::Y, scale_y)?,
            offset_x: 0.0,
            offset_y: 0.0,
        })
    }

    /// Replace the offsets.
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Pixels per model unit on X.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Pixels per model unit on Y.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Pixel offset on X.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Pixel offset on Y.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Set both scales. Nothing changes if either is invalid.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) -> Result<(), TransformError> {
        let scale_x = check_scale(Axis::X, scale_x)?;
        let scale_y = check_scale(Axis::Y, scale_y)?;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        Ok(())
    }

    /// Set the X offset.
    pub fn set_offset_x(&mut self, offset: f64) {
        self.offset_x = offset;
    }

    /// Set the Y offset.
    pub fn set_offset_y(&mut self, offset: f64) {
        self.offset_y = offset;
    }

    /// Model X to pixel X.
    pub fn to_pixel_x(&self, x: f64) -> f64 {
        x * self.scale_x - self.offset_x
    }

    /// Model Y to pixel Y.
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        -y * self.scale_y - self.offset_y
    }

    /// Pixel X to model X.
    pub fn to_model_x(&self, px: f64) -> f64 {
        (px + self.offset_x) / self.scale_x
    }

    /// Pixel Y to model Y.
    pub fn to_model_y(&self, py: f64) -> f64 {
        -(py + self.offset_y) / self.scale_y
    }

    /// Map a model point into surface space.
    pub fn model_to_pixel(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(self.to_pixel_x(point.x), self.to_pixel_y(point.y))
    }

    /// Map a surface point into model space.
    pub fn pixel_to_model(&self, point: ScreenPoint) -> Point {
        Point::new(self.to_model_x(point.x), self.to_model_y(point.y))
    }

    /// Place the model origin at the center of a surface.
    pub fn recenter_to_origin(&mut self, size: SurfaceSize) {
        self.offset_x = -f64::from(size.width / 2);
        self.offset_y = -f64::from(size.height / 2);
    }

    /// Model area covered by a surface of the given size.
    pub fn visible_viewport(&self, size: SurfaceSize) -> Viewport {
        let top_left = self.pixel_to_model(ScreenPoint::new(0.0, 0.0));
        let bottom_right =
            self.pixel_to_model(ScreenPoint::new(size.width_f64(), size.height_f64()));
        Viewport::new(
            Range::new(top_left.x, bottom_right.x),
            Range::new(top_left.y, bottom_right.y),
        )
    }

    /// Multiply the scales, keeping the model point under `anchor` in place.
    pub fn zoom_at(
        &mut self,
        factor_x: f64,
        factor_y: f64,
        anchor: ScreenPoint,
    ) -> Result<(), TransformError> {
        let pinned = self.pixel_to_model(anchor);
        let scale_x = check_scale(Axis::X, self.scale_x * factor_x)?;
        let scale_y = check_scale(Axis::Y, self.scale_y * factor_y)?;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.offset_x = pinned.x * scale_x - anchor.x;
        self.offset_y = -pinned.y * scale_y - anchor.y;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_roundtrip() {
        for &(scale, offset) in &[(1.0, 0.0), (0.37, -412.5), (19.0, 1e4), (1e-3, 3.0)] {
            let transform = ViewTransform::with_scale(scale, scale)
                .unwrap()
                .with_offset(offset, -offset);
            for &p in &[-1000.0, -3.5, 0.0, 1.25, 799.0] {
                let x = transform.to_pixel_x(transform.to_model_x(p));
                let y = transform.to_pixel_y(transform.to_model_y(p));
                assert!((x - p).abs() < 1e-9 * p.abs().max(1.0));
                assert!((y - p).abs() < 1e-9 * p.abs().max(1.0));
            }
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut transform = ViewTransform::default();
        transform.recenter_to_origin(SurfaceSize::new(800, 600));
        assert_eq!(transform.to_pixel_y(0.0), 300.0);
        assert!(transform.to_pixel_y(10.0) < transform.to_pixel_y(0.0));
        assert_eq!(transform.to_pixel_x(10.0), 410.0);
    }

    #[test]
    fn recenter_truncates() {
        let mut transform = ViewTransform::default();
        transform.recenter_to_origin(SurfaceSize::new(801, 601));
        assert_eq!(transform.offset_x(), -400.0);
        assert_eq!(transform.offset_y(), -300.0);
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert_eq!(
            ViewTransform::with_scale(0.0, 1.0),
            Err(TransformError::InvalidScale {
                axis: Axis::X,
                value: 0.0
            })
        );
        assert!(ViewTransform::with_scale(1.0, f64::NAN).is_err());
        let mut transform = ViewTransform::default();
        assert!(transform.set_scale(2.0, -1.0).is_err());
        assert_eq!(transform.scale_x(), 1.0);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut transform = ViewTransform::default().with_offset(-400.0, -300.0);
        let anchor = ScreenPoint::new(123.0, 456.0);
        let before = transform.pixel_to_model(anchor);
        transform.zoom_at(2.5, 0.5, anchor).unwrap();
        let after = transform.pixel_to_model(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert!(transform.zoom_at(0.0, 1.0, anchor).is_err());
        assert_eq!(transform.scale_x(), 2.5);
    }

    #[test]
    fn visible_viewport_covers_surface() {
        let mut transform = ViewTransform::default();
        transform.recenter_to_origin(SurfaceSize::new(800, 600));
        let viewport = transform.visible_viewport(SurfaceSize::new(800, 600));
        assert_eq!(viewport.x, Range::new(-400.0, 400.0));
        assert_eq!(viewport.y, Range::new(-300.0, 300.0));
    }
}
