//! Colors and font sizes used when drawing the grid and axes.

use crate::render::Color;

/// Visual theme for plots.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Grid line color.
    pub grid: Color,
    /// Axis intercept line color.
    pub axis: Color,
    /// Color of the `x` / `-x` axis end labels.
    pub axis_label_x: Color,
    /// Color of the `y` / `-y` axis end labels.
    pub axis_label_y: Color,
    /// Color of the X grid tick labels.
    pub label_x: Color,
    /// Color of the Y grid tick labels.
    pub label_y: Color,
    /// Font size of grid tick labels in pixels.
    pub label_size: f32,
    /// Font size of axis end labels in pixels.
    pub axis_label_size: f32,
    /// Fill behind the surface, used by render backends.
    pub background: Color,
}

impl Theme {
    /// Create the default (light) theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self {
            grid: Color::from_rgb8(0x33, 0x33, 0x3a),
            axis: Color::from_rgb8(0x88, 0x88, 0x99),
            axis_label_x: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            axis_label_y: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            label_x: Color::from_rgb8(0xaa, 0xaa, 0xaa),
            label_y: Color::from_rgb8(0xaa, 0xaa, 0xaa),
            background: Color::from_rgb8(0x12, 0x12, 0x16),
            ..Self::default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let label = Color::from_rgb8(0x44, 0x44, 0x44);
        Self {
            grid: Color::from_rgb8(0xdd, 0xdd, 0xdd),
            axis: Color::from_rgb8(0x88, 0x88, 0x88),
            axis_label_x: label,
            axis_label_y: label,
            label_x: label,
            label_y: label,
            label_size: 10.0,
            axis_label_size: 18.0,
            background: Color::WHITE,
        }
    }
}
