//! Adaptive grid lines, tick labels, and axis intercepts.
//!
//! Grid spacing is derived from the scale rounded down to a power of two, so
//! the interval only changes when the zoom crosses a power-of-two boundary
//! and lines do not slide around during smooth zooming.

use serde::Serialize;

use crate::numeric::{format_label, round_down_to_power_of, strip_fixed, strip_to_precision};
use crate::render::{DrawingSurface, Font, TextBaseline};
use crate::style::Theme;
use crate::transform::{Axis, ViewTransform};

/// Pixels between grid lines at a scale of 1.
pub const BASE_GRID_SPACING: f64 = 64.0;
/// Significant digits kept in the model-space grid interval.
const INTERVAL_PRECISION: usize = 8;

/// One grid line on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    /// Model coordinate shown as the tick label.
    pub label: f64,
    /// Pixel position along the axis.
    pub position: f64,
}

/// Model-space distance between grid lines for a scale.
///
/// Returns `None` when the scale cannot produce a usable interval.
pub fn grid_interval(scale: f64) -> Option<f64> {
    let normalized = round_down_to_power_of(2.0, scale);
    let interval = strip_to_precision(BASE_GRID_SPACING / normalized, INTERVAL_PRECISION);
    (interval.is_finite() && interval > 0.0).then_some(interval)
}

/// Visible grid lines along one axis.
///
/// `extent` is the surface length along the axis in pixels. Lines are
/// returned in descending generation order, one extra line past each edge.
/// Y labels are negated because model Y grows upward.
pub fn axis_grid_lines(scale: f64, offset: f64, extent: f64, negate_labels: bool) -> Vec<GridLine> {
    let Some(interval) = grid_interval(scale) else {
        log::warn!("skipping grid axis: no usable interval for scale {scale}");
        return Vec::new();
    };
    let edge = offset / scale / interval;
    let start = if offset > 0.0 {
        edge.ceil() * interval
    } else if offset < 0.0 {
        edge.floor() * interval
    } else {
        0.0
    };
    let count = (extent / scale / interval).floor();
    if !start.is_finite() || !count.is_finite() || count < 0.0 {
        log::warn!("skipping grid axis: start {start}, count {count}");
        return Vec::new();
    }
    let count = count as usize + 2;

    (0..count)
        .rev()
        .map(|i| {
            let k = start + interval * i as f64;
            let label = if negate_labels { -k } else { k };
            GridLine {
                label: strip_fixed(label),
                position: k * scale - offset,
            }
        })
        .collect()
}

/// Grid lines for one axis of a transform over a surface extent.
pub fn grid_lines(transform: &ViewTransform, axis: Axis, extent: f64) -> Vec<GridLine> {
    match axis {
        Axis::X => axis_grid_lines(transform.scale_x(), transform.offset_x(), extent, false),
        Axis::Y => axis_grid_lines(transform.scale_y(), transform.offset_y(), extent, true),
    }
}

/// Draw the background grid, with tick labels when `labels` is set.
pub fn draw_grid<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    transform: &ViewTransform,
    theme: &Theme,
    labels: bool,
) {
    let size = surface.size();
    let width = size.width_f64();
    let height = size.height_f64();
    let x_lines = grid_lines(transform, Axis::X, width);
    let y_lines = grid_lines(transform, Axis::Y, height);

    surface.set_stroke_color(theme.grid);
    surface.set_line_width(1.0);
    surface.set_font(Font::bold(theme.label_size));
    surface.set_text_baseline(TextBaseline::Middle);

    surface.begin_path();
    for line in &x_lines {
        surface.move_to(line.position, 0.0);
        surface.line_to(line.position, height);
    }
    for line in &y_lines {
        surface.move_to(0.0, line.position);
        surface.line_to(width, line.position);
    }
    surface.close_path();
    surface.stroke();

    if !labels {
        return;
    }

    let label_top = 6.0 + f64::from(theme.label_size) / 2.0;
    surface.set_fill_color(theme.label_x);
    for line in &x_lines {
        let text = format_label(line.label);
        let half = surface.measure_text(&text) / 2.0;
        surface.fill_text(&text, line.position - half, label_top);
    }

    surface.set_fill_color(theme.label_y);
    for line in &y_lines {
        surface.fill_text(&format_label(line.label), 4.0, line.position);
    }
}

/// Draw the axis lines through the model origin and their end labels.
pub fn draw_intercepts<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    transform: &ViewTransform,
    theme: &Theme,
) {
    let size = surface.size();
    let width = size.width_f64();
    let height = size.height_f64();
    let dx = -transform.offset_x();
    let dy = -transform.offset_y();

    surface.set_stroke_color(theme.axis);
    surface.set_line_width(1.0);
    surface.set_font(Font::bold(theme.axis_label_size));
    surface.set_text_baseline(TextBaseline::Alphabetic);

    if (0.0..=width).contains(&dx) {
        surface.set_fill_color(theme.axis_label_y);
        surface.begin_path();
        surface.move_to(dx, 0.0);
        surface.line_to(dx, height);
        if dy > 10.0 {
            surface.fill_text("y", dx + 9.0, 20.0);
        }
        if dy < height {
            surface.fill_text("-y", dx + 9.0, height - 10.0);
        }
        surface.close_path();
        surface.stroke();
    }

    if (0.0..=height).contains(&dy) {
        surface.set_fill_color(theme.axis_label_x);
        surface.begin_path();
        surface.move_to(0.0, dy);
        surface.line_to(width, dy);
        if dx > 10.0 {
            surface.fill_text("-x", 10.0, dy + 16.0);
        }
        if dx < width {
            surface.fill_text("x", width - 20.0, dy + 16.0);
        }
        surface.close_path();
        surface.stroke();
    }
}
