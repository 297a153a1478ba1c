//! Plot configuration and lenient option loading.
//!
//! Options can be built in code or read from a JSON object using the key
//! names of the embedding API (`scaleX`, `labelSize`, `color.grid`, ...).
//! Loading never fails: a missing key, a value of the wrong type, or a value
//! outside its valid range falls back to the default for that key.

use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::render::Color;
use crate::style::Theme;

/// Default delay between the last resize event and the redraw it triggers.
pub const DEFAULT_REDRAW_RATE: Duration = Duration::from_millis(33);

/// Construction options for a [`Plot`](crate::plot::Plot).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Colors and font sizes.
    pub theme: Theme,
    /// Draw grid tick labels.
    pub labels: bool,
    /// Size, recenter, and draw as soon as the plot is created.
    pub init_render: bool,
    /// Draw the function list on every redraw.
    pub render_functions: bool,
    /// Initial pixels per model unit on X.
    pub scale_x: f64,
    /// Initial pixels per model unit on Y.
    pub scale_y: f64,
    /// Initial pixel offset on X.
    pub offset_x: f64,
    /// Initial pixel offset on Y.
    pub offset_y: f64,
    /// Debounce window for resize-triggered redraws.
    pub redraw_rate: Duration,
    /// Accept pan gestures.
    pub gestures: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            labels: true,
            init_render: true,
            render_functions: true,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            redraw_rate: DEFAULT_REDRAW_RATE,
            gestures: false,
        }
    }
}

impl PlotOptions {
    /// Read options from a JSON value.
    pub fn from_json(value: &Value) -> Self {
        let mut options = Self::default();
        let Some(map) = value.as_object() else {
            log::debug!("plot options are not an object, using defaults");
            return options;
        };

        if let Some(colors) = map.get("color").and_then(Value::as_object) {
            apply_colors(&mut options.theme, colors);
        }

        if let Some(labels) = read_bool(map, "labels") {
            options.labels = labels;
        }
        if let Some(init_render) = read_bool(map, "initRender") {
            options.init_render = init_render;
        }
        if let Some(render_functions) = read_bool(map, "renderFunctions") {
            options.render_functions = render_functions;
        }
        if let Some(gestures) = read_bool(map, "gestures") {
            options.gestures = gestures;
        }
        if let Some(scale) = read_positive(map, "scaleX") {
            options.scale_x = scale;
        }
        if let Some(scale) = read_positive(map, "scaleY") {
            options.scale_y = scale;
        }
        if let Some(offset) = read_number(map, "offsetX") {
            options.offset_x = offset;
        }
        if let Some(offset) = read_number(map, "offsetY") {
            options.offset_y = offset;
        }
        if let Some(size) = read_positive(map, "labelSize") {
            options.theme.label_size = size as f32;
        }
        if let Some(size) = read_positive(map, "axisLabelSize") {
            options.theme.axis_label_size = size as f32;
        }
        if let Some(rate) = read_number(map, "redrawRate").filter(|rate| *rate >= 0.0) {
            match Duration::try_from_secs_f64(rate / 1000.0) {
                Ok(rate) => options.redraw_rate = rate,
                Err(err) => log::debug!("option redrawRate: {err}, using default"),
            }
        }

        options
    }

    /// Export the options using the same key names [`from_json`](Self::from_json) reads.
    pub fn to_json(&self) -> Value {
        let theme = &self.theme;
        json!({
            "color": {
                "grid": theme.grid,
                "axis": theme.axis,
                "axisLabelX": theme.axis_label_x,
                "axisLabelY": theme.axis_label_y,
                "labelX": theme.label_x,
                "labelY": theme.label_y,
            },
            "labels": self.labels,
            "initRender": self.init_render,
            "renderFunctions": self.render_functions,
            "scaleX": self.scale_x,
            "scaleY": self.scale_y,
            "offsetX": self.offset_x,
            "offsetY": self.offset_y,
            "labelSize": theme.label_size,
            "axisLabelSize": theme.axis_label_size,
            "redrawRate": self.redraw_rate.as_secs_f64() * 1000.0,
            "gestures": self.gestures,
        })
    }
}

fn apply_colors(theme: &mut Theme, colors: &Map<String, Value>) {
    if let Some(color) = read_color(colors, "grid") {
        theme.grid = color;
    }
    if let Some(color) = read_color(colors, "axis") {
        theme.axis = color;
    }
    let shared = read_color(colors, "axisLabel");
    if let Some(color) = read_color(colors, "axisLabelX").or(shared) {
        theme.axis_label_x = color;
    }
    if let Some(color) = read_color(colors, "axisLabelY").or(shared) {
        theme.axis_label_y = color;
    }
    if let Some(color) = read_color(colors, "labelX") {
        theme.label_x = color;
    }
    if let Some(color) = read_color(colors, "labelY") {
        theme.label_y = color;
    }
}

fn read_bool(map: &Map<String, Value>, key: &str) -> Option<bool> {
    let value = map.get(key)?;
    let parsed = value.as_bool();
    if parsed.is_none() {
        log::debug!("ignoring option `{key}`: expected a boolean, got {value}");
    }
    parsed
}

fn read_number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = map.get(key)?;
    let parsed = value.as_f64().filter(|v| v.is_finite());
    if parsed.is_none() {
        log::debug!("ignoring option `{key}`: expected a number, got {value}");
    }
    parsed
}

fn read_positive(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let parsed = read_number(map, key)?;
    if parsed > 0.0 {
        Some(parsed)
    } else {
        log::debug!("ignoring option `{key}`: {parsed} is not positive");
        None
    }
}

fn read_color(map: &Map<String, Value>, key: &str) -> Option<Color> {
    let value = map.get(key)?;
    let Some(text) = value.as_str() else {
        log::debug!("ignoring color `{key}`: expected a string, got {value}");
        return None;
    };
    match text.parse() {
        Ok(color) => Some(color),
        Err(err) => {
            log::debug!("ignoring color `{key}`: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_object_uses_defaults() {
        assert_eq!(PlotOptions::from_json(&json!(42)), PlotOptions::default());
        assert_eq!(PlotOptions::from_json(&Value::Null), PlotOptions::default());
    }

    #[test]
    fn reads_known_keys() {
        let options = PlotOptions::from_json(&json!({
            "labels": false,
            "initRender": false,
            "scaleX": 2.5,
            "offsetY": -12,
            "labelSize": 14,
            "redrawRate": 100,
            "gestures": true,
            "color": { "grid": "#123456", "axisLabel": "#f00", "labelY": "#0f0" }
        }));
        assert!(!options.labels);
        assert!(!options.init_render);
        assert!(options.render_functions);
        assert_eq!(options.scale_x, 2.5);
        assert_eq!(options.scale_y, 1.0);
        assert_eq!(options.offset_y, -12.0);
        assert_eq!(options.theme.label_size, 14.0);
        assert_eq!(options.redraw_rate, Duration::from_millis(100));
        assert!(options.gestures);
        assert_eq!(options.theme.grid, Color::from_rgb8(0x12, 0x34, 0x56));
        assert_eq!(options.theme.axis_label_x, Color::from_rgb8(0xff, 0, 0));
        assert_eq!(options.theme.axis_label_y, Color::from_rgb8(0xff, 0, 0));
        assert_eq!(options.theme.label_y, Color::from_rgb8(0, 0xff, 0));
    }

    #[test]
    fn split_axis_label_colors_win_over_shared() {
        let options = PlotOptions::from_json(&json!({
            "color": { "axisLabel": "#f00", "axisLabelY": "#00f" }
        }));
        assert_eq!(options.theme.axis_label_x, Color::from_rgb8(0xff, 0, 0));
        assert_eq!(options.theme.axis_label_y, Color::from_rgb8(0, 0, 0xff));
    }

    #[test]
    fn invalid_values_fall_back() {
        let options = PlotOptions::from_json(&json!({
            "labels": "yes",
            "scaleX": 0,
            "scaleY": -3,
            "offsetX": "10",
            "redrawRate": -5,
            "labelSize": null,
            "color": { "grid": "blue", "axis": 7 }
        }));
        assert_eq!(options, PlotOptions::default());
    }

    #[test]
    fn unrepresentable_redraw_rate_falls_back() {
        for rate in [1e30, f64::MAX] {
            let options = PlotOptions::from_json(&json!({ "redrawRate": rate }));
            assert_eq!(options.redraw_rate, PlotOptions::default().redraw_rate);
        }
        let options = PlotOptions::from_json(&json!({ "redrawRate": 1.5e22 }));
        assert!(options.redraw_rate > Duration::from_secs(1_000_000));
    }

    #[test]
    fn exported_options_read_back() {
        let mut options = PlotOptions::default();
        options.scale_y = 4.0;
        options.labels = false;
        options.theme.axis = Color::from_rgb8(0x80, 0, 0);
        assert_eq!(PlotOptions::from_json(&options.to_json()), options);
    }
}
