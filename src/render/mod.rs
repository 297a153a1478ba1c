//! Drawing surface abstraction and recorded render commands.
//!
//! Plot rendering talks to a [`DrawingSurface`], a small immediate-mode 2D
//! context. [`RenderList`] implements it by recording commands that a render
//! backend (such as the GPUI backend) replays.

use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::geom::{ScreenPoint, ScreenRect, SurfaceSize};

/// Average glyph advance as a fraction of the font size.
const AVERAGE_GLYPH_ADVANCE: f64 = 0.6;

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    /// The number of hex digits is not 3, 6, or 8.
    #[error("color `{0}` must have 3, 6, or 8 hex digits")]
    BadLength(String),
    /// A character is not a hex digit.
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0) * 17;
        let (r, g, b, a) = match digits.len() {
            3 => (nibble(0), nibble(1), nibble(2), u8::MAX),
            6 => (byte(0), byte(2), byte(4), u8::MAX),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(ColorParseError::BadLength(s.to_string())),
        };
        let mut color = Self::from_rgb8(r, g, b);
        color.a = a as f32 / 255.0;
        Ok(color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Font selection for text commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl Font {
    /// A bold font of the given size.
    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 10.0,
            bold: false,
        }
    }
}

/// Vertical anchor of text relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// Position marks the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Position marks the vertical middle of the line.
    Middle,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font selection.
    pub font: Font,
    /// Vertical anchor.
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font: Font::default(),
            baseline: TextBaseline::default(),
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Immediate-mode 2D drawing context.
///
/// Mirrors the subset of a canvas context a plot needs. Style setters affect
/// every following path or text call. Paths are built with
/// [`begin_path`](Self::begin_path), [`move_to`](Self::move_to) and
/// [`line_to`](Self::line_to), then drawn with [`stroke`](Self::stroke).
pub trait DrawingSurface {
    /// Current pixel size.
    fn size(&self) -> SurfaceSize;
    /// Resize the surface. Existing content and state are discarded.
    fn set_size(&mut self, size: SurfaceSize);
    /// Erase a region.
    fn clear_rect(&mut self, rect: ScreenRect);
    /// Color used by [`stroke`](Self::stroke).
    fn set_stroke_color(&mut self, color: Color);
    /// Color used by [`fill_text`](Self::fill_text).
    fn set_fill_color(&mut self, color: Color);
    /// Stroke width in pixels.
    fn set_line_width(&mut self, width: f32);
    /// Font used by text calls.
    fn set_font(&mut self, font: Font);
    /// Vertical text anchor.
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Start a new, empty path.
    fn begin_path(&mut self);
    /// Start a new subpath at a point.
    fn move_to(&mut self, x: f64, y: f64);
    /// Add a segment from the current point.
    fn line_to(&mut self, x: f64, y: f64);
    /// Close the current subpath back to its start.
    fn close_path(&mut self);
    /// Stroke the current path.
    fn stroke(&mut self);
    /// Draw text at a position.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f64;
}

/// Recorded drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Erase a region.
    Clear(ScreenRect),
    /// Stroke line segments.
    Stroke {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Text anchor position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DrawState {
    stroke: LineStyle,
    fill: Color,
    font: Font,
    baseline: TextBaseline,
}

/// A [`DrawingSurface`] that records commands.
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    size: SurfaceSize,
    commands: Vec<RenderCommand>,
    state: DrawState,
    path: Vec<LineSegment>,
    cursor: Option<ScreenPoint>,
    subpath_start: Option<ScreenPoint>,
    subpath_segments: usize,
}

impl RenderList {
    /// Create an empty render list with no area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty render list of the given size.
    pub fn with_size(size: SurfaceSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over every stroked segment.
    pub fn segments(&self) -> impl Iterator<Item = (&LineSegment, &LineStyle)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Stroke { segments, style } => Some((segments, style)),
                _ => None,
            })
            .flat_map(|(segments, style)| segments.iter().map(move |segment| (segment, style)))
    }

    /// Iterate over every text command as `(text, position, style)`.
    pub fn texts(&self) -> impl Iterator<Item = (&str, ScreenPoint, &TextStyle)> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text {
                position,
                text,
                style,
            } => Some((text.as_str(), *position, style)),
            _ => None,
        })
    }
}

impl DrawingSurface for RenderList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        *self = Self::with_size(size);
    }

    fn clear_rect(&mut self, rect: ScreenRect) {
        if rect.contains_rect(&self.size.rect()) {
            self.commands.clear();
        } else {
            self.commands.push(RenderCommand::Clear(rect));
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke.color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.stroke.width = width;
        }
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.cursor = None;
        self.subpath_start = None;
        self.subpath_segments = 0;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = ScreenPoint::new(x, y);
        self.cursor = Some(point);
        self.subpath_start = Some(point);
        self.subpath_segments = 0;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = ScreenPoint::new(x, y);
        match self.cursor {
            Some(from) => {
                self.path.push(LineSegment::new(from, point));
                self.subpath_segments += 1;
            }
            None => self.subpath_start = Some(point),
        }
        self.cursor = Some(point);
    }

    fn close_path(&mut self) {
        // A single segment closes onto itself and covers no new pixels.
        if let (Some(from), Some(start)) = (self.cursor, self.subpath_start) {
            if from != start && self.subpath_segments > 1 {
                self.path.push(LineSegment::new(from, start));
            }
            self.cursor = Some(start);
            self.subpath_segments = 0;
        }
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Stroke {
            segments: self.path.clone(),
            style: self.state.stroke,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if text.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Text {
            position: ScreenPoint::new(x, y),
            text: text.to_string(),
            style: TextStyle {
                color: self.state.fill,
                font: self.state.font,
                baseline: self.state.baseline,
            },
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * f64::from(self.state.font.size) * AVERAGE_GLYPH_ADVANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#ddd".parse::<Color>().unwrap(), Color::from_rgb8(0xdd, 0xdd, 0xdd));
        assert_eq!("#880000".parse::<Color>().unwrap(), Color::from_rgb8(0x88, 0, 0));
        let translucent: Color = "#00000080".parse().unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!("#444".parse::<Color>().unwrap().to_hex(), "#444444");
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(matches!(
            "red".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#abcd".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#ggg".parse::<Color>(),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn stroke_records_path_with_style() {
        let mut list = RenderList::with_size(SurfaceSize::new(10, 10));
        list.set_stroke_color(Color::WHITE);
        list.set_line_width(2.0);
        list.begin_path();
        list.move_to(0.0, 0.0);
        list.line_to(5.0, 5.0);
        list.move_to(1.0, 1.0);
        list.line_to(2.0, 1.0);
        list.line_to(2.0, 2.0);
        list.close_path();
        list.stroke();

        let segments: Vec<_> = list.segments().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].1.width, 2.0);
        assert_eq!(segments[0].1.color, Color::WHITE);
        assert_eq!(
            *segments[3].0,
            LineSegment::new(ScreenPoint::new(2.0, 2.0), ScreenPoint::new(1.0, 1.0))
        );
    }

    #[test]
    fn closing_a_single_segment_adds_nothing() {
        let mut list = RenderList::with_size(SurfaceSize::new(10, 10));
        list.begin_path();
        list.move_to(0.0, 0.0);
        list.line_to(0.0, 9.0);
        list.move_to(3.0, 0.0);
        list.line_to(3.0, 9.0);
        list.close_path();
        list.stroke();
        assert_eq!(list.segments().count(), 2);
    }

    #[test]
    fn empty_path_records_nothing() {
        let mut list = RenderList::with_size(SurfaceSize::new(10, 10));
        list.begin_path();
        list.move_to(1.0, 1.0);
        list.stroke();
        list.fill_text("", 0.0, 0.0);
        assert!(list.is_empty());
    }

    #[test]
    fn full_clear_drops_commands() {
        let mut list = RenderList::with_size(SurfaceSize::new(10, 10));
        list.fill_text("a", 1.0, 1.0);
        list.clear_rect(ScreenRect::from_origin_size(0.0, 0.0, 2.0, 2.0));
        assert_eq!(list.commands().len(), 2);
        list.clear_rect(SurfaceSize::new(10, 10).rect());
        assert!(list.is_empty());
    }

    #[test]
    fn text_uses_current_state() {
        let mut list = RenderList::with_size(SurfaceSize::new(100, 100));
        list.set_font(Font::bold(18.0));
        list.set_fill_color(Color::WHITE);
        list.set_text_baseline(TextBaseline::Middle);
        list.fill_text("-x", 10.0, 20.0);
        let (text, position, style) = list.texts().next().unwrap();
        assert_eq!(text, "-x");
        assert_eq!(position, ScreenPoint::new(10.0, 20.0));
        assert!(style.font.bold);
        assert_eq!(style.baseline, TextBaseline::Middle);
        assert!((list.measure_text("-x") - 2.0 * 18.0 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn commands_serialize_with_kind_tag() {
        let mut list = RenderList::with_size(SurfaceSize::new(10, 10));
        list.set_stroke_color(Color::from_rgb8(0x88, 0x88, 0x88));
        list.begin_path();
        list.move_to(0.0, 1.0);
        list.line_to(5.0, 1.0);
        list.stroke();
        let value = serde_json::to_value(list.commands()).unwrap();
        assert_eq!(value[0]["kind"], "stroke");
        assert_eq!(value[0]["style"]["color"], "#888888");
        assert_eq!(value[0]["segments"][0]["end"]["x"], 5.0);
    }
}
