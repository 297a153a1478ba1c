use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, FontWeight, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineSegment, LineStyle, RenderCommand, TextBaseline, TextStyle};

use super::frame::PlotFrame;

pub(crate) fn paint_frame(frame: &PlotFrame, window: &mut Window, cx: &mut App) {
    for command in frame.render.commands() {
        match command {
            RenderCommand::Clear(rect) => {
                paint_clear(window, frame.origin, *rect, frame.background);
            }
            RenderCommand::Stroke { segments, style } => {
                paint_lines(window, frame.origin, segments, *style);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                paint_text(window, cx, frame.origin, *position, text, style);
            }
        }
    }
}

fn paint_clear(window: &mut Window, origin: ScreenPoint, rect: ScreenRect, background: Color) {
    let bounds = Bounds::from_corners(
        to_pixels(origin, rect.min),
        to_pixels(origin, rect.max),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(0.0)),
        to_rgba(background),
        Edges::all(px(0.0)),
        to_rgba(background),
        BorderStyle::default(),
    ));
}

fn paint_lines(
    window: &mut Window,
    origin: ScreenPoint,
    segments: &[LineSegment],
    style: LineStyle,
) {
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    let mut drawn = false;
    for segment in segments {
        if !segment.start.is_finite() || !segment.end.is_finite() {
            continue;
        }
        builder.move_to(to_pixels(origin, segment.start));
        builder.line_to(to_pixels(origin, segment.end));
        drawn = true;
    }
    if !drawn {
        return;
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: ScreenPoint,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() || !position.is_finite() {
        return;
    }
    let base = font(".SystemUIFont");
    let run = TextRun {
        len: text.len(),
        font: if style.font.bold {
            gpui::Font {
                weight: FontWeight::BOLD,
                ..base
            }
        } else {
            base
        },
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window.text_system().shape_line(
        text.to_string().into(),
        px(style.font.size),
        &[run],
        None,
    );
    let ascent = f64::from(f32::from(shaped.ascent));
    let line_height = shaped.ascent + shaped.descent;
    let top = match style.baseline {
        TextBaseline::Alphabetic => position.y - ascent,
        TextBaseline::Middle => position.y - f64::from(f32::from(line_height)) / 2.0,
    };
    let _ = shaped.paint(
        to_pixels(origin, ScreenPoint::new(position.x, top)),
        line_height,
        window,
        cx,
    );
}

fn to_pixels(origin: ScreenPoint, local: ScreenPoint) -> gpui::Point<Pixels> {
    point(
        px((origin.x + local.x) as f32),
        px((origin.y + local.y) as f32),
    )
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
