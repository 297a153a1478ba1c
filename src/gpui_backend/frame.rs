use std::time::Instant;

use gpui::{Bounds, Pixels, Window};

use crate::geom::{ScreenPoint, SurfaceSize};
use crate::plot::Plot;
use crate::render::{Color, RenderList};

use super::state::PlotUiState;

#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
    pub(crate) origin: ScreenPoint,
    pub(crate) background: Color,
}

/// Sync the plot with the canvas layout and snapshot its render list.
///
/// The first layout sizes the surface immediately. Later size changes go
/// through the plot's resize debounce, so the previous frame stays on
/// screen until the burst settles.
pub(crate) fn build_frame(
    plot: &mut Plot,
    state: &mut PlotUiState,
    bounds: Bounds<Pixels>,
    window: &mut Window,
) -> PlotFrame {
    let width = f32::from(bounds.size.width).max(0.0).round() as u32;
    let height = f32::from(bounds.size.height).max(0.0).round() as u32;
    let size = SurfaceSize::new(width, height);
    state.origin = ScreenPoint::new(
        f64::from(f32::from(bounds.origin.x)),
        f64::from(f32::from(bounds.origin.y)),
    );

    let now = Instant::now();
    match state.laid_out {
        None => plot.attach(&size),
        Some(previous) if previous != size => plot.notify_resize(now),
        Some(_) => {}
    }
    state.laid_out = Some(size);

    plot.poll(&size, now);
    plot.animation_frame(now);
    if plot.resize_pending() || plot.is_animating() {
        window.request_animation_frame();
    }

    PlotFrame {
        render: plot.surface().clone(),
        origin: state.origin,
        background: plot.theme().background,
    }
}
