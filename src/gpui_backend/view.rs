use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent,
    Window, canvas, div, px,
};

use crate::geom::ScreenPoint;
use crate::interaction::zoom_factor_from_scroll;
use crate::plot::Plot;

use super::config::PlotViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::{DragState, PlotUiState};

/// A GPUI view that hosts a [`Plot`].
///
/// The canvas bounds act as the plot's host container. Left-button drags pan
/// and the scroll wheel zooms around the cursor, both only while the plot has
/// gestures enabled.
#[derive(Clone)]
pub struct GpuiPlotView {
    plot: Arc<RwLock<Plot>>,
    state: Arc<RwLock<PlotUiState>>,
    config: PlotViewConfig,
}

impl GpuiPlotView {
    /// Host `plot` with the default [`PlotViewConfig`].
    pub fn new(plot: Plot) -> Self {
        Self::with_config(plot, PlotViewConfig::default())
    }

    /// Host `plot` with explicit view settings.
    pub fn with_config(plot: Plot, config: PlotViewConfig) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            state: Arc::new(RwLock::new(PlotUiState::default())),
            config,
        }
    }

    /// Shared handle to the hosted plot.
    ///
    /// Changes made through it show up on the next frame; call
    /// `cx.notify()` on the view entity to request one.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("plot state lock");
        let pos = state.to_local(screen_point(ev.position));
        state.drag = Some(DragState::new(pos));
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("plot state lock");
        let pos = state.to_local(screen_point(ev.position));
        let Some(mut drag) = state.drag else {
            return;
        };
        if !ev.dragging() {
            state.clear_interaction();
            return;
        }

        let mut plot = self.plot.write().expect("plot lock");
        if !plot.gestures_enabled() {
            return;
        }
        let delta_x = pos.x - drag.start.x;
        let delta_y = pos.y - drag.start.y;
        if !drag.active {
            let threshold = self.config.drag_threshold_px;
            if delta_x * delta_x + delta_y * delta_y <= threshold * threshold {
                return;
            }
            drag.active = true;
            plot.pan_start();
        }
        plot.pan_move(delta_x, delta_y);
        state.drag = Some(drag);
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("plot state lock");
        if state.drag.take().is_some_and(|drag| drag.active) {
            self.plot.write().expect("plot lock").pan_end();
        }
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &Window, cx: &mut Context<Self>) {
        if !self.config.scroll_zoom {
            return;
        }
        let state = self.state.read().expect("plot state lock");
        let pos = state.to_local(screen_point(ev.position));
        let delta = ev.delta.pixel_delta(px(16.0));
        let scroll = f64::from(f32::from(delta.y));
        if scroll.abs() < 0.01 {
            return;
        }

        let mut plot = self.plot.write().expect("plot lock");
        if !plot.gestures_enabled() {
            return;
        }
        if plot.zoom_at(zoom_factor_from_scroll(scroll), pos) {
            plot.redraw(true);
            cx.notify();
        }
    }
}

impl Render for GpuiPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let state = Arc::clone(&self.state);
        let background = plot.read().expect("plot lock").theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut plot = plot.write().expect("plot lock");
                        let mut state = state.write().expect("plot state lock");
                        build_frame(&mut plot, &mut state, bounds, window)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, window, cx| {
                this.on_scroll(ev, window, cx);
            }))
    }
}

/// Shared access to the [`Plot`] hosted by a [`GpuiPlotView`].
#[derive(Clone)]
pub struct PlotHandle {
    plot: Arc<RwLock<Plot>>,
}

impl PlotHandle {
    /// Run `f` with the plot locked for reading.
    pub fn read<R>(&self, f: impl FnOnce(&Plot) -> R) -> R {
        let plot = self.plot.read().expect("plot lock");
        f(&plot)
    }

    /// Run `f` with the plot locked for writing.
    pub fn write<R>(&self, f: impl FnOnce(&mut Plot) -> R) -> R {
        let mut plot = self.plot.write().expect("plot lock");
        f(&mut plot)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}
