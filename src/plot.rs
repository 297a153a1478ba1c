//! Plot surface entry points and builders.

use std::time::{Duration, Instant};

use crate::animation::{Animation, AnimationId, CompletionCallback, DEFAULT_DURATION, PartialPoint};
use crate::config::PlotOptions;
use crate::function::{PlottableFunction, draw_function};
use crate::geom::{HostContainer, Point, ScreenPoint, SurfaceSize};
use crate::grid::{draw_grid, draw_intercepts};
use crate::interaction::{PanGesture, ResizeDebounce};
use crate::render::{DrawingSurface, RenderList};
use crate::style::Theme;
use crate::transform::ViewTransform;
use crate::view::Viewport;

/// A function plot drawn onto a [`DrawingSurface`].
///
/// The plot owns its surface, view transform, and function list. Every
/// operation is total: invalid input is logged and ignored, never returned
/// as an error.
#[derive(Debug)]
pub struct Plot<S = RenderList> {
    surface: S,
    options: PlotOptions,
    transform: ViewTransform,
    functions: Vec<PlottableFunction>,
    pan: PanGesture,
    resize: ResizeDebounce,
    animation: Option<Animation>,
    gestures: bool,
}

impl Plot<RenderList> {
    /// Start building a plot that records into a [`RenderList`].
    pub fn builder() -> PlotBuilder<RenderList> {
        PlotBuilder::new(RenderList::new())
    }
}

impl Default for Plot<RenderList> {
    fn default() -> Self {
        Self::new(RenderList::new(), PlotOptions::default())
    }
}

impl<S: DrawingSurface> Plot<S> {
    /// Create a plot on a surface.
    ///
    /// With `init_render` set, the view is centered on the model origin and
    /// drawn immediately.
    pub fn new(surface: S, options: PlotOptions) -> Self {
        Self::assemble(surface, options, Vec::new())
    }

    fn assemble(surface: S, options: PlotOptions, functions: Vec<PlottableFunction>) -> Self {
        let transform = ViewTransform::with_scale(options.scale_x, options.scale_y)
            .unwrap_or_else(|err| {
                log::warn!("{err}; using unit scale");
                ViewTransform::default()
            })
            .with_offset(options.offset_x, options.offset_y);
        let mut plot = Self {
            surface,
            transform,
            functions,
            pan: PanGesture::new(),
            resize: ResizeDebounce::new(options.redraw_rate),
            animation: None,
            gestures: options.gestures,
            options,
        };
        plot.initial_render();
        plot
    }

    fn initial_render(&mut self) {
        if self.options.init_render {
            self.go_to_origin();
            self.redraw(false);
        }
    }

    /// Access the options the plot was created with.
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Access the theme.
    pub fn theme(&self) -> &Theme {
        &self.options.theme
    }

    /// Replace the theme. Takes effect on the next redraw.
    pub fn set_theme(&mut self, theme: Theme) {
        self.options.theme = theme;
    }

    /// Toggle grid tick labels. Takes effect on the next redraw.
    pub fn set_labels(&mut self, labels: bool) {
        self.options.labels = labels;
    }

    /// Toggle function rendering. Takes effect on the next redraw.
    pub fn set_render_functions(&mut self, render_functions: bool) {
        self.options.render_functions = render_functions;
    }

    /// Access the view transform.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Access the drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Access the drawing surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current surface size.
    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    /// Access the stored functions.
    pub fn functions(&self) -> &[PlottableFunction] {
        &self.functions
    }

    /// Replace the stored functions.
    pub fn set_functions(&mut self, functions: Vec<PlottableFunction>) {
        self.functions = functions;
    }

    /// Append a function.
    pub fn add_function(&mut self, function: impl Into<PlottableFunction>) {
        self.functions.push(function.into());
    }

    /// Remove all stored functions.
    pub fn clear_functions(&mut self) {
        self.functions.clear();
    }

    /// Redraw grid, intercepts, and (when enabled) functions.
    pub fn redraw(&mut self, clear: bool) {
        let size = self.surface.size();
        log::trace!("redraw {}x{} clear={clear}", size.width, size.height);
        if clear {
            self.surface.clear_rect(size.rect());
        }
        draw_grid(
            &mut self.surface,
            &self.transform,
            &self.options.theme,
            self.options.labels,
        );
        draw_intercepts(&mut self.surface, &self.transform, &self.options.theme);
        if self.options.render_functions {
            self.draw_functions(None);
        }
    }

    /// Draw `custom` when it is non-empty, otherwise the stored functions.
    ///
    /// Functions are drawn last to first, so the first one ends up on top.
    pub fn draw_functions(&mut self, custom: Option<&[PlottableFunction]>) {
        let list = match custom {
            Some(custom) if !custom.is_empty() => custom,
            _ => self.functions.as_slice(),
        };
        for entry in list.iter().rev() {
            draw_function(
                &mut self.surface,
                entry.function().as_ref(),
                &entry.args(),
                &self.transform,
            );
        }
    }

    /// Set both offsets. `None` or non-finite values leave an axis unchanged.
    pub fn set_position(&mut self, x: Option<f64>, y: Option<f64>) {
        self.set_position_x(x);
        self.set_position_y(y);
    }

    /// Set the X offset.
    pub fn set_position_x(&mut self, x: Option<f64>) {
        match x {
            Some(x) if x.is_finite() => self.transform.set_offset_x(x),
            Some(x) => log::debug!("ignoring non-finite x position {x}"),
            None => {}
        }
    }

    /// Set the Y offset.
    pub fn set_position_y(&mut self, y: Option<f64>) {
        match y {
            Some(y) if y.is_finite() => self.transform.set_offset_y(y),
            Some(y) => log::debug!("ignoring non-finite y position {y}"),
            None => {}
        }
    }

    /// Center the view on the model origin.
    pub fn go_to_origin(&mut self) {
        let size = self.surface.size();
        self.transform.recenter_to_origin(size);
    }

    /// Set both scales. Returns false, changing nothing, if either is invalid.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) -> bool {
        match self.transform.set_scale(scale_x, scale_y) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Zoom both axes around a surface point.
    ///
    /// Returns false, changing nothing, if the result would be invalid.
    pub fn zoom_at(&mut self, factor: f64, anchor: ScreenPoint) -> bool {
        match self.transform.zoom_at(factor, factor, anchor) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("zoom by {factor} rejected: {err}");
                false
            }
        }
    }

    /// Offsets that put `point` at the center of the surface.
    pub fn offset_centering(&self, point: Point) -> (f64, f64) {
        let size = self.surface.size();
        (
            point.x * self.transform.scale_x() - size.width_f64() / 2.0,
            -point.y * self.transform.scale_y() - size.height_f64() / 2.0,
        )
    }

    /// Model point at the center of the surface.
    pub fn center_model(&self) -> Point {
        let size = self.surface.size();
        self.model_at(ScreenPoint::new(
            size.width_f64() / 2.0,
            size.height_f64() / 2.0,
        ))
    }

    /// Model point under a surface pixel.
    pub fn model_at(&self, pixel: ScreenPoint) -> Point {
        self.transform.pixel_to_model(pixel)
    }

    /// Model area currently visible.
    pub fn visible_viewport(&self) -> Viewport {
        self.transform.visible_viewport(self.surface.size())
    }

    /// Resize the surface to fill the host.
    pub fn adjust_size(&mut self, host: &impl HostContainer) {
        let size = host.client_size();
        log::debug!("adjusting surface to {}x{}", size.width, size.height);
        self.surface.set_size(size);
    }

    /// Fill a host laid out for the first time. Draws only with `init_render` set.
    pub fn attach(&mut self, host: &impl HostContainer) {
        self.adjust_size(host);
        self.initial_render();
    }

    /// Record a resize event. The redraw happens in [`poll`](Self::poll)
    /// once the debounce window has passed without further events.
    pub fn notify_resize(&mut self, now: Instant) {
        self.resize.schedule(now);
    }

    /// Run a due resize: fill the host and redraw. Returns whether it ran.
    pub fn poll(&mut self, host: &impl HostContainer, now: Instant) -> bool {
        if !self.resize.poll(now) {
            return false;
        }
        self.adjust_size(host);
        self.redraw(false);
        true
    }

    /// Check whether a resize redraw is waiting.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Time until a pending resize redraw is due.
    pub fn resize_remaining(&self, now: Instant) -> Option<Duration> {
        self.resize.remaining(now)
    }

    /// Accept pan gestures from now on.
    pub fn enable_gestures(&mut self) {
        self.gestures = true;
    }

    /// Check whether pan gestures are accepted.
    pub fn gestures_enabled(&self) -> bool {
        self.gestures
    }

    /// Begin a pan gesture at the current offsets.
    ///
    /// Cancels any running animation.
    pub fn pan_start(&mut self) {
        if !self.gestures {
            log::warn!("pan gestures are disabled; ignoring pan start");
            return;
        }
        self.cancel_animation();
        self.pan.start(&self.transform);
    }

    /// Move the view by a cumulative pointer delta since [`pan_start`](Self::pan_start)
    /// and redraw.
    pub fn pan_move(&mut self, delta_x: f64, delta_y: f64) {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            log::debug!("ignoring non-finite pan delta ({delta_x}, {delta_y})");
            return;
        }
        if self.pan.update(&mut self.transform, delta_x, delta_y) {
            self.redraw(true);
        }
    }

    /// Finish the pan gesture.
    pub fn pan_end(&mut self) {
        self.pan.end();
    }

    /// Check whether a pan gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan.is_active()
    }

    /// Animate the view by a model-space delta.
    ///
    /// Supersedes any running animation. Zero or missing components are not
    /// animated; if nothing is left to animate, `on_complete` runs at once
    /// and no animation starts.
    pub fn animate(
        &mut self,
        delta: PartialPoint,
        on_complete: Option<CompletionCallback>,
        duration: Option<Duration>,
    ) -> Option<AnimationId> {
        let delta = delta.non_zero();
        if delta.is_empty() {
            log::debug!("nothing to animate");
            if let Some(callback) = on_complete {
                callback();
            }
            return None;
        }
        self.cancel_animation();

        let from = (self.transform.offset_x(), self.transform.offset_y());
        let to = PartialPoint {
            x: delta.x.map(|dx| from.0 + dx * self.transform.scale_x()),
            y: delta.y.map(|dy| from.1 - dy * self.transform.scale_y()),
        };
        let duration = duration.unwrap_or(DEFAULT_DURATION);
        let animation = Animation::new(from, to, duration, on_complete);
        let id = animation.id();
        log::debug!("starting animation {id:?} over {duration:?}");
        self.animation = Some(animation);
        Some(id)
    }

    /// Animate the view so `target` ends up at the surface center.
    pub fn animate_to_coordinate(
        &mut self,
        target: PartialPoint,
        on_complete: Option<CompletionCallback>,
        duration: Option<Duration>,
    ) -> Option<AnimationId> {
        let center = self.center_model();
        let delta = PartialPoint {
            x: target.x.map(|x| x - center.x),
            y: target.y.map(|y| y - center.y),
        };
        self.animate(delta, on_complete, duration)
    }

    /// Animate the view back to the model origin.
    pub fn animate_to_origin(
        &mut self,
        on_complete: Option<CompletionCallback>,
        duration: Option<Duration>,
    ) -> Option<AnimationId> {
        self.animate_to_coordinate(PartialPoint::new(0.0, 0.0), on_complete, duration)
    }

    /// Advance the running animation and redraw.
    ///
    /// Returns true while more frames are needed.
    pub fn animation_frame(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let frame = animation.frame(now);
        self.set_position(frame.offsets.x, frame.offsets.y);

        let callback = if frame.finished {
            let finished = self.animation.take();
            if let Some(animation) = &finished {
                log::debug!("animation {:?} finished", animation.id());
            }
            finished.and_then(|mut animation| animation.take_callback())
        } else {
            None
        };

        self.redraw(true);
        if let Some(callback) = callback {
            callback();
        }
        !frame.finished
    }

    /// Stop the running animation without running its callback.
    pub fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            log::debug!("animation {:?} cancelled", animation.id());
        }
    }

    /// Check whether an animation is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Id of the running animation.
    pub fn animation_id(&self) -> Option<AnimationId> {
        self.animation.as_ref().map(Animation::id)
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug)]
pub struct PlotBuilder<S> {
    surface: S,
    options: PlotOptions,
    functions: Vec<PlottableFunction>,
}

impl<S: DrawingSurface> PlotBuilder<S> {
    /// Start a builder for the given surface.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            options: PlotOptions::default(),
            functions: Vec::new(),
        }
    }

    /// Size the surface before the first render.
    pub fn size(mut self, size: SurfaceSize) -> Self {
        self.surface.set_size(size);
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.options.theme = theme;
        self
    }

    /// Set the initial scales.
    pub fn scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.options.scale_x = scale_x;
        self.options.scale_y = scale_y;
        self
    }

    /// Toggle grid tick labels.
    pub fn labels(mut self, labels: bool) -> Self {
        self.options.labels = labels;
        self
    }

    /// Toggle drawing on construction.
    pub fn init_render(mut self, init_render: bool) -> Self {
        self.options.init_render = init_render;
        self
    }

    /// Toggle pan gestures.
    pub fn gestures(mut self, gestures: bool) -> Self {
        self.options.gestures = gestures;
        self
    }

    /// Set the resize debounce window.
    pub fn redraw_rate(mut self, redraw_rate: Duration) -> Self {
        self.options.redraw_rate = redraw_rate;
        self
    }

    /// Add a function.
    pub fn function(mut self, function: impl Into<PlottableFunction>) -> Self {
        self.functions.push(function.into());
        self
    }

    /// Build the plot.
    pub fn build(self) -> Plot<S> {
        Plot::assemble(self.surface, self.options, self.functions)
    }
}
