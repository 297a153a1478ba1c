//! Plotted functions and the per-pixel sampler that draws them.

use std::sync::Arc;

use crate::geom::{ScreenPoint, SurfaceSize};
use crate::render::{Color, DrawingSurface};
use crate::transform::ViewTransform;
use crate::view::Domain;

/// Shared real-valued function.
pub type RealFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A function stored on a plot.
#[derive(Clone)]
pub enum PlottableFunction {
    /// Plain function sampled across the visible range.
    Callable(RealFn),
    /// Function with a sampling domain and stroke color.
    Styled {
        /// Function to sample.
        function: RealFn,
        /// Model-X bounds for sampling.
        domain: Domain,
        /// Stroke color, black when unset.
        color: Option<Color>,
    },
}

impl PlottableFunction {
    /// Wrap a plain function.
    pub fn new(function: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Callable(Arc::new(function))
    }

    /// Wrap a function with a domain and optional color.
    pub fn styled(
        function: impl Fn(f64) -> f64 + Send + Sync + 'static,
        domain: Domain,
        color: Option<Color>,
    ) -> Self {
        Self::Styled {
            function: Arc::new(function),
            domain,
            color,
        }
    }

    /// Restrict sampling to a domain, keeping any color.
    pub fn with_domain(self, domain: Domain) -> Self {
        match self {
            Self::Callable(function) => Self::Styled {
                function,
                domain,
                color: None,
            },
            Self::Styled {
                function, color, ..
            } => Self::Styled {
                function,
                domain,
                color,
            },
        }
    }

    /// Set the stroke color, keeping any domain.
    pub fn with_color(self, color: Color) -> Self {
        match self {
            Self::Callable(function) => Self::Styled {
                function,
                domain: Domain::UNBOUNDED,
                color: Some(color),
            },
            Self::Styled {
                function, domain, ..
            } => Self::Styled {
                function,
                domain,
                color: Some(color),
            },
        }
    }

    /// The underlying function.
    pub fn function(&self) -> &RealFn {
        match self {
            Self::Callable(function) | Self::Styled { function, .. } => function,
        }
    }

    /// Sampling arguments for this entry.
    pub fn args(&self) -> FunctionArgs {
        match self {
            Self::Callable(_) => FunctionArgs::default(),
            Self::Styled { domain, color, .. } => FunctionArgs {
                width: None,
                domain: *domain,
                color: *color,
            },
        }
    }
}

impl std::fmt::Debug for PlottableFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Callable(_) => write!(f, "PlottableFunction::Callable(..)"),
            Self::Styled { domain, color, .. } => f
                .debug_struct("PlottableFunction::Styled")
                .field("domain", domain)
                .field("color", color)
                .finish_non_exhaustive(),
        }
    }
}

impl<F> From<F> for PlottableFunction
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    fn from(function: F) -> Self {
        Self::new(function)
    }
}

/// Per-call sampling options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FunctionArgs {
    /// Rightmost pixel to sample. Capped at the surface width; non-finite or
    /// non-positive values are ignored.
    pub width: Option<f64>,
    /// Model-X bounds.
    pub domain: Domain,
    /// Stroke color.
    pub color: Option<Color>,
}

/// Sample `function` once per pixel column.
///
/// Sampling starts at the pixel of the domain minimum (or the left edge) and
/// walks right until the surface width, stopping before any model X beyond
/// the domain maximum. Non-finite results are kept as-is.
pub fn sample_function(
    function: &dyn Fn(f64) -> f64,
    args: &FunctionArgs,
    transform: &ViewTransform,
    size: SurfaceSize,
) -> Vec<ScreenPoint> {
    let surface_width = size.width_f64();
    let width = args
        .width
        .filter(|width| width.is_finite() && *width > 0.0)
        .map_or(surface_width, |width| width.min(surface_width));
    let min = args
        .domain
        .min
        .unwrap_or_else(|| transform.to_model_x(0.0));
    let max = args
        .domain
        .max
        .unwrap_or_else(|| transform.to_model_x(width));
    let start = transform.to_pixel_x(min);

    let in_view = start <= width && min < max;
    if !in_view {
        return Vec::new();
    }

    let first = start.max(0.0);
    let columns = (width - first).ceil().max(0.0) as usize;
    let mut samples = Vec::with_capacity(columns);
    for column in 0..columns {
        let view_x = first + column as f64;
        let x = transform.to_model_x(view_x).max(min);
        if x > max {
            break;
        }
        samples.push(ScreenPoint::new(view_x, transform.to_pixel_y(function(x))));
    }
    samples
}

/// Draw one function as a polyline.
pub fn draw_function<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    function: &dyn Fn(f64) -> f64,
    args: &FunctionArgs,
    transform: &ViewTransform,
) {
    let samples = sample_function(function, args, transform, surface.size());
    if samples.len() < 2 {
        return;
    }

    surface.set_stroke_color(args.color.unwrap_or(Color::BLACK));
    surface.set_line_width(1.0);
    surface.begin_path();
    for pair in samples.windows(2) {
        surface.move_to(pair[0].x, pair[0].y);
        surface.line_to(pair[1].x, pair[1].y);
    }
    surface.close_path();
    surface.stroke();
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::render::RenderList;

    fn centered() -> (ViewTransform, SurfaceSize) {
        let size = SurfaceSize::new(800, 600);
        let mut transform = ViewTransform::default();
        transform.recenter_to_origin(size);
        (transform, size)
    }

    #[test]
    fn samples_every_visible_column() {
        let (transform, size) = centered();
        let samples = sample_function(&|x| x, &FunctionArgs::default(), &transform, size);
        assert_eq!(samples.len(), 800);
        assert_eq!(samples[0], ScreenPoint::new(0.0, 700.0));
        assert_eq!(samples[400], ScreenPoint::new(400.0, 300.0));
    }

    #[test]
    fn never_evaluates_past_domain_max() {
        let (transform, size) = centered();
        let seen = Mutex::new(Vec::new());
        let record = |x: f64| {
            seen.lock().unwrap().push(x);
            x.sin()
        };
        let args = FunctionArgs {
            domain: Domain::new(-2.5, 3.25),
            ..FunctionArgs::default()
        };
        let samples = sample_function(&record, &args, &transform, size);
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), samples.len());
        assert!(seen.iter().all(|x| *x >= -2.5 && *x <= 3.25));
        assert_eq!(seen[0], -2.5);
    }

    #[test]
    fn empty_or_offscreen_domain_is_noop() {
        let (transform, size) = centered();
        let calls = Mutex::new(0);
        let counted = |x: f64| {
            *calls.lock().unwrap() += 1;
            x
        };
        for domain in [Domain::new(1.0, 1.0), Domain::new(5.0, -5.0), Domain::new(401.0, 900.0)] {
            let args = FunctionArgs {
                domain,
                ..FunctionArgs::default()
            };
            assert!(sample_function(&counted, &args, &transform, size).is_empty());
        }
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn width_override_limits_sampling() {
        let (transform, size) = centered();
        let args = FunctionArgs {
            width: Some(100.0),
            ..FunctionArgs::default()
        };
        let samples = sample_function(&|x| x, &args, &transform, size);
        assert_eq!(samples.len(), 100);
    }

    #[test]
    fn width_override_never_exceeds_surface() {
        let (transform, size) = centered();
        for width in [f64::INFINITY, f64::NAN, -5.0, 2f64.powi(53) + 10.0] {
            let args = FunctionArgs {
                width: Some(width),
                domain: Domain::UNBOUNDED.with_max(f64::INFINITY),
                ..FunctionArgs::default()
            };
            let samples = sample_function(&|x| x, &args, &transform, size);
            assert_eq!(samples.len(), 800, "width {width}");
            assert_eq!(samples[799].x, 799.0);
        }
    }

    #[test]
    fn parabola_has_valley_shape() {
        let (transform, size) = centered();
        let args = FunctionArgs {
            domain: Domain::new(-10.0, 10.0),
            ..FunctionArgs::default()
        };
        let samples = sample_function(&|x| x * x, &args, &transform, size);
        assert_eq!(samples.len(), 21);
        for pair in samples.windows(2) {
            let x = transform.to_model_x(pair[1].x);
            if x <= 0.0 {
                assert!(pair[1].y >= pair[0].y);
            } else {
                assert!(pair[1].y <= pair[0].y);
            }
        }
    }

    #[test]
    fn poles_do_not_panic() {
        let (transform, _) = centered();
        let mut list = RenderList::with_size(SurfaceSize::new(800, 600));
        draw_function(&mut list, &|x| 1.0 / x, &FunctionArgs::default(), &transform);
        assert_eq!(list.segments().count(), 799);
        assert!(list.segments().any(|(segment, _)| !segment.end.is_finite()));
    }

    #[test]
    fn draws_in_requested_color() {
        let (transform, _) = centered();
        let mut list = RenderList::with_size(SurfaceSize::new(800, 600));
        let color = Color::from_rgb8(0xff, 0, 0);
        let args = FunctionArgs {
            color: Some(color),
            ..FunctionArgs::default()
        };
        draw_function(&mut list, &|x| x.cos(), &args, &transform);
        assert!(list.segments().all(|(_, style)| style.color == color && style.width == 1.0));
    }

    #[test]
    fn styled_conversions_keep_fields() {
        let function = PlottableFunction::new(|x| x)
            .with_color(Color::WHITE)
            .with_domain(Domain::new(0.0, 1.0));
        let args = function.args();
        assert_eq!(args.color, Some(Color::WHITE));
        assert_eq!(args.domain, Domain::new(0.0, 1.0));
        assert_eq!((function.function())(2.0), 2.0);
    }
}
