//! gpui_fnplot draws real-valued functions on a pannable, zoomable grid.
//! The plotting core is headless and renders through [`DrawingSurface`];
//! the optional `gpui` feature adds an interactive GPUI view.

#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod function;
pub mod geom;
pub mod grid;
pub mod interaction;
pub mod numeric;
pub mod plot;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use animation::{AnimationId, CompletionCallback, PartialPoint};
pub use config::PlotOptions;
pub use function::{FunctionArgs, PlottableFunction, RealFn, sample_function};
#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPlotView, PlotHandle, PlotViewConfig};
pub use geom::{HostContainer, Point, ScreenPoint, ScreenRect, SurfaceSize};
pub use grid::GridLine;
pub use plot::{Plot, PlotBuilder};
pub use render::{
    Color, DrawingSurface, Font, LineSegment, LineStyle, RenderCommand, RenderList, TextBaseline,
    TextStyle,
};
pub use style::Theme;
pub use transform::{Axis, TransformError, ViewTransform};
pub use view::{Domain, Range, Viewport};
