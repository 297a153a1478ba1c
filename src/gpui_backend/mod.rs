//! GPUI integration for gpui_fnplot.
//!
//! This module provides a GPUI view that hosts a [`Plot`](crate::plot::Plot),
//! feeds it layout size and pointer input, and paints its recorded commands.

mod config;
mod frame;
mod paint;
mod state;
mod view;

pub use config::PlotViewConfig;
pub use view::{GpuiPlotView, PlotHandle};
