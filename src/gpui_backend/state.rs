use crate::geom::{ScreenPoint, SurfaceSize};

#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub(crate) start: ScreenPoint,
    pub(crate) active: bool,
}

impl DragState {
    pub(crate) fn new(start: ScreenPoint) -> Self {
        Self {
            start,
            active: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PlotUiState {
    /// Window position of the canvas top-left corner.
    pub(crate) origin: ScreenPoint,
    /// Canvas size seen in the last frame; `None` before first layout.
    pub(crate) laid_out: Option<SurfaceSize>,
    pub(crate) drag: Option<DragState>,
}

impl PlotUiState {
    /// Convert a window position into canvas pixels.
    pub(crate) fn to_local(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(point.x - self.origin.x, point.y - self.origin.y)
    }

    pub(crate) fn clear_interaction(&mut self) {
        self.drag = None;
    }
}
