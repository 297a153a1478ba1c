/// Configuration for the GPUI plot view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Pixel threshold for starting a pan drag.
    pub drag_threshold_px: f64,
    /// Zoom around the cursor on scroll when gestures are enabled.
    pub scroll_zoom: bool,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 2.0,
            scroll_zoom: true,
        }
    }
}
