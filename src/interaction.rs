//! Interaction helpers for panning, resizing, and zooming.
//!
//! These helpers hold the state behind pointer and resize events so render
//! backends get consistent semantics across platforms.

use std::time::{Duration, Instant};

use crate::transform::ViewTransform;

/// Offsets captured when a pan gesture starts.
///
/// Every move is applied against this baseline, not the previous move, so a
/// long drag never accumulates rounding error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanGesture {
    baseline: Option<(f64, f64)>,
}

impl PanGesture {
    /// Create an idle gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current offsets.
    pub fn start(&mut self, transform: &ViewTransform) {
        self.baseline = Some((transform.offset_x(), transform.offset_y()));
    }

    /// Apply a cumulative pointer delta since [`start`](Self::start).
    ///
    /// Returns false, leaving the transform alone, when no gesture is active.
    pub fn update(&self, transform: &mut ViewTransform, delta_x: f64, delta_y: f64) -> bool {
        let Some((base_x, base_y)) = self.baseline else {
            return false;
        };
        transform.set_offset_x(base_x - delta_x);
        transform.set_offset_y(base_y - delta_y);
        true
    }

    /// Drop the captured baseline.
    pub fn end(&mut self) {
        self.baseline = None;
    }

    /// Check whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }
}

/// Cancel-and-reschedule timer for resize redraws.
///
/// Only the last event of a burst fires; earlier deadlines are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebounce {
    /// Create an idle debounce with the given window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Debounce window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register an event, replacing any pending deadline. A deadline past the
    /// clock's range is dropped and the previous one kept.
    pub fn schedule(&mut self, now: Instant) {
        match now.checked_add(self.delay) {
            Some(deadline) => self.deadline = Some(deadline),
            None => log::warn!("resize delay {:?} overflows the clock", self.delay),
        }
    }

    /// Fire if the pending deadline has passed. Fires at most once per burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check whether a redraw is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending deadline.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Compute a zoom factor from a scroll delta in pixels.
pub fn zoom_factor_from_scroll(delta_pixels: f64) -> f64 {
    if !delta_pixels.is_finite() {
        return 1.0;
    }
    (1.0 + delta_pixels * 0.002).clamp(0.1, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_applies_against_baseline() {
        let mut transform = ViewTransform::default().with_offset(-400.0, -300.0);
        let mut pan = PanGesture::new();
        pan.start(&transform);
        for (dx, dy) in [(3.0, 1.0), (10.5, -4.0), (7.25, 2.0)] {
            assert!(pan.update(&mut transform, dx, dy));
        }
        assert_eq!(transform.offset_x(), -400.0 - 7.25);
        assert_eq!(transform.offset_y(), -300.0 - 2.0);
    }

    #[test]
    fn pan_without_start_is_ignored() {
        let mut transform = ViewTransform::default();
        let mut pan = PanGesture::new();
        assert!(!pan.update(&mut transform, 10.0, 10.0));
        pan.start(&transform);
        pan.end();
        assert!(!pan.is_active());
        assert!(!pan.update(&mut transform, 10.0, 10.0));
        assert_eq!(transform, ViewTransform::default());
    }

    #[test]
    fn debounce_fires_once_after_last_event() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut debounce = ResizeDebounce::new(ms(33));
        debounce.schedule(t0);
        debounce.schedule(t0 + ms(20));
        debounce.schedule(t0 + ms(40));
        assert!(!debounce.poll(t0 + ms(60)));
        assert_eq!(debounce.remaining(t0 + ms(60)), Some(ms(13)));
        assert!(debounce.poll(t0 + ms(73)));
        assert!(!debounce.poll(t0 + ms(200)));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn cancelled_debounce_never_fires() {
        let t0 = Instant::now();
        let mut debounce = ResizeDebounce::new(Duration::from_millis(10));
        debounce.schedule(t0);
        debounce.cancel();
        assert!(!debounce.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn unreachable_deadline_keeps_previous() {
        let t0 = Instant::now();
        let mut debounce = ResizeDebounce::new(Duration::MAX);
        debounce.schedule(t0);
        assert!(!debounce.is_pending());
        assert!(!debounce.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn scroll_zoom_is_clamped() {
        assert_eq!(zoom_factor_from_scroll(0.0), 1.0);
        assert!(zoom_factor_from_scroll(50.0) > 1.0);
        assert_eq!(zoom_factor_from_scroll(-1e6), 0.1);
        assert_eq!(zoom_factor_from_scroll(f64::NAN), 1.0);
    }
}
