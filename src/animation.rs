//! Eased view animations.
//!
//! A plot runs at most one animation. Starting another supersedes the
//! current one, whose completion callback is dropped without running.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1750);

static ANIMATION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    fn next() -> Self {
        Self(ANIMATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Callback run once when an animation reaches its target.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// A value per axis, either of which may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialPoint {
    /// X component.
    pub x: Option<f64>,
    /// Y component.
    pub y: Option<f64>,
}

impl PartialPoint {
    /// Both components set.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Only X set.
    pub fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    /// Only Y set.
    pub fn y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }

    /// Drop non-finite and zero components.
    pub(crate) fn non_zero(self) -> Self {
        let keep = |v: Option<f64>| v.filter(|v| v.is_finite() && *v != 0.0);
        Self {
            x: keep(self.x),
            y: keep(self.y),
        }
    }

    /// Check whether neither component is set.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Cubic ease-in-out over `t` in `0.0..=1.0`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * u * u * u + 1.0
    }
}

/// Offsets to apply for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnimationFrame {
    pub(crate) offsets: PartialPoint,
    pub(crate) finished: bool,
}

/// An in-flight offset animation.
pub(crate) struct Animation {
    id: AnimationId,
    from: (f64, f64),
    to: PartialPoint,
    duration: Duration,
    started_at: Option<Instant>,
    on_complete: Option<CompletionCallback>,
}

impl Animation {
    /// Animate from the current offsets to target offsets.
    pub(crate) fn new(
        from: (f64, f64),
        to: PartialPoint,
        duration: Duration,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        Self {
            id: AnimationId::next(),
            from,
            to,
            duration,
            started_at: None,
            on_complete,
        }
    }

    pub(crate) fn id(&self) -> AnimationId {
        self.id
    }

    /// Compute the offsets for a frame. The first frame fixes the start time.
    pub(crate) fn frame(&mut self, now: Instant) -> AnimationFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let finished = elapsed >= self.duration;
        let progress = if finished {
            1.0
        } else {
            ease_in_out_cubic(elapsed.as_secs_f64() / self.duration.as_secs_f64())
        };
        let lerp = |from: f64, to: f64| from + (to - from) * progress;
        AnimationFrame {
            offsets: PartialPoint {
                x: self.to.x.map(|to| lerp(self.from.0, to)),
                y: self.to.y.map(|to| lerp(self.from.1, to)),
            },
            finished,
        }
    }

    /// Take the completion callback, leaving none behind.
    pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("started_at", &self.started_at)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
        let mut previous = 0.0;
        for i in 1..=100 {
            let v = ease_in_out_cubic(i as f64 / 100.0);
            assert!(v >= previous);
            previous = v;
        }
    }

    #[test]
    fn frames_interpolate_and_finish_on_target() {
        let t0 = Instant::now();
        let mut animation = Animation::new(
            (0.0, 10.0),
            PartialPoint::x(100.0),
            Duration::from_millis(100),
            None,
        );
        let first = animation.frame(t0);
        assert_eq!(first.offsets.x, Some(0.0));
        assert_eq!(first.offsets.y, None);
        assert!(!first.finished);

        let middle = animation.frame(t0 + Duration::from_millis(50));
        assert!((middle.offsets.x.unwrap() - 50.0).abs() < 1e-9);

        let last = animation.frame(t0 + Duration::from_millis(250));
        assert!(last.finished);
        assert_eq!(last.offsets.x, Some(100.0));
    }

    #[test]
    fn ids_are_unique() {
        let a = Animation::new((0.0, 0.0), PartialPoint::x(1.0), DEFAULT_DURATION, None);
        let b = Animation::new((0.0, 0.0), PartialPoint::x(1.0), DEFAULT_DURATION, None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn partial_point_drops_zero_components() {
        let point = PartialPoint::new(0.0, f64::NAN).non_zero();
        assert!(point.is_empty());
        assert_eq!(PartialPoint::new(2.0, 0.0).non_zero(), PartialPoint::x(2.0));
    }
}
