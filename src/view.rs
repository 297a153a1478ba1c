//! Model-space ranges, visible viewports, and function domains.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

}

/// Model-space area visible on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }
}

/// Optional model-X bounds restricting where a function is sampled.
///
/// Unlike [`Range`], bounds are never reordered: a domain with
/// `min >= max` is empty and renders nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Domain {
    /// Lowest model X to sample, or the visible left edge when unset.
    pub min: Option<f64>,
    /// Highest model X to sample, or the visible right edge when unset.
    pub max: Option<f64>,
}

impl Domain {
    /// Domain covering whatever is visible.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Create a domain bounded on both sides.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_orders_bounds() {
        let range = Range::new(3.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 3.0);
    }

    #[test]
    fn domain_keeps_bounds_as_given() {
        let domain = Domain::new(5.0, 1.0);
        assert_eq!(domain.min, Some(5.0));
        assert_eq!(domain.max, Some(1.0));
        assert_eq!(Domain::default(), Domain::UNBOUNDED);
        assert_eq!(Domain::UNBOUNDED.with_min(2.0).min, Some(2.0));
    }
}
