//! Numeric helpers for grid intervals and tick labels.

/// Significant digits kept when stripping a value with [`strip`].
pub const DEFAULT_PRECISION: usize = 4;
/// Decimal places kept when stripping a value with [`strip_fixed`].
pub const DEFAULT_DECIMALS: usize = 6;

/// Largest power of `base` that does not exceed `value`.
///
/// Returns NaN when `value <= 0`, `base <= 1`, or either input is not finite.
pub fn round_down_to_power_of(base: f64, value: f64) -> f64 {
    if !base.is_finite() || !value.is_finite() || base <= 1.0 || value <= 0.0 {
        return f64::NAN;
    }
    let mut power = base.powf(value.log(base).floor());
    // The logarithm can land one ulp off an exact power.
    if power > value {
        power /= base;
    } else if power * base <= value {
        power *= base;
    }
    power
}

/// Round `value` to `digits` significant digits.
pub fn strip_to_precision(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 || digits == 0 {
        return value;
    }
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Round `value` to `decimals` places after the decimal point.
pub fn strip_to_fixed(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Strip floating point noise, keeping [`DEFAULT_PRECISION`] significant digits.
pub fn strip(value: f64) -> f64 {
    strip_to_precision(value, DEFAULT_PRECISION)
}

/// Strip floating point noise, keeping [`DEFAULT_DECIMALS`] decimal places.
pub fn strip_fixed(value: f64) -> f64 {
    strip_to_fixed(value, DEFAULT_DECIMALS)
}

/// Format a stripped value for display as a tick label.
pub fn format_label(value: f64) -> String {
    if value == 0.0 {
        // Covers negative zero as well.
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_is_at_most_value() {
        let mut previous = 0.0;
        let mut v = 0.01;
        while v < 5000.0 {
            let p = round_down_to_power_of(2.0, v);
            assert!(p <= v, "{p} > {v}");
            assert!(v < p * 2.0);
            assert_eq!(p.log2().fract(), 0.0);
            assert!(p >= previous);
            previous = p;
            v *= 1.07;
        }
    }

    #[test]
    fn exact_powers_map_to_themselves() {
        for exp in -10..20 {
            let v = 2f64.powi(exp);
            assert_eq!(round_down_to_power_of(2.0, v), v);
        }
        assert_eq!(round_down_to_power_of(10.0, 1000.0), 1000.0);
        assert_eq!(round_down_to_power_of(10.0, 999.0), 100.0);
    }

    #[test]
    fn zoom_bucket_is_stable() {
        for k in -6..8 {
            let low = 2f64.powi(k);
            let expected = round_down_to_power_of(2.0, low);
            for step in 1..16 {
                let v = low + low * (step as f64 / 16.0);
                assert_eq!(round_down_to_power_of(2.0, v), expected);
            }
        }
    }

    #[test]
    fn invalid_inputs_are_nan() {
        assert!(round_down_to_power_of(2.0, 0.0).is_nan());
        assert!(round_down_to_power_of(2.0, -3.0).is_nan());
        assert!(round_down_to_power_of(1.0, 3.0).is_nan());
        assert!(round_down_to_power_of(2.0, f64::NAN).is_nan());
    }

    #[test]
    fn strip_removes_float_noise() {
        assert_eq!(strip(0.1 + 0.2), 0.3);
        assert_eq!(strip(123456.0), 123500.0);
        assert_eq!(strip_fixed(0.1 + 0.2), 0.3);
        assert_eq!(strip_fixed(1.0000004), 1.0);
        assert_eq!(strip_to_precision(64.0 / 3.0, 8), 21.333333);
    }

    #[test]
    fn labels_hide_negative_zero() {
        assert_eq!(format_label(strip_fixed(-0.0000001)), "0");
        assert_eq!(format_label(-64.0), "-64");
        assert_eq!(format_label(0.5), "0.5");
    }
}
