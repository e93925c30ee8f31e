//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Limit a value to the range `[min, max]`.
///
/// `NaN` values are passed through unchanged.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Limit a value to the symmetric range `[-limit, limit]`, returning the
/// limited value and whether the limit was applied.
pub fn clamp_sym<T>(value: T, limit: T) -> (T, bool)
where
    T: Float,
{
    let limited = clamp(value, -limit, limit);

    (limited, limited != value)
}

/// Integrate a first order lag `tau * y' = u - y` over one forward Euler step.
pub fn first_order_step<T>(y: T, u: T, tau: T, dt: T) -> T
where
    T: Float,
{
    y + (u - y) * dt / tau
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(2f64, -1.5, 1.5), 1.5);
        assert_eq!(clamp(-2f64, -1.5, 1.5), -1.5);
        assert_eq!(clamp(0.3f64, -1.5, 1.5), 0.3);

        assert_eq!(clamp_sym(0.7f64, 0.5), (0.5, true));
        assert_eq!(clamp_sym(-0.7f64, 0.5), (-0.5, true));
        assert_eq!(clamp_sym(0.2f64, 0.5), (0.2, false));
    }

    #[test]
    fn test_first_order_step() {
        assert_eq!(first_order_step(0f64, 1.0, 0.5, 0.25), 0.5);
        assert_eq!(first_order_step(1f64, 1.0, 0.5, 0.25), 1.0);
    }
}
