//! Membership function primitives
//!
//! Both primitives are total over the reals. Breakpoints must be ordered,
//! which is checked in debug builds only as the tables are static.

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The shape of a fuzzy set over a normalised universe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Triangle with feet at `a` and `c` and peak at `b`.
    Triangular(f64, f64, f64),

    /// Trapezoid with feet at `a` and `d` and flat top on `[b, c]`.
    Trapezoidal(f64, f64, f64, f64),

    /// Trapezoid whose lower foot sits on the lower bound of the universe.
    ///
    /// The set saturates at 1 from its flat top down to and beyond the
    /// bound, so that clamped inputs land in the set instead of on its foot.
    LowShoulder(f64, f64, f64, f64),

    /// Trapezoid whose upper foot sits on the upper bound of the universe.
    HighShoulder(f64, f64, f64, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Shape {
    /// Degree of membership of `x` in this set.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Shape::Triangular(a, b, c) => triangular(x, a, b, c),
            Shape::Trapezoidal(a, b, c, d) => trapezoidal(x, a, b, c, d),
            Shape::LowShoulder(a, b, c, d) => {
                if x <= c {
                    1.0
                } else {
                    trapezoidal(x, a, b, c, d)
                }
            }
            Shape::HighShoulder(a, b, c, d) => {
                if x >= b {
                    1.0
                } else {
                    trapezoidal(x, a, b, c, d)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Triangular membership.
///
/// Zero at and outside the feet `a` and `c`, one at `b`.
pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    debug_assert!(a < b && b < c, "Unordered breakpoints ({}, {}, {})", a, b, c);

    if x <= a || x >= c {
        0.0
    } else if x == b {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Trapezoidal membership.
///
/// Zero at and outside the feet `a` and `d`, one on `[b, c]`.
pub fn trapezoidal(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    debug_assert!(
        a < b && b <= c && c < d,
        "Unordered breakpoints ({}, {}, {}, {})",
        a,
        b,
        c,
        d
    );

    if x <= a || x >= d {
        0.0
    } else if b <= x && x <= c {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}
