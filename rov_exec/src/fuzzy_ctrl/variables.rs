//! Input normalisation and fuzzification
//!
//! All breakpoints are in normalised, dimensionless units.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::marker::PhantomData;

use super::{
    labels::{AngCmd, Label, Memberships, RateErr, VelErr, NUM_LABELS},
    membership::Shape::{self, HighShoulder, LowShoulder, Trapezoidal, Triangular},
    NORM_EPSILON, UNIVERSE_LIMIT,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A linguistic variable, one fuzzy set per label.
#[derive(Clone, Copy, Debug)]
pub struct LinguisticVar<L> {
    sets: [Shape; NUM_LABELS],
    _label: PhantomData<L>,
}

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Velocity error sets, normalised by the maximum speed.
pub const VEL_ERR: LinguisticVar<VelErr> = LinguisticVar::new([
    LowShoulder(-1.5, -1.0, -0.7, -0.4),
    Triangular(-0.8, -0.4, 0.0),
    Trapezoidal(-0.2, -0.05, 0.05, 0.2),
    Triangular(0.0, 0.4, 0.8),
    HighShoulder(0.4, 0.7, 1.0, 1.5),
]);

/// Velocity error rate sets, normalised by the maximum speed.
pub const RATE_ERR: LinguisticVar<RateErr> = LinguisticVar::new([
    LowShoulder(-1.5, -1.0, -0.6, -0.2),
    Triangular(-0.5, -0.25, 0.0),
    Trapezoidal(-0.1, -0.03, 0.03, 0.1),
    Triangular(0.0, 0.25, 0.5),
    HighShoulder(0.2, 0.6, 1.0, 1.5),
]);

/// Angular command sets, normalised by the maximum turn rate.
pub const ANG_CMD: LinguisticVar<AngCmd> = LinguisticVar::new([
    LowShoulder(-1.5, -1.0, -0.8, -0.5),
    Triangular(-0.8, -0.4, -0.05),
    Trapezoidal(-0.1, -0.03, 0.03, 0.1),
    Triangular(0.05, 0.4, 0.8),
    HighShoulder(0.5, 0.8, 1.0, 1.5),
]);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<L> LinguisticVar<L> {
    /// Build a variable from its sets, given in label order.
    pub const fn new(sets: [Shape; NUM_LABELS]) -> Self {
        Self {
            sets,
            _label: PhantomData,
        }
    }
}

impl<L: Label> LinguisticVar<L> {
    /// The set of the given label.
    pub fn set(&self, label: L) -> &Shape {
        &self.sets[label.index()]
    }

    /// Degree of membership of a normalised input in every label.
    pub fn fuzzify(&self, x: f64) -> Memberships<L> {
        let mut m = Memberships::zeros();

        for &l in L::ALL.iter() {
            m.set(l, self.set(l).degree(x));
        }

        m
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Scale a raw input by its full scale value and clamp it into the universe.
///
/// A `NaN` input normalises to zero.
pub fn normalise(raw: f64, full_scale: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }

    util::maths::clamp(
        raw / (full_scale + NORM_EPSILON),
        -UNIVERSE_LIMIT,
        UNIVERSE_LIMIT,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    /// Sweep the given range with a fine step, including both ends.
    fn sweep(min: f64, max: f64) -> Vec<f64> {
        let n = 6000;
        (0..=n)
            .map(|i| min + (max - min) * (i as f64) / (n as f64))
            .collect()
    }

    fn check_var<L: Label>(var: &LinguisticVar<L>) {
        // Degrees stay in [0, 1], even past the universe
        for x in sweep(-3.0, 3.0) {
            for (l, d) in var.fuzzify(x).iter() {
                assert!(d >= 0.0 && d <= 1.0, "{:?}({}) = {}", l, x, d);
            }
        }

        // Every point of the universe belongs to at least one set
        for x in sweep(-UNIVERSE_LIMIT, UNIVERSE_LIMIT) {
            assert!(var.fuzzify(x).total() > 0.0, "No coverage at {}", x);
        }
    }

    #[test]
    fn test_ranges_and_coverage() {
        check_var(&VEL_ERR);
        check_var(&RATE_ERR);
        check_var(&ANG_CMD);
    }

    #[test]
    fn test_table_values() {
        let m = VEL_ERR.fuzzify(0.0);
        assert_eq!(m.get(VelErr::ZE), 1.0);
        assert_eq!(m.get(VelErr::NS), 0.0);
        assert_eq!(m.get(VelErr::PS), 0.0);

        let m = VEL_ERR.fuzzify(0.6);
        assert!((m.get(VelErr::PS) - 0.5).abs() < 1e-12);
        assert!((m.get(VelErr::PL) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.dominant(), VelErr::PL);

        let m = RATE_ERR.fuzzify(-0.25);
        assert_eq!(m.get(RateErr::NS), 1.0);
        assert!((m.get(RateErr::NF) - 0.125).abs() < 1e-12);

        let m = ANG_CMD.fuzzify(0.05);
        assert!((m.get(AngCmd::Z) - 0.05 / 0.07).abs() < 1e-12);
        assert_eq!(m.get(AngCmd::R), 0.0);
        assert_eq!(ANG_CMD.fuzzify(UNIVERSE_LIMIT).get(AngCmd::HR), 1.0);
        assert_eq!(ANG_CMD.fuzzify(-UNIVERSE_LIMIT).get(AngCmd::HL), 1.0);
    }

    #[test]
    fn test_normalise() {
        assert_eq!(normalise(0.0, 1.5), 0.0);
        assert_eq!(normalise(15.0, 1.5), UNIVERSE_LIMIT);
        assert_eq!(normalise(-15.0, 1.5), -UNIVERSE_LIMIT);
        assert_eq!(normalise(std::f64::INFINITY, 1.5), UNIVERSE_LIMIT);
        assert_eq!(normalise(std::f64::NAN, 1.5), 0.0);
        assert!((normalise(0.75, 1.5) - 0.5).abs() < 1e-9);

        // Mirrored inputs normalise to exactly mirrored values
        assert_eq!(normalise(-0.3, 1.5), -normalise(0.3, 1.5));

        // A zero full scale does not divide by zero
        assert_eq!(normalise(1.0, 0.0), UNIVERSE_LIMIT);
    }
}
