//! Linguistic label sets and per-label membership tables

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::Debug;
use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of labels in every linguistic variable.
pub const NUM_LABELS: usize = 5;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A label of a linguistic variable.
///
/// Labels are ordered from the most negative to the most positive, and
/// `index` gives the position of the label in that order.
pub trait Label: Copy + Eq + Debug + 'static {
    /// All labels of the variable in order.
    const ALL: [Self; NUM_LABELS];

    /// Position of this label in `ALL`.
    fn index(self) -> usize;

    /// Short name of the label, as used in the rule tables.
    fn name(self) -> &'static str;
}

/// A label of an output variable.
pub trait OutputLabel: Label {
    /// The label whose centre is used when no rule fires.
    const ZERO: Self;
}

// ---------------------------------------------------------------------------
// MACROS
// ---------------------------------------------------------------------------

macro_rules! label_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $var:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $var),+
        }

        impl Label for $name {
            const ALL: [Self; NUM_LABELS] = [$($name::$var),+];

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$var => stringify!($var)),+
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// LABEL SETS
// ---------------------------------------------------------------------------

label_set! {
    /// Labels of the velocity error (commanded minus measured speed).
    VelErr {
        /// Negative large, the rover is much too fast
        NL,
        /// Negative small
        NS,
        /// Zero
        ZE,
        /// Positive small
        PS,
        /// Positive large, the rover is much too slow
        PL,
    }
}

label_set! {
    /// Labels of the rate of change of the velocity error.
    RateErr {
        /// Negative fast, the error is dropping quickly
        NF,
        /// Negative slow
        NS,
        /// Zero
        ZE,
        /// Positive slow
        PS,
        /// Positive fast, the error is rising quickly
        PF,
    }
}

label_set! {
    /// Labels of the commanded angular velocity.
    AngCmd {
        HL,
        L,
        Z,
        R,
        HR,
    }
}

label_set! {
    /// Labels of the throttle output.
    Throttle {
        /// Strong brake (or reverse)
        SB,
        /// Brake
        B,
        /// Coast
        Z,
        /// Push
        P,
        /// Strong push
        SP,
    }
}

label_set! {
    /// Labels of the steering output.
    Steer {
        HL,
        L,
        Z,
        R,
        HR,
    }
}

impl OutputLabel for Throttle {
    const ZERO: Self = Throttle::Z;
}

impl OutputLabel for Steer {
    const ZERO: Self = Steer::Z;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A degree in `[0, 1]` for each label of a linguistic variable.
///
/// Used both for fuzzified inputs and for aggregated rule firing strengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Memberships<L> {
    degrees: [f64; NUM_LABELS],
    _label: PhantomData<L>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<L: Label> Memberships<L> {
    /// All degrees zero.
    pub fn zeros() -> Self {
        Self {
            degrees: [0.0; NUM_LABELS],
            _label: PhantomData,
        }
    }

    /// Build from degrees given in label order.
    pub fn from_degrees(degrees: [f64; NUM_LABELS]) -> Self {
        Self {
            degrees,
            _label: PhantomData,
        }
    }

    /// Degree of the given label.
    pub fn get(&self, label: L) -> f64 {
        self.degrees[label.index()]
    }

    /// Set the degree of the given label.
    pub fn set(&mut self, label: L, degree: f64) {
        self.degrees[label.index()] = degree;
    }

    /// Raise the degree of the given label to `degree` if it is larger (fuzzy
    /// OR).
    pub fn raise(&mut self, label: L, degree: f64) {
        let d = &mut self.degrees[label.index()];
        *d = d.max(degree);
    }

    /// Sum of all degrees.
    pub fn total(&self) -> f64 {
        self.degrees.iter().sum()
    }

    /// The label with the highest degree, first label wins ties.
    pub fn dominant(&self) -> L {
        let mut best = L::ALL[0];

        for &l in L::ALL.iter() {
            if self.get(l) > self.get(best) {
                best = l;
            }
        }

        best
    }

    /// Iterate over `(label, degree)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        (0..NUM_LABELS).map(move |i| (L::ALL[i], self.degrees[i]))
    }
}

impl<L: Label> Default for Memberships<L> {
    fn default() -> Self {
        Self::zeros()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_label_order() {
        for (i, l) in VelErr::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }
        for (i, l) in Throttle::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }

        assert_eq!(RateErr::PF.name(), "PF");
        assert_eq!(Steer::HL.name(), "HL");
        assert_eq!(Throttle::ZERO, Throttle::Z);
    }

    #[test]
    fn test_memberships() {
        let mut m: Memberships<Throttle> = Memberships::zeros();
        assert_eq!(m.total(), 0.0);

        m.raise(Throttle::P, 0.3);
        m.raise(Throttle::P, 0.1);
        m.set(Throttle::SB, 0.2);

        assert_eq!(m.get(Throttle::P), 0.3);
        assert_eq!(m.get(Throttle::SB), 0.2);
        assert_eq!(m.dominant(), Throttle::P);
        assert_eq!(m.iter().count(), NUM_LABELS);
        assert_eq!(
            m,
            Memberships::from_degrees([0.2, 0.0, 0.0, 0.3, 0.0])
        );
    }
}
