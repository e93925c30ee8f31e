//! Generic Mamdani rule base
//!
//! A rule base holds a static table of rules mapping antecedents onto output
//! labels, and the singleton centre of each output label. Evaluation is
//! fuzzy AND (min) within a rule, fuzzy OR (max) across rules sharing a
//! consequent, then a weighted centroid over the centres.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::Debug;

use super::labels::{Label, Memberships, OutputLabel, NUM_LABELS};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// The "if" part of a rule.
pub trait Antecedent: Copy + Debug + 'static {
    /// The fuzzified inputs the antecedent is evaluated against.
    type Inputs;

    /// Firing strength of the antecedent for the given inputs.
    fn strength(&self, inputs: &Self::Inputs) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single rule, `if antecedent then consequent`.
#[derive(Clone, Copy, Debug)]
pub struct Rule<A, O> {
    pub antecedent: A,
    pub consequent: O,
}

/// A table of rules with the output centres they defuzzify onto.
#[derive(Clone, Copy, Debug)]
pub struct RuleBase<A: 'static, O: 'static> {
    rules: &'static [Rule<A, O>],

    /// Singleton centre of each output label, in label order.
    centres: [f64; NUM_LABELS],
}

/// The crisp result of evaluating a rule base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crisp {
    /// The defuzzified and limited value.
    pub value: f64,

    /// False if no rule fired and the value fell back to the zero centre.
    pub fired: bool,

    /// True if the value was limited.
    pub limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

/// Two antecedents joined by fuzzy AND.
impl<A: Label, B: Label> Antecedent for (A, B) {
    type Inputs = (Memberships<A>, Memberships<B>);

    fn strength(&self, inputs: &Self::Inputs) -> f64 {
        inputs.0.get(self.0).min(inputs.1.get(self.1))
    }
}

/// A single antecedent, which fires with its own membership degree.
impl<A: Label> Antecedent for (A,) {
    type Inputs = (Memberships<A>,);

    fn strength(&self, inputs: &Self::Inputs) -> f64 {
        inputs.0.get(self.0)
    }
}

impl<A: 'static, O: 'static> RuleBase<A, O> {
    /// Create a new rule base from a rule table and the output centres given
    /// in label order.
    pub const fn new(rules: &'static [Rule<A, O>], centres: [f64; NUM_LABELS]) -> Self {
        Self { rules, centres }
    }
}

impl<A: Antecedent, O: OutputLabel> RuleBase<A, O> {
    /// The singleton centre of an output label.
    pub fn centre(&self, label: O) -> f64 {
        self.centres[label.index()]
    }

    /// Evaluate every rule and aggregate the firing strengths per consequent.
    ///
    /// Labels with no rule keep a strength of zero.
    pub fn aggregate(&self, inputs: &A::Inputs) -> Memberships<O> {
        let mut agg = Memberships::zeros();

        for rule in self.rules.iter() {
            agg.raise(rule.consequent, rule.antecedent.strength(inputs));
        }

        agg
    }

    /// Weighted centroid of the aggregated strengths over the output centres.
    ///
    /// Returns `None` if the total strength is zero.
    pub fn defuzzify(&self, agg: &Memberships<O>) -> Option<f64> {
        let mut num = 0.0;
        let mut den = 0.0;

        for (label, mu) in agg.iter() {
            num += mu * self.centre(label);
            den += mu;
        }

        if den > 0.0 {
            Some(num / den)
        } else {
            None
        }
    }

    /// Aggregate, defuzzify, and limit the output to `[-limit, limit]`.
    pub fn eval(&self, inputs: &A::Inputs, limit: f64) -> Crisp {
        let agg = self.aggregate(inputs);

        let (raw, fired) = match self.defuzzify(&agg) {
            Some(v) => (v, true),
            None => (self.centre(O::ZERO), false),
        };

        let (value, limited) = util::maths::clamp_sym(raw, limit);

        Crisp {
            value,
            fired,
            limited,
        }
    }
}
