//! Throttle and steering rule tables

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{
    labels::{AngCmd, RateErr, Steer, Throttle, VelErr},
    rule_base::{Rule, RuleBase},
};

// ---------------------------------------------------------------------------
// MACROS
// ---------------------------------------------------------------------------

/// `rule!(E, dE => T)` for throttle, `rule!(W => S)` for steering.
macro_rules! rule {
    ($e:ident, $de:ident => $out:ident) => {
        Rule {
            antecedent: (VelErr::$e, RateErr::$de),
            consequent: Throttle::$out,
        }
    };
    ($w:ident => $out:ident) => {
        Rule {
            antecedent: (AngCmd::$w,),
            consequent: Steer::$out,
        }
    };
}

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Throttle rules, `if E is .. and dE is .. then throttle is ..`.
pub const THROTTLE_RULES: [Rule<(VelErr, RateErr), Throttle>; 15] = [
    // Too fast, brake
    rule!(NL, PF => SB),
    rule!(NL, PS => SB),
    rule!(NL, ZE => B),
    rule!(NS, PF => B),
    rule!(NS, PS => B),
    rule!(NS, ZE => B),
    // On target, coast
    rule!(ZE, ZE => Z),
    rule!(ZE, NS => Z),
    rule!(ZE, PS => Z),
    // Too slow, push
    rule!(PS, ZE => P),
    rule!(PS, NS => P),
    rule!(PS, NF => P),
    rule!(PL, ZE => SP),
    rule!(PL, NS => SP),
    rule!(PL, NF => SP),
];

/// Steering rules, a direct mapping of the angular command.
pub const STEER_RULES: [Rule<(AngCmd,), Steer>; 5] = [
    rule!(HL => HL),
    rule!(L => L),
    rule!(Z => Z),
    rule!(R => R),
    rule!(HR => HR),
];

/// Throttle centres, SB, B, Z, P, SP.
pub const THROTTLE_CENTRES: [f64; 5] = [-1.0, -0.4, 0.0, 0.4, 1.0];

/// Steering centres, HL, L, Z, R, HR.
pub const STEER_CENTRES: [f64; 5] = [-1.0, -0.4, 0.0, 0.4, 1.0];

/// The throttle rule base.
pub const THROTTLE: RuleBase<(VelErr, RateErr), Throttle> =
    RuleBase::new(&THROTTLE_RULES, THROTTLE_CENTRES);

/// The steering rule base.
pub const STEER: RuleBase<(AngCmd,), Steer> = RuleBase::new(&STEER_RULES, STEER_CENTRES);
