//! Parameters structure for FuzzyCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for fuzzy drive control.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Params {
    // ---- NORMALISATION ----
    /// Full scale of the velocity error, and of its rate of change.
    ///
    /// Units: meters/second (meters/second^2 for the rate)
    pub v_max_ms: f64,

    /// Full scale of the angular velocity command.
    ///
    /// Units: radians/second
    pub w_max_rads: f64,

    // ---- TIMING ----
    /// Nominal period between two ticks.
    ///
    /// Units: seconds
    pub sample_time_s: f64,

    // ---- LIMITS ----
    /// Throttle output is limited to `[-throttle_limit, throttle_limit]`.
    pub throttle_limit: f64,

    /// Steering output is limited to `[-steer_limit, steer_limit]`.
    pub steer_limit: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("Parameter `{0}` must be greater than zero, found {1}")]
    NotPositive(&'static str, f64),

    #[error("Parameter `{0}` must be finite, found {1}")]
    NotFinite(&'static str, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            v_max_ms: 1.5,
            w_max_rads: 1.5,
            sample_time_s: 0.05,
            throttle_limit: 1.0,
            steer_limit: 1.0,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        let named = [
            ("v_max_ms", self.v_max_ms),
            ("w_max_rads", self.w_max_rads),
            ("sample_time_s", self.sample_time_s),
            ("throttle_limit", self.throttle_limit),
            ("steer_limit", self.steer_limit),
        ];

        for &(name, value) in named.iter() {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite(name, value));
            }
            if value <= 0.0 {
                return Err(ParamsError::NotPositive(name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validation() {
        assert_eq!(Params::default().are_valid(), Ok(()));

        let p = Params {
            v_max_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(p.are_valid(), Err(ParamsError::NotPositive("v_max_ms", 0.0)));

        let p = Params {
            steer_limit: -1.0,
            ..Default::default()
        };
        assert_eq!(p.are_valid(), Err(ParamsError::NotPositive("steer_limit", -1.0)));

        let p = Params {
            w_max_rads: std::f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(p.are_valid(), Err(ParamsError::NotFinite("w_max_rads", _))));

        let p = Params {
            sample_time_s: std::f64::NAN,
            ..Default::default()
        };
        assert!(matches!(p.are_valid(), Err(ParamsError::NotFinite("sample_time_s", _))));
    }

    #[test]
    fn test_from_toml() {
        let p: Params = util::params::load_from_str(
            "v_max_ms = 2.0\n\
             w_max_rads = 1.0\n\
             sample_time_s = 0.1\n\
             throttle_limit = 0.8\n\
             steer_limit = 1.0\n",
        )
        .unwrap();

        assert_eq!(p.v_max_ms, 2.0);
        assert_eq!(p.throttle_limit, 0.8);
        assert_eq!(p.are_valid(), Ok(()));
    }
}
