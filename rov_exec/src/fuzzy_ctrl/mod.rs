//! Fuzzy drive control module
//!
//! Converts a velocity error, its rate of change and an angular velocity
//! command into normalised throttle and steering demands. Each tick runs
//! four stages:
//!
//! 1. Normalisation of the raw inputs into `[-1.5, 1.5]`
//! 2. Fuzzification into the labels of each input variable
//! 3. Rule evaluation (min) and aggregation (max) per output label
//! 4. Centroid defuzzification over singleton centres, then limiting

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod labels;
pub mod membership;
mod params;
pub mod rule_base;
pub mod rules;
mod state;
pub mod variables;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Bound of the normalised input universe.
pub const UNIVERSE_LIMIT: f64 = 1.5;

/// Added to full scale values before dividing by them.
pub const NORM_EPSILON: f64 = 1e-9;

/// Lower bound on the elapsed time used to derive the error rate.
///
/// Units: seconds
pub const MIN_DERIV_DT_S: f64 = 1e-3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during FuzzyCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyCtrlError {
    #[error("Failed to load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Loaded parameters are invalid: {0}")]
    InvalidParams(ParamsError),

    #[error("Failed to create the archives: {0}")]
    ArchiveInitError(util::archive::ArchiveError),
}
