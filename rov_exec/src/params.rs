//! # Rover Executable Parameters
//!
//! This module provide parameters for the rover executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RovExecParams {
    /// Time without a new drive demand after which the rover is made safe.
    ///
    /// Units: seconds
    pub demand_timeout_s: f64,

    /// Number of consecutive cycle overruns after which execution is aborted.
    pub max_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load() {
        let p: RovExecParams = util::params::load_from_str(
            "demand_timeout_s = 1.0\n\
             max_consec_cycle_overruns = 50\n",
        )
        .unwrap();

        assert_eq!(p.demand_timeout_s, 1.0);
        assert_eq!(p.max_consec_cycle_overruns, 50);
    }
}
