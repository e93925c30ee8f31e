//! # Mechanisms Interface
//!
//! This module provides the boundary between the drive controller and whatever moves the rover.
//! The controller only ever produces normalised demands, an `Actuator` turns those into motion.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, trace};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Normalised drive demands, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveDems {
    /// Throttle demand, positive forwards.
    pub throttle: f64,

    /// Steering demand, positive to the right.
    pub steer: f64,
}

/// A velocity demand from upstream, read from the demand script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveDemand {
    /// Commanded linear velocity.
    ///
    /// Units: meters/second
    pub v_cmd_ms: f64,

    /// Commanded angular velocity.
    ///
    /// Units: radians/second
    pub w_cmd_rads: f64,
}

/// Actuator which logs the demands it is given, used when no hardware is connected.
#[derive(Debug, Default)]
pub struct LogActuator {
    last_dems: Option<DriveDems>,

    num_applied: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ActuatorError {
    #[error("The {0} demand is not finite ({1})")]
    NonFiniteDemand(&'static str, f64),

    #[error("The {0} demand is outside [-1, 1] ({1})")]
    DemandOutOfRange(&'static str, f64),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Something which can apply normalised drive demands.
pub trait Actuator {
    /// Apply the given demands.
    ///
    /// Implementations shall reject non-finite or out of range demands without applying them.
    fn apply(&mut self, dems: &DriveDems) -> Result<(), ActuatorError>;

    /// Bring the drive to a stop.
    fn make_safe(&mut self) -> Result<(), ActuatorError>;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveDems {
    /// Check that both demands are finite and within `[-1, 1]`.
    pub fn validate(&self) -> Result<(), ActuatorError> {
        for &(name, value) in [("throttle", self.throttle), ("steer", self.steer)].iter() {
            if !value.is_finite() {
                return Err(ActuatorError::NonFiniteDemand(name, value));
            }
            if value.abs() > 1.0 {
                return Err(ActuatorError::DemandOutOfRange(name, value));
            }
        }

        Ok(())
    }
}

impl LogActuator {
    /// The last demands which were applied, if any.
    pub fn last_dems(&self) -> Option<DriveDems> {
        self.last_dems
    }

    /// Number of demands applied so far.
    pub fn num_applied(&self) -> u64 {
        self.num_applied
    }
}

impl Actuator for LogActuator {
    fn apply(&mut self, dems: &DriveDems) -> Result<(), ActuatorError> {
        dems.validate()?;

        trace!(
            "LogActuator: throttle = {:.3}, steer = {:.3}",
            dems.throttle,
            dems.steer
        );

        self.last_dems = Some(*dems);
        self.num_applied += 1;

        Ok(())
    }

    fn make_safe(&mut self) -> Result<(), ActuatorError> {
        info!("LogActuator made safe");
        self.last_dems = Some(DriveDems::default());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_log_actuator() {
        let mut act = LogActuator::default();
        assert_eq!(act.last_dems(), None);

        let dems = DriveDems {
            throttle: 0.4,
            steer: -1.0,
        };
        act.apply(&dems).unwrap();
        assert_eq!(act.last_dems(), Some(dems));
        assert_eq!(act.num_applied(), 1);

        act.make_safe().unwrap();
        assert_eq!(act.last_dems(), Some(DriveDems::default()));
    }

    #[test]
    fn test_rejects_bad_demands() {
        let mut act = LogActuator::default();

        let r = act.apply(&DriveDems {
            throttle: 1.2,
            steer: 0.0,
        });
        assert_eq!(r, Err(ActuatorError::DemandOutOfRange("throttle", 1.2)));

        let r = act.apply(&DriveDems {
            throttle: 0.0,
            steer: std::f64::NAN,
        });
        assert!(matches!(r, Err(ActuatorError::NonFiniteDemand("steer", _))));

        // Nothing was applied
        assert_eq!(act.last_dems(), None);
        assert_eq!(act.num_applied(), 0);
    }

    #[test]
    fn test_demand_from_json() {
        let d: DriveDemand = serde_json::from_str(r#"{"v_cmd_ms": 0.5, "w_cmd_rads": -0.1}"#)
            .unwrap();

        assert_eq!(
            d,
            DriveDemand {
                v_cmd_ms: 0.5,
                w_cmd_rads: -0.1
            }
        );
    }
}
