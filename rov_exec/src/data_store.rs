//! # Data Store

use log::{info, warn};

#[cfg(feature = "sim")]
use crate::drive_sim;
use crate::{
    fuzzy_ctrl,
    mech_if::{DriveDemand, DriveDems},
};
use util::module::State;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the rover has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    /// No drive demand has been received within the timeout
    DemandTimeout,

    /// The actuator rejected the demands or is unavailable
    ActuatorError,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Session elapsed time at the start of this cycle
    pub time_s: f64,

    // Safe mode variables
    /// Determines if the rover is in safe mode.
    pub safe: bool,

    /// Gives the reason for the rover being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Demands
    /// The latest drive demand, held until replaced
    pub demand: Option<DriveDemand>,

    /// Time at which the latest drive demand was received
    pub demand_time_s: Option<f64>,

    // FuzzyCtrl
    pub fuzzy_ctrl: fuzzy_ctrl::FuzzyCtrl,
    pub fuzzy_ctrl_input: fuzzy_ctrl::InputData,
    pub fuzzy_ctrl_output: fuzzy_ctrl::OutputData,
    pub fuzzy_ctrl_status_rpt: fuzzy_ctrl::StatusReport,

    /// Demands sent to the actuator this cycle
    pub drive_dems: DriveDems,

    // DriveSim
    #[cfg(feature = "sim")]
    pub drive_sim: drive_sim::DriveSim,
    #[cfg(feature = "sim")]
    pub drive_sim_output: drive_sim::OutputData,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the rover into safe mode with the given cause.
    ///
    /// Returns `true` if safe mode was entered by this call.
    pub fn make_safe(&mut self, cause: SafeModeCause) -> bool {
        if self.safe {
            return false;
        }

        warn!("Make safe requested, cause: {:?}", cause);
        self.safe = true;
        self.safe_cause = Some(cause);

        // Drop the controller's derivative history and zero the demands
        self.fuzzy_ctrl.make_safe();
        self.drive_dems = DriveDems::default();

        true
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if root_cause != cause => Err(()),
            _ => {
                self.safe = false;
                self.safe_cause = None;
                info!("Make unsafe requested, root cause match, safe mode disabled");
                Ok(())
            }
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle and records the cycle time.
    pub fn cycle_start(&mut self, time_s: f64) {
        self.time_s = time_s;

        self.fuzzy_ctrl_input = fuzzy_ctrl::InputData::default();
        self.fuzzy_ctrl_output = fuzzy_ctrl::OutputData::default();
        self.fuzzy_ctrl_status_rpt = fuzzy_ctrl::StatusReport::default();
        self.drive_dems = DriveDems::default();
    }

    /// Record a newly received drive demand.
    pub fn set_demand(&mut self, demand: DriveDemand) {
        self.demand = Some(demand);
        self.demand_time_s = Some(self.time_s);
    }

    /// Returns true if no demand has been received within `timeout_s` of the current cycle.
    pub fn demand_timed_out(&self, timeout_s: f64) -> bool {
        match self.demand_time_s {
            Some(t) => self.time_s - t > timeout_s,
            None => true,
        }
    }

    /// Enter or leave safe mode depending on the age of the latest demand.
    ///
    /// Returns `true` if safe mode was entered by this call.
    pub fn check_demand_timeout(&mut self, timeout_s: f64) -> bool {
        if self.demand_timed_out(timeout_s) {
            self.make_safe(SafeModeCause::DemandTimeout)
        } else {
            self.make_unsafe(SafeModeCause::DemandTimeout).ok();
            false
        }
    }

    /// Build the controller input for this cycle from the current demand and measured velocity.
    pub fn build_fuzzy_ctrl_input(&mut self, v_meas_ms: f64) {
        let demand = self.demand.unwrap_or_default();

        self.fuzzy_ctrl_input = fuzzy_ctrl::InputData {
            time_s: self.time_s,
            v_err_ms: demand.v_cmd_ms - v_meas_ms,
            dv_err_mss: None,
            w_cmd_rads: demand.w_cmd_rads,
        };
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_safe_mode() {
        let mut ds = DataStore::default();

        assert!(ds.make_safe(SafeModeCause::DemandTimeout));
        assert!(ds.safe);

        // Already safe
        assert!(!ds.make_safe(SafeModeCause::ActuatorError));
        assert_eq!(ds.safe_cause, Some(SafeModeCause::DemandTimeout));

        // Only the root cause clears safe mode
        assert_eq!(ds.make_unsafe(SafeModeCause::ActuatorError), Err(()));
        assert!(ds.safe);
        assert_eq!(ds.make_unsafe(SafeModeCause::DemandTimeout), Ok(()));
        assert!(!ds.safe);

        assert_eq!(ds.make_unsafe(SafeModeCause::DemandTimeout), Ok(()));
    }

    #[test]
    fn test_demand_timeout() {
        let mut ds = DataStore::default();

        // No demand yet
        ds.cycle_start(0.0);
        assert!(ds.check_demand_timeout(1.0));
        assert!(ds.safe);

        ds.cycle_start(0.1);
        ds.set_demand(DriveDemand {
            v_cmd_ms: 0.5,
            w_cmd_rads: 0.0,
        });
        assert!(!ds.check_demand_timeout(1.0));
        assert!(!ds.safe);

        // Demand is held within the timeout
        ds.cycle_start(1.0);
        assert!(!ds.check_demand_timeout(1.0));
        assert!(!ds.safe);

        ds.cycle_start(1.2);
        assert!(ds.check_demand_timeout(1.0));
        assert!(ds.safe);
        assert_eq!(ds.drive_dems, DriveDems::default());
    }

    #[test]
    fn test_fuzzy_ctrl_input() {
        let mut ds = DataStore::default();

        ds.cycle_start(3.0);
        ds.build_fuzzy_ctrl_input(0.2);
        assert_eq!(ds.fuzzy_ctrl_input.v_err_ms, -0.2);

        ds.set_demand(DriveDemand {
            v_cmd_ms: 0.5,
            w_cmd_rads: -0.3,
        });
        ds.build_fuzzy_ctrl_input(0.2);

        assert!((ds.fuzzy_ctrl_input.v_err_ms - 0.3).abs() < 1e-12);
        assert_eq!(ds.fuzzy_ctrl_input.w_cmd_rads, -0.3);
        assert_eq!(ds.fuzzy_ctrl_input.time_s, 3.0);
        assert_eq!(ds.fuzzy_ctrl_input.dv_err_mss, None);
    }
}
