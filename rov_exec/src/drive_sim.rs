//! # Drive Simulation
//!
//! A first order model of the rover's drive, standing in for velocity sensing when no hardware
//! is connected. Throttle and steering demands set the target linear and angular velocities,
//! which the measured velocities lag behind with their own time constants.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use serde::{Deserialize, Serialize};

use crate::mech_if::DriveDems;
use util::{
    archive::{ArchiveError, Archived, Archiver},
    maths::first_order_step,
    module::State,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters of the simulated drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Linear velocity reached at full throttle.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Time constant of the linear velocity response.
    ///
    /// Units: seconds
    pub speed_time_const_s: f64,

    /// Angular velocity reached at full steering.
    ///
    /// Units: radians/second
    pub max_turn_rate_rads: f64,

    /// Time constant of the angular velocity response.
    ///
    /// Units: seconds
    pub turn_time_const_s: f64,
}

/// Simulated drive state.
#[derive(Default)]
pub struct DriveSim {
    params: Params,

    /// Time of the previous step, none before the first step.
    last_time_s: Option<f64>,

    output: OutputData,
    arch_output: Archiver,
}

/// Input to one simulation step.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InputData {
    /// Time of this step.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Demands applied since the previous step.
    pub dems: DriveDems,
}

/// Measured velocities after a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputData {
    /// Units: seconds
    pub time_s: f64,

    /// Units: meters/second
    pub v_meas_ms: f64,

    /// Units: radians/second
    pub w_meas_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Failed to load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Parameter `{0}` must be finite and greater than zero, found {1}")]
    InvalidParam(&'static str, f64),

    #[error("Simulation time went backwards from {0} s to {1} s")]
    TimeReversed(f64, f64),

    #[error("Failed to create the archive: {0}")]
    ArchiveInitError(ArchiveError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            max_speed_ms: 1.0,
            speed_time_const_s: 0.5,
            max_turn_rate_rads: 1.0,
            turn_time_const_s: 0.3,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), SimError> {
        for &(name, value) in [
            ("max_speed_ms", self.max_speed_ms),
            ("speed_time_const_s", self.speed_time_const_s),
            ("max_turn_rate_rads", self.max_turn_rate_rads),
            ("turn_time_const_s", self.turn_time_const_s),
        ]
        .iter()
        {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidParam(name, value));
            }
        }

        Ok(())
    }
}

impl DriveSim {
    /// Create a new simulation at rest.
    pub fn new(params: Params) -> Result<Self, SimError> {
        params.are_valid()?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Measured linear velocity.
    ///
    /// Units: meters/second
    pub fn v_meas_ms(&self) -> f64 {
        self.output.v_meas_ms
    }

    /// Measured angular velocity.
    ///
    /// Units: radians/second
    pub fn w_meas_rads(&self) -> f64 {
        self.output.w_meas_rads
    }

    /// Advance the simulation by `dt_s` seconds with the given demands held.
    pub fn step(&mut self, dems: &DriveDems, dt_s: f64) {
        let p = &self.params;

        // A step longer than the time constant would overshoot, settle instead
        self.output.v_meas_ms = first_order_step(
            self.output.v_meas_ms,
            dems.throttle * p.max_speed_ms,
            p.speed_time_const_s,
            dt_s.min(p.speed_time_const_s),
        );
        self.output.w_meas_rads = first_order_step(
            self.output.w_meas_rads,
            dems.steer * p.max_turn_rate_rads,
            p.turn_time_const_s,
            dt_s.min(p.turn_time_const_s),
        );
    }
}

impl State for DriveSim {
    type InitData = &'static str;
    type InitError = SimError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = ();
    type ProcError = SimError;

    /// Initialise the simulation at rest.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        let params: Params = util::params::load(init_data).map_err(SimError::ParamLoadError)?;

        *self = Self::new(params)?;

        self.arch_output = Archiver::from_path(session, "drive_sim/output.csv")
            .map_err(SimError::ArchiveInitError)?;

        Ok(())
    }

    /// Step the simulation up to the input time.
    ///
    /// The first call only records the time.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        if let Some(last) = self.last_time_s {
            if input_data.time_s < last {
                return Err(SimError::TimeReversed(last, input_data.time_s));
            }

            self.step(&input_data.dems, input_data.time_s - last);
        }

        self.last_time_s = Some(input_data.time_s);
        self.output.time_s = input_data.time_s;

        debug!(
            "DriveSim: v = {:.3} m/s, w = {:.3} rad/s",
            self.output.v_meas_ms, self.output.w_meas_rads
        );

        Ok((self.output, ()))
    }
}

impl Archived for DriveSim {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_output.serialise(self.output)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util;

    #[test]
    fn test_invalid_params() {
        let r = DriveSim::new(Params {
            speed_time_const_s: 0.0,
            ..Default::default()
        });
        assert!(matches!(r, Err(SimError::InvalidParam("speed_time_const_s", _))));

        let r = DriveSim::new(Params {
            max_turn_rate_rads: std::f64::NAN,
            ..Default::default()
        });
        assert!(r.is_err());
    }

    #[test]
    fn test_converges() {
        let mut sim = DriveSim::new(Params::default()).unwrap();
        let dems = DriveDems {
            throttle: 0.5,
            steer: -1.0,
        };

        let mut prev_v = 0.0;
        for _ in 0..200 {
            sim.step(&dems, 0.05);

            // First order response never overshoots
            assert!(sim.v_meas_ms() >= prev_v && sim.v_meas_ms() <= 0.5);
            prev_v = sim.v_meas_ms();
        }

        assert!((sim.v_meas_ms() - 0.5).abs() < 1e-6);
        assert!((sim.w_meas_rads() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_step_settles() {
        let mut sim = DriveSim::new(Params::default()).unwrap();
        sim.step(
            &DriveDems {
                throttle: 1.0,
                steer: 0.2,
            },
            10.0,
        );

        assert_eq!(sim.v_meas_ms(), 1.0);
        assert!((sim.w_meas_rads() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_proc() {
        let mut sim = DriveSim::new(Params::default()).unwrap();
        let dems = DriveDems {
            throttle: 1.0,
            steer: 0.0,
        };

        // First call only records the time
        let (out, _) = sim.proc(&InputData { time_s: 2.0, dems }).unwrap();
        assert_eq!(out.v_meas_ms, 0.0);

        let (out, _) = sim.proc(&InputData { time_s: 2.1, dems }).unwrap();
        assert!(out.v_meas_ms > 0.0);
        assert_eq!(out.time_s, 2.1);

        assert!(matches!(
            sim.proc(&InputData { time_s: 1.0, dems }),
            Err(SimError::TimeReversed(_, _))
        ));

        // Archive is disabled without a session
        assert!(sim.write().is_ok());
    }

    #[test]
    fn test_init() {
        test_util::sw_root();
        let dir = tempfile::tempdir().unwrap();
        let session = test_util::session_in(&dir);

        let mut sim = DriveSim::default();
        sim.init("drive_sim.toml", &session).unwrap();
        sim.proc(&InputData::default()).unwrap();
        sim.write().unwrap();

        let output =
            std::fs::read_to_string(session.arch_root.join("drive_sim/output.csv")).unwrap();
        assert_eq!(output, "time_s,v_meas_ms,w_meas_rads\n0.0,0.0,0.0\n");

        assert!(matches!(
            sim.init("drive_sim_negative_tau.toml", &session),
            Err(SimError::InvalidParam("turn_time_const_s", _))
        ));
    }
}
