//! Implementations for the FuzzyCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;
use std::time::Instant;

// Internal
use super::{
    labels::Label,
    rules::{STEER, THROTTLE},
    variables::{normalise, ANG_CMD, RATE_ERR, VEL_ERR},
    FuzzyCtrlError, Params, MIN_DERIV_DT_S,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
    time::std_duration_to_seconds,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Fuzzy drive control module state
pub struct FuzzyCtrl {
    params: Params,

    /// Previous velocity error, used to derive the error rate when it is not
    /// given.
    prev_sample: Option<ErrSample>,

    /// Time origin for `update`.
    clock_origin: Instant,

    input: InputData,
    arch_input: Archiver,

    output: OutputData,
    arch_output: Archiver,

    report: StatusReport,
    arch_report: Archiver,
}

/// Input data to FuzzyCtrl.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct InputData {
    /// Monotonic time of this tick.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Commanded minus measured linear velocity.
    ///
    /// Units: meters/second
    pub v_err_ms: f64,

    /// Rate of change of the velocity error, or `None` to derive it from the
    /// previous tick.
    ///
    /// Units: meters/second^2
    pub dv_err_mss: Option<f64>,

    /// Commanded angular velocity.
    ///
    /// Units: radians/second
    pub w_cmd_rads: f64,
}

/// Output demands from FuzzyCtrl, both in `[-limit, limit]`.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct OutputData {
    /// Time of the tick which produced these demands.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Throttle demand, positive forwards.
    pub throttle: f64,

    /// Steering demand, positive to the right.
    pub steer: f64,
}

/// Status report for FuzzyCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The error rate actually used this tick.
    ///
    /// Units: meters/second^2
    pub dv_err_mss: f64,

    /// True if the error rate was derived rather than given.
    pub dv_err_derived: bool,

    /// False if no throttle rule fired and the zero centre was used.
    pub throttle_fired: bool,

    /// False if no steering rule fired and the zero centre was used.
    pub steer_fired: bool,

    /// True if the throttle demand was limited.
    pub throttle_limited: bool,

    /// True if the steering demand was limited.
    pub steer_limited: bool,
}

/// A timestamped velocity error.
#[derive(Clone, Copy, Debug)]
struct ErrSample {
    time_s: f64,
    v_err_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for FuzzyCtrl {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl FuzzyCtrl {
    /// Create a new controller, validating the parameters.
    pub fn new(params: Params) -> Result<Self, FuzzyCtrlError> {
        params.are_valid().map_err(FuzzyCtrlError::InvalidParams)?;

        Ok(Self::with_params(params))
    }

    fn with_params(params: Params) -> Self {
        Self {
            params,
            prev_sample: None,
            clock_origin: Instant::now(),
            input: InputData::default(),
            arch_input: Archiver::default(),
            output: OutputData::default(),
            arch_output: Archiver::default(),
            report: StatusReport::default(),
            arch_report: Archiver::default(),
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Run one tick, timestamped by the wall clock.
    ///
    /// Returns `(throttle, steer)`.
    pub fn update(&mut self, v_err_ms: f64, dv_err_mss: Option<f64>, w_cmd_rads: f64) -> (f64, f64) {
        let time_s = std_duration_to_seconds(self.clock_origin.elapsed());

        self.update_at(time_s, v_err_ms, dv_err_mss, w_cmd_rads)
    }

    /// Run one tick at the given monotonic time.
    ///
    /// Returns `(throttle, steer)`.
    pub fn update_at(
        &mut self,
        time_s: f64,
        v_err_ms: f64,
        dv_err_mss: Option<f64>,
        w_cmd_rads: f64,
    ) -> (f64, f64) {
        let (output, _) = self.tick(&InputData {
            time_s,
            v_err_ms,
            dv_err_mss,
            w_cmd_rads,
        });

        (output.throttle, output.steer)
    }

    /// Run one tick, returning the demands and the status report.
    pub fn tick(&mut self, input: &InputData) -> (OutputData, StatusReport) {
        let mut report = StatusReport::default();

        // Use the given rate if there is one, otherwise derive it
        report.dv_err_mss = match input.dv_err_mss {
            Some(dv) => dv,
            None => {
                report.dv_err_derived = true;
                self.derive_rate(input.time_s, input.v_err_ms)
            }
        };

        self.prev_sample = Some(ErrSample {
            time_s: input.time_s,
            v_err_ms: input.v_err_ms,
        });

        // Normalise and fuzzify
        let e = normalise(input.v_err_ms, self.params.v_max_ms);
        let de = normalise(report.dv_err_mss, self.params.v_max_ms);
        let w = normalise(input.w_cmd_rads, self.params.w_max_rads);

        let throttle_inputs = (VEL_ERR.fuzzify(e), RATE_ERR.fuzzify(de));
        let steer_inputs = (ANG_CMD.fuzzify(w),);

        let throttle = THROTTLE.eval(&throttle_inputs, self.params.throttle_limit);
        let steer = STEER.eval(&steer_inputs, self.params.steer_limit);

        report.throttle_fired = throttle.fired;
        report.throttle_limited = throttle.limited;
        report.steer_fired = steer.fired;
        report.steer_limited = steer.limited;

        if !throttle.fired {
            debug!(
                "No throttle rule fired (e = {:.3} mostly {}, de = {:.3} mostly {}), coasting",
                e,
                throttle_inputs.0.dominant().name(),
                de,
                throttle_inputs.1.dominant().name()
            );
        }
        if !steer.fired {
            debug!("No steering rule fired (w = {:.3}), centring", w);
        }

        let output = OutputData {
            time_s: input.time_s,
            throttle: throttle.value,
            steer: steer.value,
        };

        trace!(
            "FuzzyCtrl: e = {:.3}, de = {:.3}, w = {:.3} -> throttle = {:.3}, steer = {:.3}",
            e,
            de,
            w,
            output.throttle,
            output.steer
        );

        self.input = *input;
        self.output = output;
        self.report = report;

        (output, report)
    }

    /// Drop the derivative history, the next derived rate will be zero.
    pub fn reset(&mut self) {
        self.prev_sample = None;
    }

    /// Finite difference of the velocity error since the previous tick.
    fn derive_rate(&self, time_s: f64, v_err_ms: f64) -> f64 {
        match self.prev_sample {
            Some(prev) => {
                let dt = (time_s - prev.time_s).max(MIN_DERIV_DT_S);
                (v_err_ms - prev.v_err_ms) / dt
            }
            None => 0.0,
        }
    }
}

impl State for FuzzyCtrl {
    type InitData = &'static str;
    type InitError = FuzzyCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = FuzzyCtrlError;

    /// Initialise the FuzzyCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data).map_err(FuzzyCtrlError::ParamLoadError)?;

        *self = Self::new(params)?;

        self.arch_input = Archiver::from_path(session, "fuzzy_ctrl/input.csv")
            .map_err(FuzzyCtrlError::ArchiveInitError)?;
        self.arch_output = Archiver::from_path(session, "fuzzy_ctrl/output.csv")
            .map_err(FuzzyCtrlError::ArchiveInitError)?;
        self.arch_report = Archiver::from_path(session, "fuzzy_ctrl/status_report.csv")
            .map_err(FuzzyCtrlError::ArchiveInitError)?;

        Ok(())
    }

    /// Perform cyclic processing of FuzzyCtrl.
    ///
    /// Processing never fails once the module is initialised.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        Ok(self.tick(input_data))
    }

    fn make_safe(&mut self) {
        self.reset();
    }
}

impl Archived for FuzzyCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_input.serialise(self.input)?;
        self.arch_output.serialise(self.output)?;
        self.arch_report.serialise(self.report)?;

        Ok(())
    }
}
