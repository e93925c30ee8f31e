//! Main rover-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Drive demand acquisition from the demand script
//!         - Demand timeout monitoring (safe mode)
//!         - Velocity sensing (simulated drive)
//!         - Fuzzy drive control processing
//!         - Actuator demands
//!         - Archiving
//!
//! # Modules
//!
//! All modules (e.g. `fuzzy_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use rov_lib::{
    data_store::{DataStore, SafeModeCause},
    mech_if::{Actuator, DriveDemand, DriveDems, LogActuator},
    params::RovExecParams,
};
#[cfg(feature = "sim")]
use rov_lib::drive_sim;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, error, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{Pending, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("rov_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Rover Drive Control Executable\n");
    info!("Running on: {}", host::get_platform());
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: RovExecParams =
        util::params::load("rov_exec.toml").wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- LOAD DEMAND SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let script_path = script_path_from_args(&args)?;

    info!("Loading script from \"{}\"", script_path);

    let mut script: ScriptInterpreter<DriveDemand> =
        ScriptInterpreter::new(script_path).wrap_err("Failed to load script")?;

    info!(
        "Loaded script {:?} lasts {:.02} s and contains {} demands\n",
        script.get_path(),
        script.get_duration(),
        script.get_num_cmds()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.fuzzy_ctrl
        .init("fuzzy_ctrl.toml", &session)
        .wrap_err("Failed to initialise FuzzyCtrl")?;
    info!("FuzzyCtrl init complete");

    #[cfg(feature = "sim")]
    {
        ds.drive_sim
            .init("drive_sim.toml", &session)
            .wrap_err("Failed to initialise DriveSim")?;
        info!("DriveSim init complete");
    }
    #[cfg(not(feature = "sim"))]
    warn!("No velocity source available, the measured velocity is taken as zero");

    let mut actuator = LogActuator::default();
    info!("LogActuator initialised");

    info!("Module initialisation complete\n");

    // Cycle timing is set by the controller's sample time
    let cycle_period = Duration::from_secs_f64(ds.fuzzy_ctrl.params().sample_time_s);
    info!("Cycle period: {:.03} s", cycle_period.as_secs_f64());

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(session::get_elapsed_seconds());

        // ---- DEMAND PROCESSING ----

        match script.get_pending_at(ds.time_s) {
            Pending::None => (),
            Pending::Some(demands) => {
                // Only the latest demand matters
                if let Some(d) = demands.last() {
                    debug!("New demand: {:?}", d);
                    ds.set_demand(*d);
                }
            }
            // Exit if end of script reached
            Pending::EndOfScript => {
                info!("End of demand script reached, stopping");
                break;
            }
        }

        if ds.check_demand_timeout(exec_params.demand_timeout_s) {
            actuator
                .make_safe()
                .wrap_err("Could not make the actuator safe")?;
        }

        // ---- VELOCITY SENSING ----

        #[cfg(feature = "sim")]
        let v_meas_ms = ds.drive_sim.v_meas_ms();
        #[cfg(not(feature = "sim"))]
        let v_meas_ms = 0.0;

        // ---- CONTROL ALGORITHM PROCESSING ----

        if !ds.safe {
            ds.build_fuzzy_ctrl_input(v_meas_ms);

            match ds.fuzzy_ctrl.proc(&ds.fuzzy_ctrl_input) {
                Ok((o, r)) => {
                    ds.fuzzy_ctrl_output = o;
                    ds.fuzzy_ctrl_status_rpt = r;
                    ds.drive_dems = DriveDems {
                        throttle: o.throttle,
                        steer: o.steer,
                    };
                }
                Err(e) => warn!("Error during FuzzyCtrl processing: {}", e),
            }

            // Send demands to the actuator, faults latch safe mode until restart
            match actuator.apply(&ds.drive_dems) {
                Ok(()) => (),
                Err(e) => {
                    error!("Actuator rejected the demands: {}", e);
                    ds.make_safe(SafeModeCause::ActuatorError);
                    actuator
                        .make_safe()
                        .wrap_err("Could not make the actuator safe")?;
                }
            }
        }

        // ---- SIMULATION ----

        #[cfg(feature = "sim")]
        match ds.drive_sim.proc(&drive_sim::InputData {
            time_s: ds.time_s,
            dems: ds.drive_dems,
        }) {
            Ok((o, _)) => ds.drive_sim_output = o,
            Err(e) => warn!("Error during DriveSim processing: {}", e),
        }

        // ---- WRITE ARCHIVES ----

        if !ds.safe {
            ds.fuzzy_ctrl
                .write()
                .wrap_err("Failed to write FuzzyCtrl archives")?;
        }

        #[cfg(feature = "sim")]
        ds.drive_sim
            .write()
            .wrap_err("Failed to write DriveSim archives")?;

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;

                // If number of overruns greater than the limit exit
                if ds.num_consec_cycle_overruns > exec_params.max_consec_cycle_overruns {
                    raise_error!(
                        "More than {} consecutive cycle overruns!",
                        exec_params.max_consec_cycle_overruns
                    );
                }
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    actuator
        .make_safe()
        .wrap_err("Could not make the actuator safe")?;

    info!(
        "End of execution after {} cycles, {} demands applied",
        ds.num_cycles,
        actuator.num_applied()
    );

    Ok(())
}

/// Get the demand script path, the only expected argument.
fn script_path_from_args(args: &[String]) -> Result<&str, Report> {
    match args {
        [_, path] => Ok(path.as_str()),
        _ => Err(eyre!(
            "Expected one argument (the demand script path), found {}",
            args.len().saturating_sub(1)
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_script_path_from_args() {
        let args = vec!["rov_exec".to_string(), "scripts/drive_demo.txt".to_string()];
        assert_eq!(script_path_from_args(&args).unwrap(), "scripts/drive_demo.txt");

        assert!(script_path_from_args(&["rov_exec".to_string()]).is_err());
        assert!(script_path_from_args(&[]).is_err());
        assert!(script_path_from_args(&[args.clone(), args.clone()].concat()).is_err());
    }
}
