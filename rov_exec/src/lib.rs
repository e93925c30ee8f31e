//! # Rover library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the rover crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - all data shared between modules of the executable
pub mod data_store;

/// Drive simulation - first order model of the drive, used in place of velocity sensing
#[cfg(feature = "sim")]
pub mod drive_sim;

/// Fuzzy drive control module - converts velocity errors and turn commands into throttle and
/// steering demands
pub mod fuzzy_ctrl;

/// Mechanisms interface - the boundary between drive demands and the hardware
pub mod mech_if;

/// Executable parameters
pub mod params;

// ------------------------------------------------------------------------------------------------
// TEST UTILITIES
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_util {
    use std::{fs, path::PathBuf, sync::Once};
    use util::session::Session;

    /// Parameter files available under the test software root.
    const PARAM_FILES: [(&str, &str); 4] = [
        (
            "fuzzy_ctrl.toml",
            "v_max_ms = 2.0\nw_max_rads = 1.5\nsample_time_s = 0.05\n\
             throttle_limit = 1.0\nsteer_limit = 1.0\n",
        ),
        (
            "fuzzy_ctrl_zero_v_max.toml",
            "v_max_ms = 0.0\nw_max_rads = 1.5\nsample_time_s = 0.05\n\
             throttle_limit = 1.0\nsteer_limit = 1.0\n",
        ),
        (
            "drive_sim.toml",
            "max_speed_ms = 1.0\nspeed_time_const_s = 0.5\n\
             max_turn_rate_rads = 1.0\nturn_time_const_s = 0.3\n",
        ),
        (
            "drive_sim_negative_tau.toml",
            "max_speed_ms = 1.0\nspeed_time_const_s = 0.5\n\
             max_turn_rate_rads = 1.0\nturn_time_const_s = -0.3\n",
        ),
    ];

    static SW_ROOT: Once = Once::new();

    /// Point the software root at a temporary directory holding the test parameter files.
    ///
    /// The root is set once per process so tests running in parallel agree on it.
    pub fn sw_root() -> PathBuf {
        SW_ROOT.call_once(|| {
            let root = tempfile::tempdir().unwrap().keep();
            let params = root.join("params");
            fs::create_dir_all(&params).unwrap();

            for (name, contents) in PARAM_FILES.iter() {
                fs::write(params.join(name), contents).unwrap();
            }

            std::env::set_var(util::host::SW_ROOT_ENV_VAR, &root);
        });

        util::host::get_sw_root().unwrap()
    }

    /// A session rooted in the given directory, without starting the session clock.
    pub fn session_in(dir: &tempfile::TempDir) -> Session {
        let root = dir.path().to_path_buf();

        Session {
            arch_root: root.join("arch"),
            log_file_path: root.join("test.log"),
            session_root: root,
        }
    }
}
