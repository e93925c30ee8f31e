//! # Demand script interpreter module
//!
//! This module provides an interpreter for timed demand scripts, allowing
//! commands to be replayed into the control loop from a file.
//!
//! A script is a sequence of entries of the form
//!
//! ```text
//! <exec_time_s>: <json payload>;
//! ```
//!
//! one per line. Anything not matching that form (comments, blank lines) is
//! ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct Command<T> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The payload to deliver
    payload: T,
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending_at`
/// to acquire a list of commands that need executing.
pub struct ScriptInterpreter<T> {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command<T>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Script timestamps must not decrease, found {1} s after {0} s")]
    UnorderedTimestamp(f64, f64),

    #[error("Script contains an invalid payload at {0} s: {1}")]
    InvalidPayload(f64, serde_json::Error),
}

pub enum Pending<T> {
    None,
    Some(Vec<T>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T> ScriptInterpreter<T>
where
    T: DeserializeOwned,
{
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let mut cmd_queue: VecDeque<Command<T>> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Parse the exec time
            let exec_time_s: f64 = cap[1]
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if let Some(prev) = cmd_queue.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::UnorderedTimestamp(prev.exec_time_s, exec_time_s));
                }
            }

            // Parse the payload, which is always JSON
            let payload: T = serde_json::from_str(&cap[3])
                .map_err(|e| ScriptError::InvalidPayload(exec_time_s, e))?;

            cmd_queue.push_back(Command {
                exec_time_s,
                payload,
            });
        }

        if cmd_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: cmd_queue,
        })
    }
}

impl<T> ScriptInterpreter<T> {
    /// Return all commands whose execution time is earlier than
    /// `current_time_s`.
    pub fn get_pending_at(&mut self, current_time_s: f64) -> Pending<T> {
        // If the queue is empty the script is over
        if self.cmds.is_empty() {
            return Pending::EndOfScript;
        }

        let mut pending: Vec<T> = vec![];

        // Keep popping from the head while its exec time has passed.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s >= current_time_s {
                break;
            }
            if let Some(cmd) = self.cmds.pop_front() {
                pending.push(cmd.payload);
            }
        }

        if pending.is_empty() {
            Pending::None
        } else {
            Pending::Some(pending)
        }
    }

    /// Get the number of commands remaining in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64,
        }
    }

    /// Get the path the script was loaded from, if any.
    pub fn get_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}
