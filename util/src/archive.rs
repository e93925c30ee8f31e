//! Struct archiving functionality
//!
//! To add archiving functionality to a struct implement the `Archived` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
///
/// A default constructed archiver is disabled and silently discards records,
/// which allows modules to be used without a session (in tests for example).
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file: {0}")]
    CreateError(std::io::Error),

    #[error("Cannot write the archive record: {0}")]
    WriteError(csv::Error),

    #[error("Cannot flush the archive file: {0}")]
    FlushError(std::io::Error),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a timestamped csv.
///
/// To implement this trait, the struct shall have an `Archiver` member per
/// archive file, which shall be setup in the struct's `init` function. Each
/// archived record must be flat (no nested structs) and should carry its own
/// `time_s` field.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), ArchiveError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root.
    ///
    /// Any missing parent directories are created.
    pub fn from_path<P: AsRef<Path>>(session: &Session, path: P) -> Result<Self, ArchiveError> {
        let session_path = session.arch_root.join(path);

        if let Some(parent) = session_path.parent() {
            std::fs::create_dir_all(parent).map_err(ArchiveError::CreateError)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(session_path)
            .map_err(ArchiveError::CreateError)?;

        let w = WriterBuilder::new().has_headers(true).from_writer(file);

        Ok(Self { writer: Some(w) })
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), ArchiveError> {
        if let Some(ref mut w) = self.writer {
            w.serialize(record).map_err(ArchiveError::WriteError)?;
            w.flush().map_err(ArchiveError::FlushError)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[derive(Serialize)]
    struct Record {
        time_s: f64,
        rate: Option<f64>,
        fired: bool,
    }

    fn session_in(root: PathBuf) -> Session {
        Session {
            arch_root: root.join("arch"),
            log_file_path: root.join("test.log"),
            session_root: root,
        }
    }

    #[test]
    fn test_archive_csv() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path().to_path_buf());

        // Parent directories are created as needed
        let mut arch = Archiver::from_path(&session, "module/output.csv").unwrap();

        arch.serialise(Record {
            time_s: 0.0,
            rate: None,
            fired: false,
        })
        .unwrap();
        arch.serialise(Record {
            time_s: 0.1,
            rate: Some(0.2),
            fired: true,
        })
        .unwrap();

        let contents =
            std::fs::read_to_string(session.arch_root.join("module/output.csv")).unwrap();

        assert_eq!(contents, "time_s,rate,fired\n0.0,,false\n0.1,0.2,true\n");
    }

    #[test]
    fn test_disabled_archive() {
        let mut arch = Archiver::default();

        assert!(arch
            .serialise(Record {
                time_s: 0.0,
                rate: Some(1.0),
                fired: true,
            })
            .is_ok());
    }
}
