//! Durable snapshots of the roster and the credential list.
//!
//! The engine hands every snapshot to a [`PersistenceSink`]. [`FileSink`]
//! writes the files the payroll office reads; [`MemorySink`] keeps the
//! writes in memory for tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::RosterRecord;

/// File name of the roster snapshot.
pub const ROSTER_FILE: &str = "CurrentEmployeeDetails.csv";

/// File name of the credential snapshot.
pub const CREDENTIALS_FILE: &str = "PasswordFile.csv";

/// Destination for roster and credential snapshots.
pub trait PersistenceSink {
    /// Replaces the stored roster.
    fn write_roster(&mut self, records: &[RosterRecord]) -> PayrollResult<()>;

    /// Replaces the stored credential list.
    fn write_credentials(&mut self, credentials: &[String]) -> PayrollResult<()>;
}

/// Writes snapshots as line-per-record files in an output directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Creates a sink writing into `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_lines<I>(&self, file: &str, lines: I) -> PayrollResult<()>
    where
        I: IntoIterator<Item = String>,
    {
        let path = self.dir.join(file);
        let mut content = String::new();
        for line in lines {
            content.push_str(&line);
            content.push('\n');
        }

        fs::write(&path, content).map_err(|e| PayrollError::Persistence {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Snapshot written");
        Ok(())
    }
}

impl PersistenceSink for FileSink {
    fn write_roster(&mut self, records: &[RosterRecord]) -> PayrollResult<()> {
        self.write_lines(ROSTER_FILE, records.iter().map(RosterRecord::to_line))
    }

    fn write_credentials(&mut self, credentials: &[String]) -> PayrollResult<()> {
        self.write_lines(CREDENTIALS_FILE, credentials.iter().cloned())
    }
}

/// Everything a [`MemorySink`] has been asked to write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySnapshots {
    /// Each roster snapshot, oldest first.
    pub rosters: Vec<Vec<RosterRecord>>,
    /// Each credential snapshot, oldest first.
    pub credentials: Vec<Vec<String>>,
}

/// In-memory sink whose history can be inspected through a shared handle.
///
/// ```
/// use payroll_engine::persistence::{MemorySink, PersistenceSink};
///
/// let mut sink = MemorySink::default();
/// let handle = sink.clone();
/// sink.write_credentials(&["AoifeRyan123".to_string()]).unwrap();
/// assert_eq!(handle.snapshots().credentials.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySnapshots>>,
}

impl MemorySink {
    /// A copy of everything written so far.
    pub fn snapshots(&self) -> MemorySnapshots {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, f: impl FnOnce(&mut MemorySnapshots)) {
        match self.inner.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl PersistenceSink for MemorySink {
    fn write_roster(&mut self, records: &[RosterRecord]) -> PayrollResult<()> {
        self.record(|s| s.rosters.push(records.to_vec()));
        Ok(())
    }

    fn write_credentials(&mut self, credentials: &[String]) -> PayrollResult<()> {
        self.record(|s| s.credentials.push(credentials.to_vec()));
        Ok(())
    }
}
