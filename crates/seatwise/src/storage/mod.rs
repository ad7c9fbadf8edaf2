//! Storage layer for seatwise.
//!
//! This module persists the registry as a single CSV file. Loading is
//! forgiving: unreadable lines are counted and skipped, and a missing file
//! just means an empty registry. Saving rewrites the whole file.

pub mod schema;

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::registry::{ImportOutcome, PlaneRegistry};

/// What to do when a CSV line claims a seat that an earlier line already took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The later line replaces the earlier booking on plane 1.
    Overwrite,
    /// The later line is dropped.
    Skip,
    /// The later line goes to the lowest plane where the seat is free.
    Overflow,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Skip => write!(f, "skip"),
            Self::Overflow => write!(f, "overflow"),
        }
    }
}

/// Counters from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Lines stored, on any plane.
    pub loaded: usize,
    /// Lines that replaced an earlier booking of the same seat.
    pub replaced: usize,
    /// Lines dropped because the seat was taken.
    pub duplicate_seats: usize,
    /// Lines dropped because the ID was already loaded.
    pub duplicate_ids: usize,
    /// Lines that could not be parsed.
    pub malformed: usize,
    /// Stored lines that landed on a plane other than 1.
    pub overflowed: usize,
    /// Lines dropped because no plane could take them.
    pub rejected: usize,
}

impl LoadReport {
    /// Lines that were not stored.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.duplicate_seats + self.duplicate_ids + self.malformed + self.rejected
    }

    fn record(&mut self, outcome: &ImportOutcome) {
        match outcome {
            ImportOutcome::Inserted { plane } => {
                self.loaded += 1;
                if *plane > 1 {
                    self.overflowed += 1;
                }
            }
            ImportOutcome::Replaced { .. } => self.replaced += 1,
            ImportOutcome::SkippedSeat => self.duplicate_seats += 1,
            ImportOutcome::SkippedDuplicateId => self.duplicate_ids += 1,
            ImportOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// Result of [`CsvGateway::load_into`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read.
    Loaded(LoadReport),
    /// The file could not be opened; the registry was left untouched.
    Unavailable {
        /// The file that was tried.
        path: PathBuf,
        /// Why it could not be opened.
        reason: String,
    },
}

/// Reads and writes the passenger CSV file.
#[derive(Debug, Clone)]
pub struct CsvGateway {
    /// Path to the CSV file.
    path: PathBuf,
}

impl CsvGateway {
    /// Create a gateway for the given file. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every line of the file into `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CsvRead`] only if reading fails partway through. A
    /// file that cannot be opened yields [`LoadOutcome::Unavailable`].
    pub fn load_into(
        &self,
        registry: &mut PlaneRegistry,
        policy: ConflictPolicy,
    ) -> Result<LoadOutcome> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    "Passenger file {} unavailable: {}",
                    self.path.display(),
                    err
                );
                return Ok(LoadOutcome::Unavailable {
                    path: self.path.clone(),
                    reason: err.to_string(),
                });
            }
        };

        let report = load_from_reader(file, registry, policy)?;
        info!(
            "Loaded {} passengers from {} ({} replaced, {} skipped)",
            report.loaded,
            self.path.display(),
            report.replaced,
            report.skipped()
        );
        Ok(LoadOutcome::Loaded(report))
    }

    /// Rewrite the file with every record in the registry.
    ///
    /// Creates the parent directories if they don't exist. Returns the number
    /// of records written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryCreate`], [`Error::CsvOpen`] or
    /// [`Error::CsvWrite`].
    pub fn save(&self, registry: &PlaneRegistry) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|source| Error::CsvOpen {
            path: self.path.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(schema::HEADER)?;

        let mut written = 0;
        for record in registry.records() {
            writer.write_record(schema::to_row(record))?;
            written += 1;
        }
        writer.flush()?;

        info!("Saved {} passengers to {}", written, self.path.display());
        Ok(written)
    }
}

/// Load CSV text from any reader. The first line is always treated as the
/// header.
///
/// # Errors
///
/// Returns [`Error::CsvRead`] if the underlying reader fails.
pub fn load_from_reader<R: Read>(
    reader: R,
    registry: &mut PlaneRegistry,
    policy: ConflictPolicy,
) -> Result<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for (index, line) in reader.records().enumerate() {
        // Line 1 is the header.
        let line_number = index + 2;
        let row = match line {
            Ok(row) => row,
            Err(err) if err.is_io_error() => {
                return Err(Error::CsvRead {
                    line: line_number,
                    source: err,
                })
            }
            Err(err) => {
                debug!("Skipping line {}: {}", line_number, err);
                report.malformed += 1;
                continue;
            }
        };

        let record = match schema::parse_row(&row) {
            Ok(record) => record,
            Err(problem) => {
                debug!("Skipping line {}: {}", line_number, problem);
                report.malformed += 1;
                continue;
            }
        };

        let outcome = registry.import(record, policy)?;
        match &outcome {
            ImportOutcome::Replaced { displaced } => debug!(
                "Line {} replaced {} on seat {}",
                line_number, displaced.passenger_id, displaced.seat
            ),
            ImportOutcome::SkippedSeat
            | ImportOutcome::SkippedDuplicateId
            | ImportOutcome::Rejected => {
                warn!("Skipping line {}: {:?}", line_number, outcome);
            }
            ImportOutcome::Inserted { .. } => {}
        }
        report.record(&outcome);
    }
    Ok(report)
}
