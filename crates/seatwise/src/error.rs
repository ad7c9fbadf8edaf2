//! Error types for seatwise.
//!
//! This module defines every error the registry core can return. All of them
//! are recoverable by the caller; the core never aborts and never prints.

use std::path::PathBuf;
use thiserror::Error;

use crate::seat::{SeatClass, SeatPosition};

/// The main error type for seatwise operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Reservation Errors ===
    /// A passenger with this ID is already registered on some plane.
    #[error("passenger ID '{passenger_id}' already exists")]
    DuplicateId {
        /// The conflicting passenger ID.
        passenger_id: String,
    },

    /// A passenger with this name is already registered.
    #[error("passenger name '{name}' already exists")]
    DuplicateName {
        /// The conflicting passenger name.
        name: String,
    },

    /// The requested seat is already taken.
    #[error("seat {seat} is already occupied on plane #{plane}")]
    SeatOccupied {
        /// Plane the seat belongs to.
        plane: u32,
        /// The occupied seat.
        seat: SeatPosition,
    },

    /// Attempted to release a seat that nobody holds.
    #[error("seat {seat} is not occupied on plane #{plane}")]
    SeatNotOccupied {
        /// Plane the seat belongs to.
        plane: u32,
        /// The free seat.
        seat: SeatPosition,
    },

    /// The seat lies outside the row range of the requested class.
    #[error("seat {seat} does not belong to {class} class")]
    ClassMismatch {
        /// The requested seat.
        seat: SeatPosition,
        /// The requested class.
        class: SeatClass,
    },

    /// The class label is not First, Business, or Economy.
    #[error("invalid passenger class '{input}': must be First, Business, or Economy")]
    InvalidClass {
        /// The rejected input.
        input: String,
    },

    /// Row or column index outside the seating grid.
    #[error("seat index out of range: row {row}, column {column}")]
    InvalidSeatIndex {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },

    /// A seat label such as `12C` could not be parsed.
    #[error("invalid seat label '{input}': expected a row number followed by a column letter A-F")]
    InvalidSeatLabel {
        /// The rejected input.
        input: String,
    },

    /// A required text field was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the field.
        field: &'static str,
    },

    // === Capacity Errors ===
    /// The fixed-capacity passenger array of a plane is full.
    #[error("plane #{plane} is at capacity ({capacity} passengers)")]
    CapacityExceeded {
        /// The full plane.
        plane: u32,
        /// Its configured capacity.
        capacity: usize,
    },

    /// A new plane would exceed the configured ceiling.
    #[error("registry is full: no more than {max_planes} planes allowed")]
    RegistryFull {
        /// The configured plane ceiling.
        max_planes: u32,
    },

    // === Lookup Errors ===
    /// No passenger with this ID.
    #[error("passenger ID '{passenger_id}' not found")]
    NotFound {
        /// The missing passenger ID.
        passenger_id: String,
    },

    /// The plane number does not exist in the registry.
    #[error("plane #{plane} does not exist")]
    PlaneNotFound {
        /// The missing plane number.
        plane: u32,
    },

    // === Storage Errors ===
    /// Failed to open or create the CSV file.
    #[error("failed to open CSV file {path}: {source}")]
    CsvOpen {
        /// Path to the CSV file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the CSV file failed partway through.
    #[error("CSV read failed at line {line}: {source}")]
    CsvRead {
        /// Line being read when the reader failed.
        line: usize,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Writing the CSV file failed.
    #[error("CSV write failed: {0}")]
    CsvWrite(#[from] csv::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for seatwise operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for a passenger ID.
    #[must_use]
    pub fn not_found(passenger_id: impl Into<String>) -> Self {
        Self::NotFound {
            passenger_id: passenger_id.into(),
        }
    }

    /// Create a duplicate-ID error.
    #[must_use]
    pub fn duplicate_id(passenger_id: impl Into<String>) -> Self {
        Self::DuplicateId {
            passenger_id: passenger_id.into(),
        }
    }

    /// Create a duplicate-name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create an invalid-class error.
    #[must_use]
    pub fn invalid_class(input: impl Into<String>) -> Self {
        Self::InvalidClass {
            input: input.into(),
        }
    }

    /// Check if this error means the passenger does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a uniqueness or occupancy conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. } | Self::DuplicateName { .. } | Self::SeatOccupied { .. }
        )
    }

    /// Check if this error is caused by running out of room.
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::RegistryFull { .. }
        )
    }
}
