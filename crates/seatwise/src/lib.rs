//! `seatwise` - A seat and passenger registry for a single flight
//!
//! This library keeps passengers on as many 30x6 planes as the flight needs,
//! assigns seats by class, and persists the registry to CSV. Two storage
//! backends, a fixed-capacity array and a linked list, sit behind one trait.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod passenger;
pub mod registry;
pub mod report;
pub mod seat;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use grid::{Occupancy, SeatGrid};
pub use logging::init_logging;
pub use passenger::PassengerRecord;
pub use registry::{Assignment, ImportOutcome, PlaneRegistry, ReservationRequest, SeatRequest};
pub use report::{Manifest, ManifestFilter, RegistryStats};
pub use seat::{SeatClass, SeatPosition};
pub use storage::{ConflictPolicy, CsvGateway, LoadOutcome, LoadReport};
pub use store::{PassengerStore, StoreKind};
