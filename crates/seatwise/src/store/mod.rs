//! Passenger storage backends.
//!
//! Two interchangeable implementations of [`PassengerStore`]:
//!
//! - [`ArrayStore`]: one fixed-capacity slot array plus one [`SeatGrid`] per
//!   plane. O(1) append and seat checks, O(n) shifting delete.
//! - [`ListStore`]: one singly linked list for every plane, each record
//!   tagged with its plane number. O(1) append and head delete, O(n) seat
//!   checks and general delete.
//!
//! The backend is chosen once, at construction, through [`StoreKind`].

mod array;
mod list;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::SeatGrid;
use crate::passenger::PassengerRecord;
use crate::seat::{SeatPosition, SEATS_PER_PLANE, SEAT_COLUMNS};

pub use array::{ArrayStore, PassengerArray};
pub use list::{ListStore, PassengerList};

/// Which backend a registry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Fixed-capacity arrays with per-plane grids.
    #[default]
    Array,
    /// Arena-backed singly linked list.
    List,
}

impl StoreKind {
    /// Build an empty store of this kind.
    ///
    /// `plane_capacity` bounds each plane's passenger array; the list backend
    /// ignores it.
    #[must_use]
    pub fn build(self, plane_capacity: usize) -> Box<dyn PassengerStore> {
        match self {
            Self::Array => Box::new(ArrayStore::new(plane_capacity)),
            Self::List => Box::new(ListStore::new()),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => write!(f, "array"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Whether an insert must reject a name that is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    /// Accept repeated names (bulk load).
    Skip,
    /// Reject a name held by any passenger on any plane, ignoring case.
    Global,
}

/// The capability both backends provide.
///
/// Plane numbers are 1-based. Implementations validate everything before
/// mutating, so a failed call leaves the store exactly as it was.
pub trait PassengerStore: fmt::Debug {
    /// Which backend this is.
    fn kind(&self) -> StoreKind;

    /// Number of planes currently in use.
    fn plane_count(&self) -> u32;

    /// Open a new, empty plane and return its number.
    fn add_plane(&mut self) -> u32;

    /// Whether the plane can take another passenger at all.
    fn has_room(&self, plane: u32) -> bool;

    /// Register a passenger on `record.plane` at `record.seat`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`], [`Error::CapacityExceeded`],
    /// [`Error::DuplicateId`], [`Error::DuplicateName`] (only with
    /// [`NameCheck::Global`]) or [`Error::SeatOccupied`].
    fn insert(&mut self, record: PassengerRecord, names: NameCheck) -> Result<()>;

    /// Remove a passenger by ID and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no passenger has this ID.
    fn cancel(&mut self, passenger_id: &str) -> Result<PassengerRecord>;

    /// Put `record` in place of whoever holds its seat, returning the
    /// displaced record. The replacement keeps the displaced record's
    /// position in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`], [`Error::SeatNotOccupied`] if the seat
    /// is free, or [`Error::DuplicateId`] if the new ID belongs to someone
    /// else.
    fn replace_at_seat(&mut self, record: PassengerRecord) -> Result<PassengerRecord>;

    /// Whether a seat on a plane is held.
    fn is_seat_occupied(&self, plane: u32, seat: SeatPosition) -> bool;

    /// Number of active passengers.
    fn len(&self) -> usize;

    /// Every active record in storage order.
    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_>;

    /// Occupancy grid for one plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`] if the plane does not exist.
    fn seat_grid(&self, plane: u32) -> Result<SeatGrid>;

    /// Whether the store holds no passengers.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that a plane number is in use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`] otherwise.
    fn check_plane(&self, plane: u32) -> Result<()> {
        if plane == 0 || plane > self.plane_count() {
            return Err(Error::PlaneNotFound { plane });
        }
        Ok(())
    }

    /// Linear search by ID.
    fn find_by_id(&self, passenger_id: &str) -> Option<&PassengerRecord> {
        self.records().find(|r| r.passenger_id == passenger_id)
    }

    /// Linear search by seat.
    fn find_by_seat(&self, plane: u32, seat: SeatPosition) -> Option<&PassengerRecord> {
        self.records().find(|r| r.occupies(plane, seat))
    }

    /// Linear, case-insensitive search by name. Returns the first match.
    fn find_by_name(&self, name: &str) -> Option<&PassengerRecord> {
        self.records().find(|r| r.name_matches(name))
    }

    /// Next free numeric ID: one more than the highest numeric ID, never
    /// below `floor + 1`. Non-numeric IDs are ignored.
    fn next_id(&self, floor: u64) -> String {
        let highest = self
            .records()
            .filter_map(PassengerRecord::numeric_id)
            .fold(floor, u64::max);
        highest.saturating_add(1).to_string()
    }

    /// Dense seat-indexed view of one plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`] if the plane does not exist.
    fn snapshot(&self, plane: u32) -> Result<PlaneSnapshot> {
        self.check_plane(plane)?;
        let mut snapshot = PlaneSnapshot::empty(plane);
        for record in self.records().filter(|r| r.plane == plane) {
            snapshot.place(record.clone());
        }
        Ok(snapshot)
    }
}

/// Every seat of one plane, with the passenger holding it if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneSnapshot {
    plane: u32,
    seats: Vec<Option<PassengerRecord>>,
}

impl PlaneSnapshot {
    fn empty(plane: u32) -> Self {
        Self {
            plane,
            seats: vec![None; SEATS_PER_PLANE],
        }
    }

    fn place(&mut self, record: PassengerRecord) {
        let index = Self::index(record.seat);
        self.seats[index] = Some(record);
    }

    fn index(seat: SeatPosition) -> usize {
        seat.row() * SEAT_COLUMNS + seat.column()
    }

    /// Plane number.
    #[must_use]
    pub fn plane(&self) -> u32 {
        self.plane
    }

    /// Passenger on a seat.
    #[must_use]
    pub fn get(&self, seat: SeatPosition) -> Option<&PassengerRecord> {
        self.seats[Self::index(seat)].as_ref()
    }

    /// Passengers in seat order, front row first.
    pub fn passengers(&self) -> impl Iterator<Item = &PassengerRecord> {
        self.seats.iter().flatten()
    }

    /// Number of occupied seats.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.passengers().count()
    }
}
