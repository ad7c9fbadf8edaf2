//! Passenger records.

use serde::{Deserialize, Serialize};

use crate::seat::{SeatClass, SeatPosition};

/// A single reservation.
///
/// The class always matches the seat row; [`PassengerRecord::new`] derives it
/// rather than trusting a caller-supplied label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Unique across every plane in the registry.
    pub passenger_id: String,

    /// Display name.
    pub passenger_name: String,

    /// Seat on the plane.
    pub seat: SeatPosition,

    /// Class implied by the seat row.
    pub class: SeatClass,

    /// 1-based plane number.
    pub plane: u32,
}

impl PassengerRecord {
    /// Create a record, deriving the class from the seat.
    #[must_use]
    pub fn new(
        passenger_id: impl Into<String>,
        passenger_name: impl Into<String>,
        seat: SeatPosition,
        plane: u32,
    ) -> Self {
        Self {
            passenger_id: passenger_id.into(),
            passenger_name: passenger_name.into(),
            seat,
            class: seat.class(),
            plane,
        }
    }

    /// Check whether this record holds the given seat on the given plane.
    #[must_use]
    pub fn occupies(&self, plane: u32, seat: SeatPosition) -> bool {
        self.plane == plane && self.seat == seat
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.passenger_name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Numeric value of the ID, if it is purely digits.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u64> {
        let id = self.passenger_id.as_str();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        id.parse().ok()
    }
}
