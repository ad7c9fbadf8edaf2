//! Per-plane seat occupancy grid.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seat::{SeatClass, SeatPosition, SEAT_COLUMNS, SEAT_ROWS};

/// Occupancy marker for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    /// Nobody holds the seat.
    #[default]
    Available,
    /// A passenger holds the seat.
    Occupied,
}

impl Occupancy {
    /// Single-character marker used in seat maps.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Available => 'O',
            Self::Occupied => 'X',
        }
    }
}

/// Fixed 30x6 occupancy matrix for one plane.
///
/// All operations are O(1) except the counting scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    plane: u32,
    cells: [[Occupancy; SEAT_COLUMNS]; SEAT_ROWS],
}

impl SeatGrid {
    /// Create a grid for the given plane with every seat available.
    #[must_use]
    pub fn new(plane: u32) -> Self {
        Self {
            plane,
            cells: [[Occupancy::Available; SEAT_COLUMNS]; SEAT_ROWS],
        }
    }

    /// Plane this grid belongs to.
    #[must_use]
    pub fn plane(&self) -> u32 {
        self.plane
    }

    /// Mark every seat available.
    pub fn initialize(&mut self) {
        for row in &mut self.cells {
            row.fill(Occupancy::Available);
        }
    }

    /// Occupancy of a seat.
    #[must_use]
    pub fn get(&self, seat: SeatPosition) -> Occupancy {
        self.cells[seat.row()][seat.column()]
    }

    /// Check whether a seat is free.
    #[must_use]
    pub fn is_available(&self, seat: SeatPosition) -> bool {
        self.get(seat) == Occupancy::Available
    }

    /// Check a seat by raw zero-based indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeatIndex`] if the indices are outside the grid.
    pub fn is_available_at(&self, row: usize, column: usize) -> Result<bool> {
        SeatPosition::new(row, column).map(|seat| self.is_available(seat))
    }

    /// Mark a seat occupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatOccupied`] if the seat is already taken; the grid
    /// is left unchanged.
    pub fn allocate(&mut self, seat: SeatPosition) -> Result<()> {
        let cell = &mut self.cells[seat.row()][seat.column()];
        if *cell == Occupancy::Occupied {
            return Err(Error::SeatOccupied {
                plane: self.plane,
                seat,
            });
        }
        *cell = Occupancy::Occupied;
        Ok(())
    }

    /// Mark a seat available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatNotOccupied`] if the seat was already free.
    pub fn deallocate(&mut self, seat: SeatPosition) -> Result<()> {
        let cell = &mut self.cells[seat.row()][seat.column()];
        if *cell == Occupancy::Available {
            return Err(Error::SeatNotOccupied {
                plane: self.plane,
                seat,
            });
        }
        *cell = Occupancy::Available;
        Ok(())
    }

    /// Count free seats, optionally limited to one class's rows.
    #[must_use]
    pub fn count_available(&self, class: Option<SeatClass>) -> usize {
        let rows = class.map_or(0..=SEAT_ROWS - 1, SeatClass::rows);
        SeatPosition::iter_rows(rows)
            .filter(|seat| self.is_available(*seat))
            .count()
    }

    /// Count occupied seats on the whole plane.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Occupancy::Occupied)
            .count()
    }

    /// One row of markers, for rendering.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Occupancy; SEAT_COLUMNS]> {
        self.cells.get(row)
    }
}
