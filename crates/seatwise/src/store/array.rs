//! Array backend: fixed-capacity slots plus a seat grid for every plane.

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::SeatGrid;
use crate::passenger::PassengerRecord;
use crate::seat::SeatPosition;

use super::{NameCheck, PassengerStore, StoreKind};

/// Fixed-capacity, insertion-ordered passenger array for one plane.
///
/// Active records always occupy the prefix `slots[..len]`; an empty slot is
/// `None`. Appends are O(1). Removal shifts every later record left by one,
/// so iteration order is always insertion order.
#[derive(Debug, Clone)]
pub struct PassengerArray {
    slots: Box<[Option<PassengerRecord>]>,
    len: usize,
}

impl PassengerArray {
    /// Create an empty array holding at most `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Maximum number of records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of active records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no record is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append a record after the last active one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the array is full.
    pub fn push(&mut self, record: PassengerRecord) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                plane: record.plane,
                capacity: self.capacity(),
            });
        }
        self.slots[self.len] = Some(record);
        self.len += 1;
        Ok(())
    }

    /// Index of the first active record matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&PassengerRecord) -> bool) -> Option<usize> {
        self.iter().position(|r| pred(r))
    }

    /// Remove the record at `index`, shifting everything after it left.
    pub fn remove(&mut self, index: usize) -> Option<PassengerRecord> {
        if index >= self.len {
            return None;
        }
        let removed = self.slots[index].take();
        // O(n) shift: the emptied slot travels to the end of the active prefix.
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        removed
    }

    /// Swap in a new record at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, record: PassengerRecord) -> Option<PassengerRecord> {
        if index >= self.len {
            return None;
        }
        self.slots[index].replace(record)
    }

    /// Active records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PassengerRecord> {
        self.slots[..self.len].iter().flatten()
    }
}

/// One plane of the array backend.
#[derive(Debug, Clone)]
struct ArrayPlane {
    grid: SeatGrid,
    passengers: PassengerArray,
}

/// Array-backed [`PassengerStore`].
#[derive(Debug, Clone)]
pub struct ArrayStore {
    plane_capacity: usize,
    planes: Vec<ArrayPlane>,
}

impl ArrayStore {
    /// Create a store with no planes. Each plane added later holds at most
    /// `plane_capacity` passengers.
    #[must_use]
    pub fn new(plane_capacity: usize) -> Self {
        Self {
            plane_capacity,
            planes: Vec::new(),
        }
    }

    fn plane(&self, plane: u32) -> Result<&ArrayPlane> {
        self.check_plane(plane)?;
        Ok(&self.planes[Self::index(plane)])
    }

    fn plane_mut(&mut self, plane: u32) -> Result<&mut ArrayPlane> {
        self.check_plane(plane)?;
        Ok(&mut self.planes[Self::index(plane)])
    }

    fn index(plane: u32) -> usize {
        plane as usize - 1
    }

    /// Locate a passenger as (plane index, slot index).
    fn locate(&self, passenger_id: &str) -> Option<(usize, usize)> {
        self.planes.iter().enumerate().find_map(|(plane_index, plane)| {
            plane
                .passengers
                .position(|r| r.passenger_id == passenger_id)
                .map(|slot| (plane_index, slot))
        })
    }
}

impl PassengerStore for ArrayStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Array
    }

    fn plane_count(&self) -> u32 {
        u32::try_from(self.planes.len()).unwrap_or(u32::MAX)
    }

    fn add_plane(&mut self) -> u32 {
        let number = self.plane_count() + 1;
        self.planes.push(ArrayPlane {
            grid: SeatGrid::new(number),
            passengers: PassengerArray::with_capacity(self.plane_capacity),
        });
        debug!("Opened plane #{} with capacity {}", number, self.plane_capacity);
        number
    }

    fn has_room(&self, plane: u32) -> bool {
        self.plane(plane).is_ok_and(|p| !p.passengers.is_full())
    }

    fn insert(&mut self, record: PassengerRecord, names: NameCheck) -> Result<()> {
        let target = self.plane(record.plane)?;
        if target.passengers.is_full() {
            return Err(Error::CapacityExceeded {
                plane: record.plane,
                capacity: target.passengers.capacity(),
            });
        }
        if self.find_by_id(&record.passenger_id).is_some() {
            return Err(Error::duplicate_id(&record.passenger_id));
        }
        if names == NameCheck::Global && self.find_by_name(&record.passenger_name).is_some() {
            return Err(Error::duplicate_name(&record.passenger_name));
        }
        if !target.grid.is_available(record.seat) {
            return Err(Error::SeatOccupied {
                plane: record.plane,
                seat: record.seat,
            });
        }

        let seat = record.seat;
        let plane = self.plane_mut(record.plane)?;
        plane.passengers.push(record)?;
        plane.grid.allocate(seat)
    }

    fn cancel(&mut self, passenger_id: &str) -> Result<PassengerRecord> {
        let (plane_index, slot) = self
            .locate(passenger_id)
            .ok_or_else(|| Error::not_found(passenger_id))?;
        let plane = &mut self.planes[plane_index];

        if let Some(record) = plane.passengers.iter().nth(slot) {
            plane.grid.deallocate(record.seat)?;
        }
        plane
            .passengers
            .remove(slot)
            .ok_or_else(|| Error::not_found(passenger_id))
    }

    fn replace_at_seat(&mut self, record: PassengerRecord) -> Result<PassengerRecord> {
        let (plane_number, seat) = (record.plane, record.seat);
        let target = self.plane(plane_number)?;
        let slot = target
            .passengers
            .position(|r| r.seat == seat)
            .ok_or(Error::SeatNotOccupied {
                plane: plane_number,
                seat,
            })?;
        if let Some(holder) = self.find_by_id(&record.passenger_id) {
            if !holder.occupies(plane_number, seat) {
                return Err(Error::duplicate_id(&record.passenger_id));
            }
        }

        self.plane_mut(plane_number)?
            .passengers
            .replace(slot, record)
            .ok_or(Error::SeatNotOccupied {
                plane: plane_number,
                seat,
            })
    }

    fn is_seat_occupied(&self, plane: u32, seat: SeatPosition) -> bool {
        self.plane(plane).is_ok_and(|p| !p.grid.is_available(seat))
    }

    fn len(&self) -> usize {
        self.planes.iter().map(|p| p.passengers.len()).sum()
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_> {
        Box::new(self.planes.iter().flat_map(|p| p.passengers.iter()))
    }

    fn seat_grid(&self, plane: u32) -> Result<SeatGrid> {
        self.plane(plane).map(|p| p.grid.clone())
    }

    fn find_by_seat(&self, plane: u32, seat: SeatPosition) -> Option<&PassengerRecord> {
        let target = self.plane(plane).ok()?;
        if target.grid.is_available(seat) {
            return None;
        }
        target.passengers.iter().find(|r| r.seat == seat)
    }
}
