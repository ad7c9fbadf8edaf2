//! Linked-list backend: one singly linked list shared by every plane.

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::SeatGrid;
use crate::passenger::PassengerRecord;
use crate::seat::{SeatPosition, SEATS_PER_PLANE};

use super::{NameCheck, PassengerStore, StoreKind};

#[derive(Debug, Clone)]
struct Node {
    record: PassengerRecord,
    next: Option<usize>,
}

/// Singly linked list of passengers, stored in an index arena.
///
/// Nodes live in a `Vec` and link by index. Removed slots go on a free list
/// and are reused by later appends. A tail index keeps `push_back` O(1).
#[derive(Debug, Clone, Default)]
pub struct PassengerList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl PassengerList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append at the tail.
    pub fn push_back(&mut self, record: PassengerRecord) {
        let node = Node { record, next: None };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.nodes[tail].as_mut()) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Unlink and return the first record matching `pred`.
    ///
    /// O(1) when the match is the head, O(n) otherwise.
    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&PassengerRecord) -> bool,
    ) -> Option<PassengerRecord> {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.nodes[index].as_ref()?;
            let next = node.next;
            if pred(&node.record) {
                return self.unlink(prev, index, next);
            }
            prev = Some(index);
            cursor = next;
        }
        None
    }

    fn unlink(
        &mut self,
        prev: Option<usize>,
        index: usize,
        next: Option<usize>,
    ) -> Option<PassengerRecord> {
        match prev.and_then(|p| self.nodes[p].as_mut()) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        if self.tail == Some(index) {
            self.tail = prev;
        }

        let node = self.nodes[index].take()?;
        self.free.push(index);
        self.len -= 1;
        Some(node.record)
    }

    /// Mutable access to the first record matching `pred`.
    pub fn find_mut(
        &mut self,
        mut pred: impl FnMut(&PassengerRecord) -> bool,
    ) -> Option<&mut PassengerRecord> {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.nodes[index].as_ref()?;
            let next = node.next;
            if pred(&node.record) {
                return self.nodes[index].as_mut().map(|n| &mut n.record);
            }
            cursor = next;
        }
        None
    }

    /// First record, if any.
    #[must_use]
    pub fn front(&self) -> Option<&PassengerRecord> {
        self.iter().next()
    }

    /// Records from head to tail.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Head-to-tail iterator over a [`PassengerList`].
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a PassengerList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PassengerRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a PassengerList {
    type Item = &'a PassengerRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// List-backed [`PassengerStore`].
///
/// Planes exist only as tags on records, so adding a plane is a counter bump.
/// Occupancy is always derived by scanning.
#[derive(Debug, Clone, Default)]
pub struct ListStore {
    list: PassengerList,
    planes: u32,
}

impl ListStore {
    /// Create a store with no planes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn count_on(&self, plane: u32) -> usize {
        self.list.iter().filter(|r| r.plane == plane).count()
    }
}

impl PassengerStore for ListStore {
    fn kind(&self) -> StoreKind {
        StoreKind::List
    }

    fn plane_count(&self) -> u32 {
        self.planes
    }

    fn add_plane(&mut self) -> u32 {
        self.planes += 1;
        debug!("Opened plane #{} on list backend", self.planes);
        self.planes
    }

    fn has_room(&self, plane: u32) -> bool {
        self.check_plane(plane).is_ok() && self.count_on(plane) < SEATS_PER_PLANE
    }

    fn insert(&mut self, record: PassengerRecord, names: NameCheck) -> Result<()> {
        self.check_plane(record.plane)?;
        if self.find_by_id(&record.passenger_id).is_some() {
            return Err(Error::duplicate_id(&record.passenger_id));
        }
        if names == NameCheck::Global && self.find_by_name(&record.passenger_name).is_some() {
            return Err(Error::duplicate_name(&record.passenger_name));
        }
        if self.is_seat_occupied(record.plane, record.seat) {
            return Err(Error::SeatOccupied {
                plane: record.plane,
                seat: record.seat,
            });
        }

        self.list.push_back(record);
        Ok(())
    }

    fn cancel(&mut self, passenger_id: &str) -> Result<PassengerRecord> {
        self.list
            .remove_where(|r| r.passenger_id == passenger_id)
            .ok_or_else(|| Error::not_found(passenger_id))
    }

    fn replace_at_seat(&mut self, record: PassengerRecord) -> Result<PassengerRecord> {
        let (plane, seat) = (record.plane, record.seat);
        self.check_plane(plane)?;
        if let Some(holder) = self.find_by_id(&record.passenger_id) {
            if !holder.occupies(plane, seat) {
                return Err(Error::duplicate_id(&record.passenger_id));
            }
        }

        let slot = self
            .list
            .find_mut(|r| r.occupies(plane, seat))
            .ok_or(Error::SeatNotOccupied { plane, seat })?;
        Ok(std::mem::replace(slot, record))
    }

    fn is_seat_occupied(&self, plane: u32, seat: SeatPosition) -> bool {
        self.list.iter().any(|r| r.occupies(plane, seat))
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_> {
        Box::new(self.list.iter())
    }

    fn seat_grid(&self, plane: u32) -> Result<SeatGrid> {
        self.check_plane(plane)?;
        let mut grid = SeatGrid::new(plane);
        for record in self.list.iter().filter(|r| r.plane == plane) {
            grid.allocate(record.seat)?;
        }
        Ok(grid)
    }
}
