//! The multi-plane registry and its seat-assignment policy.

use serde::Serialize;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::grid::SeatGrid;
use crate::passenger::PassengerRecord;
use crate::report::{Manifest, ManifestFilter, RegistryStats};
use crate::seat::{SeatClass, SeatPosition};
use crate::storage::ConflictPolicy;
use crate::store::{NameCheck, PassengerStore, StoreKind};

/// Where a reservation wants to sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeatRequest {
    /// First free seat of the class, lowest plane first.
    #[default]
    Any,
    /// This seat on the lowest plane where it is free.
    Preferred(SeatPosition),
    /// This seat on this plane, or nothing.
    Exact {
        /// 1-based plane number.
        plane: u32,
        /// Requested seat.
        seat: SeatPosition,
    },
}

/// Input to [`PlaneRegistry::reserve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// Explicit ID; generated when `None`.
    pub passenger_id: Option<String>,
    /// Passenger name.
    pub name: String,
    /// Class label, matched case-insensitively.
    pub class: String,
    /// Seat preference.
    pub seat: SeatRequest,
}

impl ReservationRequest {
    /// A request for any seat in the class, with a generated ID.
    #[must_use]
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            passenger_id: None,
            name: name.into(),
            class: class.into(),
            seat: SeatRequest::Any,
        }
    }

    /// Use an explicit passenger ID.
    #[must_use]
    pub fn with_id(mut self, passenger_id: impl Into<String>) -> Self {
        self.passenger_id = Some(passenger_id.into());
        self
    }

    /// Set the seat preference.
    #[must_use]
    pub fn with_seat(mut self, seat: SeatRequest) -> Self {
        self.seat = seat;
        self
    }
}

/// Result of a successful reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Assigned or supplied passenger ID.
    pub passenger_id: String,
    /// Passenger name.
    pub passenger_name: String,
    /// Seat class.
    pub class: SeatClass,
    /// Plane the passenger was placed on.
    pub plane: u32,
    /// Seat on that plane.
    pub seat: SeatPosition,
    /// Whether a new plane was opened for this reservation.
    pub opened_plane: bool,
}

/// What happened to one record offered by a bulk load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Stored on this plane.
    Inserted {
        /// Plane the record went to.
        plane: u32,
    },
    /// Stored on plane 1 in place of an earlier record for the same seat.
    Replaced {
        /// The record that lost the seat.
        displaced: PassengerRecord,
    },
    /// Dropped because the seat was already taken.
    SkippedSeat,
    /// Dropped because the ID is already registered.
    SkippedDuplicateId,
    /// Dropped because no plane could take it.
    Rejected,
}

/// Every plane, every passenger, and the rules for placing them.
#[derive(Debug)]
pub struct PlaneRegistry {
    store: Box<dyn PassengerStore>,
    settings: RegistryConfig,
}

impl PlaneRegistry {
    /// Create an empty registry on the configured backend.
    #[must_use]
    pub fn new(settings: RegistryConfig) -> Self {
        Self {
            store: settings.backend.build(settings.plane_capacity),
            settings,
        }
    }

    /// Which backend is in use.
    #[must_use]
    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Settings this registry was built with.
    #[must_use]
    pub fn settings(&self) -> &RegistryConfig {
        &self.settings
    }

    /// Number of planes in use.
    #[must_use]
    pub fn plane_count(&self) -> u32 {
        self.store.plane_count()
    }

    /// Number of passengers on all planes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Every record in storage order.
    pub fn records(&self) -> impl Iterator<Item = &PassengerRecord> {
        self.store.records()
    }

    /// Reserve a seat.
    ///
    /// The request is fully validated before anything changes; a new plane
    /// is opened only once the reservation is known to succeed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`], [`Error::InvalidClass`],
    /// [`Error::ClassMismatch`], [`Error::DuplicateId`],
    /// [`Error::DuplicateName`], [`Error::PlaneNotFound`],
    /// [`Error::SeatOccupied`] or [`Error::RegistryFull`].
    pub fn reserve(&mut self, request: ReservationRequest) -> Result<Assignment> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyField {
                field: "passenger name",
            });
        }
        let passenger_id = match request.passenger_id.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::EmptyField {
                    field: "passenger ID",
                })
            }
            Some(id) => id.to_string(),
            None => self.next_passenger_id(),
        };
        let class: SeatClass = request.class.parse()?;

        if self.store.find_by_id(&passenger_id).is_some() {
            return Err(Error::duplicate_id(passenger_id));
        }
        let names = if self.settings.unique_names {
            NameCheck::Global
        } else {
            NameCheck::Skip
        };
        if names == NameCheck::Global && self.store.find_by_name(name).is_some() {
            return Err(Error::duplicate_name(name));
        }

        let (plane, seat) = self.choose_seat(class, request.seat)?;
        let opened_plane = plane > self.store.plane_count();
        if opened_plane {
            self.open_plane()?;
        }

        let record = PassengerRecord::new(passenger_id, name, seat, plane);
        self.store.insert(record.clone(), names)?;
        debug!(
            "Reserved {} for {} ({}) on plane #{}",
            seat, record.passenger_id, class, plane
        );

        Ok(Assignment {
            passenger_id: record.passenger_id,
            passenger_name: record.passenger_name,
            class,
            plane,
            seat,
            opened_plane,
        })
    }

    /// Pick a plane and seat without changing anything. A plane number one
    /// past the current count means a new plane is needed.
    fn choose_seat(&self, class: SeatClass, request: SeatRequest) -> Result<(u32, SeatPosition)> {
        match request {
            SeatRequest::Exact { plane, seat } => {
                Self::check_class(class, seat)?;
                self.store.check_plane(plane)?;
                if self.store.is_seat_occupied(plane, seat) {
                    return Err(Error::SeatOccupied { plane, seat });
                }
                Ok((plane, seat))
            }
            SeatRequest::Preferred(seat) => {
                Self::check_class(class, seat)?;
                let plane = self
                    .planes()
                    .find(|plane| {
                        self.store.has_room(*plane) && !self.store.is_seat_occupied(*plane, seat)
                    })
                    .map_or_else(|| self.next_plane(), Ok)?;
                Ok((plane, seat))
            }
            SeatRequest::Any => {
                for plane in self.planes().filter(|plane| self.store.has_room(*plane)) {
                    let grid = self.store.seat_grid(plane)?;
                    if let Some(seat) =
                        SeatPosition::iter_rows(class.rows()).find(|seat| grid.is_available(*seat))
                    {
                        return Ok((plane, seat));
                    }
                }
                let seat = SeatPosition::new(class.first_row(), 0)?;
                Ok((self.next_plane()?, seat))
            }
        }
    }

    fn check_class(class: SeatClass, seat: SeatPosition) -> Result<()> {
        if class.contains(seat) {
            Ok(())
        } else {
            Err(Error::ClassMismatch { seat, class })
        }
    }

    fn planes(&self) -> impl Iterator<Item = u32> {
        1..=self.store.plane_count()
    }

    /// Number the next plane would get, if the ceiling allows it.
    fn next_plane(&self) -> Result<u32> {
        let count = self.store.plane_count();
        if count >= self.settings.max_planes {
            return Err(Error::RegistryFull {
                max_planes: self.settings.max_planes,
            });
        }
        Ok(count + 1)
    }

    fn open_plane(&mut self) -> Result<u32> {
        self.next_plane()?;
        Ok(self.store.add_plane())
    }

    /// Cancel a reservation by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the ID is unknown; nothing changes.
    pub fn cancel(&mut self, passenger_id: &str) -> Result<PassengerRecord> {
        let removed = self.store.cancel(passenger_id.trim())?;
        debug!(
            "Cancelled {} ({} on plane #{})",
            removed.passenger_id, removed.seat, removed.plane
        );
        Ok(removed)
    }

    /// Find a passenger by ID.
    #[must_use]
    pub fn find_by_id(&self, passenger_id: &str) -> Option<&PassengerRecord> {
        self.store.find_by_id(passenger_id.trim())
    }

    /// Find the first passenger with this name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PassengerRecord> {
        self.store.find_by_name(name)
    }

    /// Find who holds a seat.
    #[must_use]
    pub fn find_by_seat(&self, plane: u32, seat: SeatPosition) -> Option<&PassengerRecord> {
        self.store.find_by_seat(plane, seat)
    }

    /// The ID the next reservation without an explicit ID would get.
    #[must_use]
    pub fn next_passenger_id(&self) -> String {
        self.store.next_id(self.settings.id_floor)
    }

    /// Occupancy grid of one plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`] if the plane does not exist.
    pub fn seat_grid(&self, plane: u32) -> Result<SeatGrid> {
        self.store.seat_grid(plane)
    }

    /// Passengers on one plane in seat order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneNotFound`] if the plane does not exist.
    pub fn manifest(&self, plane: u32, filter: ManifestFilter) -> Result<Manifest> {
        let snapshot = self.store.snapshot(plane)?;
        Ok(Manifest::from_snapshot(&snapshot, filter))
    }

    /// Totals across every plane.
    ///
    /// # Errors
    ///
    /// Propagates grid errors from the backend.
    pub fn stats(&self) -> Result<RegistryStats> {
        let mut stats = RegistryStats::new(self.kind(), self.plane_count(), self.len());
        for plane in self.planes() {
            let grid = self.store.seat_grid(plane)?;
            for class in SeatClass::ALL {
                stats.add_available(class, grid.count_available(Some(class)));
            }
        }
        Ok(stats)
    }

    /// Offer one record from a bulk load.
    ///
    /// Names are not checked for uniqueness. `record.plane` is ignored; the
    /// policy decides the plane.
    ///
    /// # Errors
    ///
    /// Only unexpected backend errors are returned. Conflicts are reported
    /// through [`ImportOutcome`].
    pub fn import(
        &mut self,
        mut record: PassengerRecord,
        policy: ConflictPolicy,
    ) -> Result<ImportOutcome> {
        if self.store.find_by_id(&record.passenger_id).is_some() {
            return Ok(ImportOutcome::SkippedDuplicateId);
        }
        if self.store.plane_count() == 0 {
            self.open_plane()?;
        }

        let seat = record.seat;
        match policy {
            ConflictPolicy::Overwrite | ConflictPolicy::Skip => {
                record.plane = 1;
                if !self.store.is_seat_occupied(1, seat) {
                    if !self.store.has_room(1) {
                        return Ok(ImportOutcome::Rejected);
                    }
                    self.store.insert(record, NameCheck::Skip)?;
                    return Ok(ImportOutcome::Inserted { plane: 1 });
                }
                if policy == ConflictPolicy::Skip {
                    return Ok(ImportOutcome::SkippedSeat);
                }
                let displaced = self.store.replace_at_seat(record)?;
                Ok(ImportOutcome::Replaced { displaced })
            }
            ConflictPolicy::Overflow => {
                let free = self.planes().find(|plane| {
                    self.store.has_room(*plane) && !self.store.is_seat_occupied(*plane, seat)
                });
                let plane = match free {
                    Some(plane) => plane,
                    None if self.next_plane().is_ok() => self.open_plane()?,
                    None => return Ok(ImportOutcome::Rejected),
                };
                record.plane = plane;
                self.store.insert(record, NameCheck::Skip)?;
                Ok(ImportOutcome::Inserted { plane })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(kind: StoreKind) -> PlaneRegistry {
        PlaneRegistry::new(RegistryConfig {
            backend: kind,
            ..RegistryConfig::default()
        })
    }

    fn seat(label: &str) -> SeatPosition {
        label.parse().unwrap()
    }

    fn offer(id: &str, label: &str) -> PassengerRecord {
        PassengerRecord::new(id, format!("Passenger {id}"), seat(label), 1)
    }

    const KINDS: [StoreKind; 2] = [StoreKind::Array, StoreKind::List];

    #[test]
    fn test_first_reservation_opens_plane_one() {
        for kind in KINDS {
            let mut registry = registry(kind);
            assert_eq!(registry.plane_count(), 0);

            let assignment = registry
                .reserve(ReservationRequest::new("Alice", "First"))
                .unwrap();
            assert_eq!(assignment.plane, 1);
            assert_eq!((assignment.seat.row(), assignment.seat.column()), (0, 0));
            assert_eq!(assignment.passenger_id, "100000");
            assert_eq!(assignment.class, SeatClass::First);
            assert!(assignment.opened_plane);
            assert_eq!(registry.plane_count(), 1);
        }
    }

    #[test]
    fn test_economy_overflow_opens_plane_two() {
        for kind in KINDS {
            let mut registry = registry(kind);
            registry
                .reserve(ReservationRequest::new("Alice", "First"))
                .unwrap();
            for i in 0..120 {
                let assignment = registry
                    .reserve(ReservationRequest::new(format!("Economy {i}"), "economy"))
                    .unwrap();
                assert_eq!(assignment.plane, 1);
            }

            let assignment = registry
                .reserve(ReservationRequest::new("Late", "Economy"))
                .unwrap();
            assert_eq!(assignment.plane, 2, "{kind}");
            assert_eq!((assignment.seat.row(), assignment.seat.column()), (10, 0));
            assert_eq!(registry.plane_count(), 2);
            assert_eq!(registry.len(), 122);
        }
    }

    #[test]
    fn test_any_seat_fills_rows_then_columns() {
        let mut registry = registry(StoreKind::Array);
        let first = registry
            .reserve(ReservationRequest::new("A", "Business"))
            .unwrap();
        let second = registry
            .reserve(ReservationRequest::new("B", "Business"))
            .unwrap();
        assert_eq!(first.seat.to_string(), "4A");
        assert_eq!(second.seat.to_string(), "4B");
    }

    #[test]
    fn test_any_seat_reuses_cancelled_seat() {
        for kind in KINDS {
            let mut registry = registry(kind);
            let alice = registry
                .reserve(ReservationRequest::new("Alice", "First"))
                .unwrap();
            registry
                .reserve(ReservationRequest::new("Bob", "First"))
                .unwrap();
            registry.cancel(&alice.passenger_id).unwrap();

            let carol = registry
                .reserve(ReservationRequest::new("Carol", "First"))
                .unwrap();
            assert_eq!(carol.seat.to_string(), "1A");
            assert_eq!(carol.plane, 1);
        }
    }

    #[test]
    fn test_invalid_class_rejected() {
        let mut registry = registry(StoreKind::Array);
        let err = registry
            .reserve(ReservationRequest::new("Alice", "Premium"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidClass { .. }));
        assert_eq!(registry.plane_count(), 0);
    }

    #[test]
    fn test_empty_name_and_id_rejected() {
        let mut registry = registry(StoreKind::List);
        let err = registry
            .reserve(ReservationRequest::new("   ", "First"))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyField { .. }));

        let err = registry
            .reserve(ReservationRequest::new("Alice", "First").with_id(" "))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyField { field: "passenger ID" }));
    }

    #[test]
    fn test_preferred_seat_outside_class() {
        let mut registry = registry(StoreKind::Array);
        let err = registry
            .reserve(
                ReservationRequest::new("Alice", "First")
                    .with_seat(SeatRequest::Preferred(seat("12C"))),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ClassMismatch { .. }));
    }

    #[test]
    fn test_preferred_seat_moves_to_next_plane() {
        for kind in KINDS {
            let mut registry = registry(kind);
            let request = |name: &str| {
                ReservationRequest::new(name, "Economy")
                    .with_seat(SeatRequest::Preferred(seat("12C")))
            };

            let first = registry.reserve(request("Alice")).unwrap();
            let second = registry.reserve(request("Bob")).unwrap();
            assert_eq!((first.plane, second.plane), (1, 2));
            assert_eq!(second.seat, seat("12C"));
            assert!(second.opened_plane);

            // Free on plane 1 again, so the lowest plane wins.
            registry.cancel(&first.passenger_id).unwrap();
            let third = registry.reserve(request("Carol")).unwrap();
            assert_eq!(third.plane, 1);
        }
    }

    #[test]
    fn test_exact_seat() {
        for kind in KINDS {
            let mut registry = registry(kind);
            let exact = |name: &str, plane| {
                ReservationRequest::new(name, "Business").with_seat(SeatRequest::Exact {
                    plane,
                    seat: seat("5D"),
                })
            };

            let err = registry.reserve(exact("Alice", 1)).unwrap_err();
            assert!(matches!(err, Error::PlaneNotFound { plane: 1 }));

            registry
                .reserve(ReservationRequest::new("Opener", "Economy"))
                .unwrap();
            registry.reserve(exact("Alice", 1)).unwrap();
            let err = registry.reserve(exact("Bob", 1)).unwrap_err();
            assert!(matches!(err, Error::SeatOccupied { plane: 1, .. }));
            assert_eq!(registry.plane_count(), 1);
        }
    }

    #[test]
    fn test_duplicate_name_policy() {
        let mut registry = registry(StoreKind::Array);
        registry
            .reserve(ReservationRequest::new("Alice", "First"))
            .unwrap();
        let err = registry
            .reserve(ReservationRequest::new("ALICE", "Economy"))
            .unwrap_err();
        assert!(err.is_conflict());

        let mut relaxed = PlaneRegistry::new(RegistryConfig {
            unique_names: false,
            ..RegistryConfig::default()
        });
        relaxed
            .reserve(ReservationRequest::new("Alice", "First"))
            .unwrap();
        relaxed
            .reserve(ReservationRequest::new("Alice", "First"))
            .unwrap();
        assert_eq!(relaxed.len(), 2);
    }

    #[test]
    fn test_duplicate_id_does_not_open_plane() {
        let mut registry = registry(StoreKind::Array);
        registry
            .reserve(
                ReservationRequest::new("Alice", "Economy")
                    .with_id("A1")
                    .with_seat(SeatRequest::Preferred(seat("12C"))),
            )
            .unwrap();

        let err = registry
            .reserve(
                ReservationRequest::new("Bob", "Economy")
                    .with_id("A1")
                    .with_seat(SeatRequest::Preferred(seat("12C"))),
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        assert_eq!(registry.plane_count(), 1);
    }

    #[test]
    fn test_registry_full() {
        let mut registry = PlaneRegistry::new(RegistryConfig {
            max_planes: 1,
            ..RegistryConfig::default()
        });
        let request = |name: &str| {
            ReservationRequest::new(name, "First").with_seat(SeatRequest::Preferred(seat("1A")))
        };
        registry.reserve(request("Alice")).unwrap();

        let err = registry.reserve(request("Bob")).unwrap_err();
        assert!(matches!(err, Error::RegistryFull { max_planes: 1 }));
        assert!(err.is_capacity_error());
    }

    #[test]
    fn test_small_plane_capacity_spills_over() {
        let mut registry = PlaneRegistry::new(RegistryConfig {
            plane_capacity: 2,
            ..RegistryConfig::default()
        });
        let planes: Vec<u32> = ["A", "B", "C"]
            .iter()
            .map(|name| {
                registry
                    .reserve(ReservationRequest::new(*name, "Economy"))
                    .unwrap()
                    .plane
            })
            .collect();
        assert_eq!(planes, vec![1, 1, 2]);
    }

    #[test]
    fn test_generated_ids_increase() {
        let mut registry = registry(StoreKind::List);
        registry
            .reserve(ReservationRequest::new("Alice", "First").with_id("100500"))
            .unwrap();
        let bob = registry
            .reserve(ReservationRequest::new("Bob", "First"))
            .unwrap();
        assert_eq!(bob.passenger_id, "100501");
        assert_eq!(registry.next_passenger_id(), "100502");
    }

    #[test]
    fn test_cancel_unknown_id() {
        let mut registry = registry(StoreKind::Array);
        registry
            .reserve(ReservationRequest::new("Alice", "First"))
            .unwrap();

        let err = registry.cancel("999999").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookups() {
        let mut registry = registry(StoreKind::List);
        let alice = registry
            .reserve(ReservationRequest::new("Alice Tan", "Business"))
            .unwrap();

        assert_eq!(
            registry.find_by_id(&alice.passenger_id).unwrap().seat,
            alice.seat
        );
        assert!(registry.find_by_name("alice tan").is_some());
        assert!(registry.find_by_seat(1, alice.seat).is_some());
        assert!(registry.find_by_seat(2, alice.seat).is_none());
    }

    #[test]
    fn test_stats_count_available_per_class() {
        let mut registry = registry(StoreKind::Array);
        registry
            .reserve(ReservationRequest::new("Alice", "First"))
            .unwrap();
        registry
            .reserve(ReservationRequest::new("Bob", "Economy"))
            .unwrap();

        let stats = registry.stats().unwrap();
        assert_eq!(stats.planes, 1);
        assert_eq!(stats.passengers, 2);
        assert_eq!(stats.available(SeatClass::First), 17);
        assert_eq!(stats.available(SeatClass::Business), 42);
        assert_eq!(stats.available(SeatClass::Economy), 119);
    }

    #[test]
    fn test_import_overwrite_replaces_on_plane_one() {
        let mut registry = registry(StoreKind::Array);
        assert_eq!(
            registry
                .import(offer("1", "3C"), ConflictPolicy::Overwrite)
                .unwrap(),
            ImportOutcome::Inserted { plane: 1 }
        );

        let outcome = registry
            .import(offer("2", "3C"), ConflictPolicy::Overwrite)
            .unwrap();
        assert!(
            matches!(outcome, ImportOutcome::Replaced { ref displaced } if displaced.passenger_id == "1")
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_seat(1, seat("3C")).unwrap().passenger_id, "2");
    }

    #[test]
    fn test_import_skip_keeps_first() {
        let mut registry = registry(StoreKind::Array);
        registry.import(offer("1", "3C"), ConflictPolicy::Skip).unwrap();
        let outcome = registry.import(offer("2", "3C"), ConflictPolicy::Skip).unwrap();

        assert_eq!(outcome, ImportOutcome::SkippedSeat);
        assert_eq!(registry.find_by_seat(1, seat("3C")).unwrap().passenger_id, "1");
    }

    #[test]
    fn test_import_overflow_opens_planes() {
        let mut registry = registry(StoreKind::List);
        for (id, expected) in [("1", 1), ("2", 2), ("3", 3)] {
            let outcome = registry
                .import(offer(id, "3C"), ConflictPolicy::Overflow)
                .unwrap();
            assert_eq!(outcome, ImportOutcome::Inserted { plane: expected });
        }
        assert_eq!(registry.plane_count(), 3);
    }

    #[test]
    fn test_import_overflow_rejected_past_ceiling() {
        let mut registry = PlaneRegistry::new(RegistryConfig {
            backend: StoreKind::List,
            max_planes: 1,
            ..RegistryConfig::default()
        });
        registry
            .import(offer("1", "3C"), ConflictPolicy::Overflow)
            .unwrap();
        let outcome = registry
            .import(offer("2", "3C"), ConflictPolicy::Overflow)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Rejected);
    }

    #[test]
    fn test_import_duplicate_id_skipped() {
        for policy in [
            ConflictPolicy::Overwrite,
            ConflictPolicy::Skip,
            ConflictPolicy::Overflow,
        ] {
            let mut registry = registry(StoreKind::Array);
            registry.import(offer("1", "3C"), policy).unwrap();
            let outcome = registry.import(offer("1", "4C"), policy).unwrap();
            assert_eq!(outcome, ImportOutcome::SkippedDuplicateId);
            assert_eq!(registry.len(), 1);
        }
    }

    #[test]
    fn test_manifest_through_registry() {
        let mut registry = registry(StoreKind::Array);
        registry
            .reserve(ReservationRequest::new("Zed", "Economy"))
            .unwrap();
        registry
            .reserve(ReservationRequest::new("Amy", "First"))
            .unwrap();

        let manifest = registry.manifest(1, ManifestFilter::default()).unwrap();
        let names: Vec<_> = manifest
            .passengers()
            .iter()
            .map(|r| r.passenger_name.as_str())
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
        assert!(registry.manifest(2, ManifestFilter::default()).is_err());
    }
}
