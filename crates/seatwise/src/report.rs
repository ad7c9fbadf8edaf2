//! Text and JSON views of the registry: manifests, seat maps and totals.
//!
//! Nothing here prints. Every view implements `Display` (and `Serialize`
//! where it makes sense) and the caller decides where it goes.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::grid::SeatGrid;
use crate::passenger::PassengerRecord;
use crate::seat::{SeatClass, COLUMN_LETTERS};
use crate::store::{PlaneSnapshot, StoreKind};

/// Longest name shown in full in a manifest table.
const NAME_WIDTH: usize = 25;

/// Narrows a manifest to one class or one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestFilter {
    /// Keep only this class.
    pub class: Option<SeatClass>,
    /// Keep only this zero-based row.
    pub row: Option<usize>,
}

impl ManifestFilter {
    /// Check whether a record passes the filter.
    #[must_use]
    pub fn matches(&self, record: &PassengerRecord) -> bool {
        self.class.map_or(true, |class| record.class == class)
            && self.row.map_or(true, |row| record.seat.row() == row)
    }
}

/// Passengers on one plane in seat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    plane: u32,
    passengers: Vec<PassengerRecord>,
}

impl Manifest {
    pub(crate) fn from_snapshot(snapshot: &PlaneSnapshot, filter: ManifestFilter) -> Self {
        Self {
            plane: snapshot.plane(),
            passengers: snapshot
                .passengers()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect(),
        }
    }

    /// Plane number.
    #[must_use]
    pub fn plane(&self) -> u32 {
        self.plane
    }

    /// Passengers, front row first.
    #[must_use]
    pub fn passengers(&self) -> &[PassengerRecord] {
        &self.passengers
    }

    /// Whether the manifest lists nobody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

fn display_name(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        return name.to_string();
    }
    let cut: String = name.chars().take(NAME_WIDTH - 3).collect();
    format!("{cut}...")
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Passenger manifest (Plane #{})", self.plane)?;
        writeln!(f, "{:<10}{:<26}{:<8}{:<12}", "ID", "Name", "Seat", "Class")?;
        writeln!(f, "{}", "-".repeat(56))?;
        if self.passengers.is_empty() {
            return writeln!(f, "(no passengers)");
        }
        for record in &self.passengers {
            writeln!(
                f,
                "{:<10}{:<26}{:<8}{:<12}",
                record.passenger_id,
                display_name(&record.passenger_name),
                record.seat.to_string(),
                record.class.label()
            )?;
        }
        Ok(())
    }
}

/// Render a manifest as a text table.
#[must_use]
pub fn render_manifest(manifest: &Manifest) -> String {
    manifest.to_string()
}

/// Seat map of one plane, one section per class.
#[derive(Debug, Clone, Copy)]
pub struct SeatMap<'a> {
    grid: &'a SeatGrid,
}

impl<'a> SeatMap<'a> {
    /// Wrap a grid for display.
    #[must_use]
    pub fn new(grid: &'a SeatGrid) -> Self {
        Self { grid }
    }
}

impl fmt::Display for SeatMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seat map (Plane #{})", self.grid.plane())?;
        write!(f, "   ")?;
        for letter in COLUMN_LETTERS {
            write!(f, " {letter}  ")?;
        }
        writeln!(f)?;

        for class in SeatClass::ALL {
            let rows = class.rows();
            writeln!(
                f,
                "---------- {} Class (Rows {}-{}) ----------",
                class,
                rows.start() + 1,
                rows.end() + 1
            )?;
            for row in rows {
                write!(f, "{:<3}", row + 1)?;
                if let Some(cells) = self.grid.row(row) {
                    for cell in cells {
                        write!(f, " {}  ", cell.marker())?;
                    }
                }
                writeln!(f)?;
            }
        }
        writeln!(f, "Legend: O = Available, X = Occupied")
    }
}

/// Render the seat map of one plane.
#[must_use]
pub fn render_seat_map(grid: &SeatGrid) -> String {
    SeatMap::new(grid).to_string()
}

/// Totals across every plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Backend in use.
    pub backend: StoreKind,
    /// Planes in use.
    pub planes: u32,
    /// Registered passengers.
    pub passengers: usize,
    /// Free seats per class, summed over planes.
    pub available: BTreeMap<SeatClass, usize>,
}

impl RegistryStats {
    /// Stats with no free seats counted yet.
    #[must_use]
    pub fn new(backend: StoreKind, planes: u32, passengers: usize) -> Self {
        Self {
            backend,
            planes,
            passengers,
            available: SeatClass::ALL.into_iter().map(|class| (class, 0)).collect(),
        }
    }

    /// Add free seats for one class.
    pub fn add_available(&mut self, class: SeatClass, seats: usize) {
        *self.available.entry(class).or_default() += seats;
    }

    /// Free seats in one class.
    #[must_use]
    pub fn available(&self, class: SeatClass) -> usize {
        self.available.get(&class).copied().unwrap_or_default()
    }

    /// Free seats in every class.
    #[must_use]
    pub fn total_available(&self) -> usize {
        self.available.values().sum()
    }
}

impl fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backend:       {}", self.backend)?;
        writeln!(f, "Planes:        {}", self.planes)?;
        writeln!(f, "Passengers:    {}", self.passengers)?;
        writeln!(f, "Available:     {}", self.total_available())?;
        for (class, seats) in &self.available {
            writeln!(f, "  {:<12}{}", class.label(), seats)?;
        }
        Ok(())
    }
}
