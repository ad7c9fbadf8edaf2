//! Seat geometry and seat classes.
//!
//! The airplane shape is fixed: 30 rows of 6 seats. Rows 1-3 are First,
//! 4-10 Business, 11-30 Economy. Those ranges are a global table, not
//! per-plane configuration.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of seat rows on every plane.
pub const SEAT_ROWS: usize = 30;

/// Number of seats per row.
pub const SEAT_COLUMNS: usize = 6;

/// Seats on one plane.
pub const SEATS_PER_PLANE: usize = SEAT_ROWS * SEAT_COLUMNS;

/// Column labels, indexed by zero-based column.
pub const COLUMN_LETTERS: [char; SEAT_COLUMNS] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Passenger class, determined solely by seat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeatClass {
    /// Rows 1-3.
    First,
    /// Rows 4-10.
    Business,
    /// Rows 11-30.
    Economy,
}

impl SeatClass {
    /// All classes, front of the plane first.
    pub const ALL: [SeatClass; 3] = [Self::First, Self::Business, Self::Economy];

    /// Zero-based row range of this class.
    #[must_use]
    pub fn rows(self) -> RangeInclusive<usize> {
        match self {
            Self::First => 0..=2,
            Self::Business => 3..=9,
            Self::Economy => 10..=29,
        }
    }

    /// First zero-based row of this class.
    #[must_use]
    pub fn first_row(self) -> usize {
        *self.rows().start()
    }

    /// Number of seats this class has on one plane.
    #[must_use]
    pub fn seat_count(self) -> usize {
        self.rows().count() * SEAT_COLUMNS
    }

    /// The class a zero-based row belongs to, if the row exists.
    #[must_use]
    pub fn for_row(row: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.rows().contains(&row))
    }

    /// Check whether a seat lies within this class's rows.
    #[must_use]
    pub fn contains(self, seat: SeatPosition) -> bool {
        self.rows().contains(&seat.row())
    }

    /// Canonical label as written to CSV.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Business => "Business",
            Self::Economy => "Economy",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeatClass {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::invalid_class(s))
    }
}

/// A seat on one plane, stored zero-based.
///
/// Always within the 30x6 grid; construction rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatPosition {
    row: usize,
    column: usize,
}

impl SeatPosition {
    /// Create a seat from zero-based indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeatIndex`] if either index is outside the grid.
    pub fn new(row: usize, column: usize) -> Result<Self> {
        if row >= SEAT_ROWS || column >= SEAT_COLUMNS {
            return Err(Error::InvalidSeatIndex { row, column });
        }
        Ok(Self { row, column })
    }

    /// Create a seat from a 1-indexed row and a column letter, as stored on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeatLabel`] if the row is zero or the letter is
    /// not A-F, and [`Error::InvalidSeatIndex`] if the row is past the grid.
    pub fn from_row_and_letter(row_number: usize, letter: char) -> Result<Self> {
        let column = column_index(letter).ok_or_else(|| Error::InvalidSeatLabel {
            input: format!("{row_number}{letter}"),
        })?;
        let row = row_number
            .checked_sub(1)
            .ok_or_else(|| Error::InvalidSeatLabel {
                input: format!("{row_number}{letter}"),
            })?;
        Self::new(row, column)
    }

    /// Zero-based row.
    #[must_use]
    pub fn row(self) -> usize {
        self.row
    }

    /// Zero-based column.
    #[must_use]
    pub fn column(self) -> usize {
        self.column
    }

    /// 1-indexed row as shown to people and written to CSV.
    #[must_use]
    pub fn row_number(self) -> usize {
        self.row + 1
    }

    /// Column letter A-F.
    #[must_use]
    pub fn column_letter(self) -> char {
        COLUMN_LETTERS[self.column]
    }

    /// Class implied by this seat's row.
    #[must_use]
    pub fn class(self) -> SeatClass {
        // Rows 10..30 are Economy, and `new` guarantees row < SEAT_ROWS.
        SeatClass::for_row(self.row).unwrap_or(SeatClass::Economy)
    }

    /// Every seat in the given rows, rows outer and columns inner.
    pub fn iter_rows(rows: RangeInclusive<usize>) -> impl Iterator<Item = SeatPosition> {
        rows.filter(|row| *row < SEAT_ROWS)
            .flat_map(|row| (0..SEAT_COLUMNS).map(move |column| SeatPosition { row, column }))
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_number(), self.column_letter())
    }
}

fn seat_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d{1,2})\s*([A-Fa-f])\s*$").expect("seat label pattern is valid")
    })
}

impl FromStr for SeatPosition {
    type Err = Error;

    /// Parses labels such as `12C` or `3a`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSeatLabel {
            input: s.to_string(),
        };
        let caps = seat_label_pattern().captures(s).ok_or_else(invalid)?;
        let row_number: usize = caps[1].parse().map_err(|_| invalid())?;
        let letter = caps[2].chars().next().ok_or_else(invalid)?;
        Self::from_row_and_letter(row_number, letter)
    }
}

impl TryFrom<String> for SeatPosition {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SeatPosition> for String {
    fn from(seat: SeatPosition) -> Self {
        seat.to_string()
    }
}

/// Convert a column letter (either case) to its zero-based index.
#[must_use]
pub fn column_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    COLUMN_LETTERS.iter().position(|c| *c == upper)
}
