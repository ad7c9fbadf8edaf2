//! CSV layout for passenger files.
//!
//! One header line, then one passenger per line:
//!
//! ```text
//! PassengerID,Name,SeatRow,SeatColumn,Class
//! 100000,Alice,1,A,First
//! ```
//!
//! Rows are 1-indexed. The class column is written for readers of the file
//! but ignored on load; the row decides the class.

use csv::StringRecord;
use thiserror::Error;

use crate::passenger::PassengerRecord;
use crate::seat::SeatPosition;

/// Header written as the first line.
pub const HEADER: [&str; FIELD_COUNT] = ["PassengerID", "Name", "SeatRow", "SeatColumn", "Class"];

/// Number of fields on every line.
pub const FIELD_COUNT: usize = 5;

const ID: usize = 0;
const NAME: usize = 1;
const ROW: usize = 2;
const COLUMN: usize = 3;

/// Why a line was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    /// Not exactly five fields.
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    /// The ID field is blank.
    #[error("empty passenger ID")]
    EmptyId,

    /// The row is not a number.
    #[error("seat row '{0}' is not a number")]
    RowNotNumeric(String),

    /// The row or column is outside the plane.
    #[error("seat {row}{column} is outside the plane")]
    SeatOutOfRange {
        /// Row field as written.
        row: String,
        /// Column field as written.
        column: String,
    },
}

/// Turn one CSV line into a record on plane 1.
///
/// # Errors
///
/// Returns the [`RowProblem`] that makes the line unusable.
pub fn parse_row(row: &StringRecord) -> Result<PassengerRecord, RowProblem> {
    if row.len() != FIELD_COUNT {
        return Err(RowProblem::FieldCount(row.len()));
    }
    let field = |index: usize| row.get(index).unwrap_or_default().trim();

    let passenger_id = field(ID);
    if passenger_id.is_empty() {
        return Err(RowProblem::EmptyId);
    }
    let row_number: usize = field(ROW)
        .parse()
        .map_err(|_| RowProblem::RowNotNumeric(field(ROW).to_string()))?;

    let out_of_range = || RowProblem::SeatOutOfRange {
        row: field(ROW).to_string(),
        column: field(COLUMN).to_string(),
    };
    let mut letters = field(COLUMN).chars();
    let letter = match (letters.next(), letters.next()) {
        (Some(letter), None) => letter,
        _ => return Err(out_of_range()),
    };
    let seat = SeatPosition::from_row_and_letter(row_number, letter).map_err(|_| out_of_range())?;

    Ok(PassengerRecord::new(passenger_id, field(NAME), seat, 1))
}

/// Fields of one line, in header order.
#[must_use]
pub fn to_row(record: &PassengerRecord) -> [String; FIELD_COUNT] {
    [
        record.passenger_id.clone(),
        record.passenger_name.clone(),
        record.seat.row_number().to_string(),
        record.seat.column_letter().to_string(),
        record.class.label().to_string(),
    ]
}
