//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};

use crate::seat::{SeatClass, SeatPosition, SEAT_ROWS};
use crate::store::StoreKind;

/// Reserve command arguments.
#[derive(Debug, Args)]
pub struct ReserveCommand {
    /// Passenger name
    #[arg(short, long)]
    pub name: String,

    /// Seat class: First, Business or Economy
    #[arg(long)]
    pub class: String,

    /// Preferred seat, e.g. 12C
    #[arg(short, long, value_parser = parse_seat)]
    pub seat: Option<SeatPosition>,

    /// Only this plane; requires --seat
    #[arg(short, long, requires = "seat")]
    pub plane: Option<u32>,

    /// Use this passenger ID instead of generating one
    #[arg(long)]
    pub id: Option<String>,
}

/// Cancel command arguments.
#[derive(Debug, Args)]
pub struct CancelCommand {
    /// Passenger ID to cancel
    pub passenger_id: String,
}

/// Lookup command arguments.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("key").required(true).args(["id", "name", "seat"])))]
pub struct LookupCommand {
    /// Find by passenger ID
    #[arg(long)]
    pub id: Option<String>,

    /// Find by name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Find by seat, e.g. 12C
    #[arg(short, long, value_parser = parse_seat)]
    pub seat: Option<SeatPosition>,

    /// Plane for --seat [default: 1]
    #[arg(short, long, requires = "seat")]
    pub plane: Option<u32>,
}

/// Manifest command arguments.
#[derive(Debug, Args)]
pub struct ManifestCommand {
    /// Plane to list
    #[arg(short, long, default_value = "1")]
    pub plane: u32,

    /// Only this class
    #[arg(long, value_parser = parse_class)]
    pub class: Option<SeatClass>,

    /// Only this row (1-30)
    #[arg(short, long, value_parser = parse_row_number)]
    pub row: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Seats command arguments.
#[derive(Debug, Args)]
pub struct SeatsCommand {
    /// Plane to show; all planes when omitted
    #[arg(short, long)]
    pub plane: Option<u32>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Storage backend argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Fixed-capacity arrays
    Array,
    /// Linked list
    List,
}

impl From<BackendArg> for StoreKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Array => Self::Array,
            BackendArg::List => Self::List,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

fn parse_seat(input: &str) -> Result<SeatPosition, String> {
    input.parse().map_err(|err: crate::Error| err.to_string())
}

fn parse_class(input: &str) -> Result<SeatClass, String> {
    input.parse().map_err(|err: crate::Error| err.to_string())
}

/// Parse a 1-indexed row number into a zero-based row.
fn parse_row_number(input: &str) -> Result<usize, String> {
    let row: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{input}' is not a row number"))?;
    if row == 0 || row > SEAT_ROWS {
        return Err(format!("row must be between 1 and {SEAT_ROWS}"));
    }
    Ok(row - 1)
}
