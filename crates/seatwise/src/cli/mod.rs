//! Command-line interface for seatwise.
//!
//! This module provides the CLI structure for the `seatwise` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BackendArg, CancelCommand, ConfigCommand, LookupCommand, ManifestCommand, OutputFormat,
    ReserveCommand, SeatsCommand, StatusCommand,
};

/// seatwise - Seat reservations for a single flight
///
/// Keeps a registry of passengers across as many planes as the flight needs,
/// stored in a CSV file between runs.
#[derive(Debug, Parser)]
#[command(name = "seatwise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Passenger CSV file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Storage backend to use instead of the configured one
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reserve a seat
    Reserve(ReserveCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Find a passenger
    Lookup(LookupCommand),

    /// List the passengers on a plane
    Manifest(ManifestCommand),

    /// Show seat maps
    Seats(SeatsCommand),

    /// Show registry totals
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether this command can change the registry.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Reserve(_) | Self::Cancel(_))
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            data: None,
            backend: None,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "seatwise");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reserve() {
        let args = vec![
            "seatwise", "reserve", "--name", "Alice", "--class", "first", "--seat", "2b",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Reserve(cmd) => {
                assert_eq!(cmd.name, "Alice");
                assert_eq!(cmd.class, "first");
                assert_eq!(cmd.seat.unwrap().to_string(), "2B");
                assert!(cmd.plane.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reserve_plane_requires_seat() {
        let args = vec![
            "seatwise", "reserve", "--name", "Alice", "--class", "First", "--plane", "2",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_reserve_rejects_bad_seat() {
        let args = vec![
            "seatwise", "reserve", "--name", "Alice", "--class", "First", "--seat", "40A",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_cancel() {
        let cli = Cli::try_parse_from(["seatwise", "cancel", "100000"]).unwrap();
        assert!(cli.command.is_mutating());
        assert!(matches!(
            cli.command,
            Command::Cancel(CancelCommand { ref passenger_id }) if passenger_id == "100000"
        ));
    }

    #[test]
    fn test_parse_lookup_needs_a_key() {
        assert!(Cli::try_parse_from(["seatwise", "lookup"]).is_err());
        assert!(Cli::try_parse_from(["seatwise", "lookup", "--id", "1", "--name", "A"]).is_err());

        let cli = Cli::try_parse_from(["seatwise", "lookup", "--seat", "12C", "-p", "2"]).unwrap();
        match cli.command {
            Command::Lookup(cmd) => {
                assert_eq!(cmd.plane, Some(2));
                assert!(cmd.seat.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_manifest_filters() {
        let args = vec![
            "seatwise", "manifest", "--plane", "2", "--class", "economy", "--row", "12", "-f",
            "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Manifest(cmd) => {
                assert_eq!(cmd.plane, 2);
                assert_eq!(cmd.class, Some(crate::seat::SeatClass::Economy));
                assert_eq!(cmd.row, Some(11));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_overrides() {
        let args = vec![
            "seatwise",
            "status",
            "--data",
            "/tmp/flight.csv",
            "--backend",
            "list",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/flight.csv")));
        assert_eq!(cli.backend, Some(BackendArg::List));
        assert!(!cli.command.is_mutating());
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["seatwise", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["seatwise", "config", "validate", "--file", "/x.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
