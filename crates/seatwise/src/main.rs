//! `seatwise` - CLI for the seat registry
//!
//! This binary loads the passenger CSV, runs one command against the
//! registry, and writes the file back when something changed.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};

use seatwise::cli::{
    CancelCommand, Cli, Command, ConfigCommand, LookupCommand, ManifestCommand, OutputFormat,
    ReserveCommand, SeatsCommand,
};
use seatwise::report::{render_manifest, render_seat_map, ManifestFilter};
use seatwise::{
    init_logging, Config, CsvGateway, LoadOutcome, PassengerRecord, PlaneRegistry,
    ReservationRequest, SeatRequest,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.data {
        config.storage.csv_path = Some(path);
    }
    if let Some(backend) = cli.backend {
        config.registry.backend = backend.into();
    }

    if let Command::Config(config_cmd) = cli.command {
        return handle_config(&config, config_cmd);
    }

    let gateway = CsvGateway::new(config.csv_path());
    let mut registry = PlaneRegistry::new(config.registry.clone());
    let policy = config.conflict_policy_for(registry.kind());
    match gateway
        .load_into(&mut registry, policy)
        .with_context(|| format!("reading {}", gateway.path().display()))?
    {
        LoadOutcome::Loaded(report) => debug!("Load report: {:?}", report),
        LoadOutcome::Unavailable { path, .. } => {
            info!("Starting with an empty registry ({} not found)", path.display());
        }
    }

    let mutating = cli.command.is_mutating();
    match cli.command {
        Command::Reserve(cmd) => handle_reserve(&mut registry, cmd)?,
        Command::Cancel(cmd) => handle_cancel(&mut registry, &cmd)?,
        Command::Lookup(cmd) => handle_lookup(&registry, cmd)?,
        Command::Manifest(cmd) => handle_manifest(&registry, &cmd)?,
        Command::Seats(cmd) => handle_seats(&registry, &cmd)?,
        Command::Status(cmd) => handle_status(&registry, &gateway, cmd.json)?,
        Command::Config(cmd) => handle_config(&config, cmd)?,
    }

    if mutating && config.storage.autosave {
        gateway
            .save(&registry)
            .with_context(|| format!("writing {}", gateway.path().display()))?;
    }
    Ok(())
}

fn handle_reserve(registry: &mut PlaneRegistry, cmd: ReserveCommand) -> anyhow::Result<()> {
    let seat = match (cmd.seat, cmd.plane) {
        (Some(seat), Some(plane)) => SeatRequest::Exact { plane, seat },
        (Some(seat), None) => SeatRequest::Preferred(seat),
        (None, _) => SeatRequest::Any,
    };
    let mut request = ReservationRequest::new(cmd.name, cmd.class).with_seat(seat);
    if let Some(id) = cmd.id {
        request = request.with_id(id);
    }

    let assignment = registry.reserve(request)?;
    if assignment.opened_plane {
        println!("Opened plane #{}", assignment.plane);
    }
    println!(
        "Reserved seat {} on plane #{} for {} (ID {}, {})",
        assignment.seat,
        assignment.plane,
        assignment.passenger_name,
        assignment.passenger_id,
        assignment.class
    );
    Ok(())
}

fn handle_cancel(registry: &mut PlaneRegistry, cmd: &CancelCommand) -> anyhow::Result<()> {
    let removed = registry.cancel(&cmd.passenger_id)?;
    println!(
        "Cancelled {} ({}, seat {} on plane #{})",
        removed.passenger_id, removed.passenger_name, removed.seat, removed.plane
    );
    Ok(())
}

fn handle_lookup(registry: &PlaneRegistry, cmd: LookupCommand) -> anyhow::Result<()> {
    let found = match (cmd.id, cmd.name, cmd.seat) {
        (Some(id), _, _) => registry
            .find_by_id(&id)
            .ok_or_else(|| seatwise::Error::not_found(id))?,
        (None, Some(name), _) => match registry.find_by_name(&name) {
            Some(record) => record,
            None => bail!("no passenger named '{name}'"),
        },
        (None, None, Some(seat)) => {
            let plane = cmd.plane.unwrap_or(1);
            match registry.find_by_seat(plane, seat) {
                Some(record) => record,
                None => bail!("seat {seat} on plane #{plane} is not reserved"),
            }
        }
        (None, None, None) => bail!("give --id, --name or --seat"),
    };
    print_record(found);
    Ok(())
}

fn print_record(record: &PassengerRecord) {
    println!("Passenger ID:  {}", record.passenger_id);
    println!("Name:          {}", record.passenger_name);
    println!("Plane:         #{}", record.plane);
    println!("Seat:          {}", record.seat);
    println!("Class:         {}", record.class);
}

fn handle_manifest(registry: &PlaneRegistry, cmd: &ManifestCommand) -> anyhow::Result<()> {
    let filter = ManifestFilter {
        class: cmd.class,
        row: cmd.row,
    };
    let manifest = registry.manifest(cmd.plane, filter)?;
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&manifest)?),
        OutputFormat::Plain => print!("{}", render_manifest(&manifest)),
    }
    Ok(())
}

fn handle_seats(registry: &PlaneRegistry, cmd: &SeatsCommand) -> anyhow::Result<()> {
    let planes: Vec<u32> = match cmd.plane {
        Some(plane) => vec![plane],
        None => (1..=registry.plane_count()).collect(),
    };
    if planes.is_empty() {
        println!("No planes in use.");
        return Ok(());
    }
    for plane in planes {
        let grid = registry.seat_grid(plane)?;
        println!("{}", render_seat_map(&grid));
    }
    Ok(())
}

fn handle_status(
    registry: &PlaneRegistry,
    gateway: &CsvGateway,
    json: bool,
) -> anyhow::Result<()> {
    let stats = registry.stats()?;
    if json {
        let status = serde_json::json!({
            "data_file": gateway.path(),
            "next_passenger_id": registry.next_passenger_id(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("seatwise status");
        println!("---------------");
        println!("Data file:     {}", gateway.path().display());
        println!("Next ID:       {}", registry.next_passenger_id());
        print!("{stats}");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  CSV path:           {}", config.csv_path().display());
                println!("  Autosave:           {}", config.storage.autosave);
                println!();
                println!("[Registry]");
                println!("  Backend:            {}", config.registry.backend);
                println!("  Max planes:         {}", config.registry.max_planes);
                println!("  Plane capacity:     {}", config.registry.plane_capacity);
                println!("  ID floor:           {}", config.registry.id_floor);
                println!("  Unique names:       {}", config.registry.unique_names);
                println!();
                println!("[CSV]");
                println!("  Array conflicts:    {}", config.csv.array_conflict);
                println!("  List conflicts:     {}", config.csv.list_conflict);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
