use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use unit_ledger::cli::{
    parse_reading, parse_room_selection, Args, Command, ExportArgs, PrintArgs, ReadArgs,
};
use unit_ledger::config::Settings;
use unit_ledger::error::ConfigError;
use unit_ledger::model::{CostSet, Ledger, Room};
use unit_ledger::parser::{export_file_name, export_ledger, parse_ledger};
use unit_ledger::render_documents;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match args.command {
        Command::Print(print) => run_print(&print),
        Command::Read(read) => run_read(&read),
        Command::Export(export) => run_export(&export),
    }
}

fn load_ledger(path: &Path) -> Result<Ledger> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger file: {}", path.display()))?;

    parse_ledger(&content)
        .with_context(|| format!("Failed to parse ledger file: {}", path.display()))
}

fn select_cost_set<'a>(ledger: &'a Ledger, key: Option<&str>) -> Result<&'a CostSet, ConfigError> {
    match key {
        Some(key) => ledger
            .cost_set(key)
            .ok_or_else(|| ConfigError::UnknownCostSet(key.to_string())),
        None => ledger.cost_sets.first().ok_or(ConfigError::NoCostSets),
    }
}

fn select_rooms(ledger: &Ledger, spec: Option<&str>) -> Result<Vec<Room>, ConfigError> {
    let Some(spec) = spec else {
        return Ok(ledger.rooms.clone());
    };

    let selectors = parse_room_selection(spec)?;
    Ok(ledger
        .rooms
        .iter()
        .filter(|room| selectors.iter().any(|s| s.matches(room)))
        .cloned()
        .collect())
}

fn run_print(args: &PrintArgs) -> Result<()> {
    let ledger = load_ledger(&args.ledger)?;

    let cost_set = select_cost_set(&ledger, args.cost_set.as_deref())?;
    let rooms = select_rooms(&ledger, args.rooms.as_deref())?;

    if rooms.is_empty() {
        anyhow::bail!("No rooms to print");
    }

    log::info!(
        "Printing {} rooms with cost set {:?}",
        rooms.len(),
        cost_set.name
    );

    // Build settings from CLI args and the ledger's invoice settings
    let settings = Settings::from_args(args).with_invoice_settings(&ledger.invoice_settings);

    let documents = render_documents(&args.kinds(), &rooms, cost_set, &settings)
        .with_context(|| "Failed to generate PDF")?;

    let output_dir = args.output_dir();
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    for document in documents {
        let path = output_dir.join(&document.file_name);
        fs::write(&path, &document.bytes)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        println!("Successfully wrote PDF to {}", path.display());
    }

    Ok(())
}

fn run_read(args: &ReadArgs) -> Result<()> {
    let mut ledger = load_ledger(&args.ledger)?;
    let now = Utc::now();

    for spec in &args.readings {
        let (room, electric, water) = parse_reading(spec)?;
        ledger
            .record_reading(&room.to_string(), electric, water, now)
            .with_context(|| format!("Failed to record reading {:?}", spec))?;
    }

    write_ledger(&ledger, args.output.as_ref())
}

fn run_export(args: &ExportArgs) -> Result<()> {
    let ledger = load_ledger(&args.ledger)?;
    write_ledger(&ledger, args.output.as_ref())
}

fn write_ledger(ledger: &Ledger, output: Option<&PathBuf>) -> Result<()> {
    let json = export_ledger(ledger, Utc::now()).with_context(|| "Failed to export ledger")?;

    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));

    fs::write(&path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    println!("Successfully wrote ledger to {}", path.display());
    Ok(())
}
