use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::model::Room;
use crate::parser::{parse_block, parse_room_name, RoomName};

#[derive(Parser, Debug)]
#[command(name = "unit-ledger")]
#[command(
    author,
    version,
    about = "Compute room charges from meter readings and print invoices, total sheets and receiving sheets"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render PDF documents for the selected rooms
    Print(PrintArgs),
    /// Record new meter readings and write the updated ledger
    Read(ReadArgs),
    /// Re-export a ledger, migrating legacy cost sets
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct PrintArgs {
    /// Ledger export file (JSON)
    #[arg(required = true)]
    pub ledger: PathBuf,

    /// Document kinds to render (repeatable, defaults to invoice)
    #[arg(short, long = "kind", value_enum)]
    pub kinds: Vec<DocumentKind>,

    /// Cost set id or name (defaults to the first cost set)
    #[arg(short, long)]
    pub cost_set: Option<String>,

    /// Rooms and blocks to include (e.g. "A1,A3,B"); defaults to all rooms
    #[arg(short, long)]
    pub rooms: Option<String>,

    /// Print date, YYYY-MM-DD (defaults to the 10th of the current month)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Anchor total sheets to the bottom of the page
    #[arg(long)]
    pub bottom_up: bool,

    /// Leave the block/date title off total sheets
    #[arg(long)]
    pub no_date: bool,

    /// Round water charges up like electricity
    #[arg(long)]
    pub round_water: bool,

    /// Page size
    #[arg(short = 's', long, value_enum, default_value = "a4")]
    pub page_size: PageSize,

    /// Output directory (defaults to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ReadArgs {
    /// Ledger export file (JSON)
    #[arg(required = true)]
    pub ledger: PathBuf,

    /// New readings as ROOM=ELECTRIC,WATER (repeatable)
    #[arg(short = 'r', long = "reading", required = true)]
    pub readings: Vec<String>,

    /// Output file (defaults to unit-ledger-export-<date>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Ledger export file (JSON)
    #[arg(required = true)]
    pub ledger: PathBuf,

    /// Output file (defaults to unit-ledger-export-<date>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Portrait (width, height) in mm
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// A printable document kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Default)]
pub enum DocumentKind {
    /// Four invoice cards per page, one per room
    #[default]
    Invoice,
    /// One table per block with a totals row
    TotalSheet,
    /// Compact landscape list of amounts due
    ReceivingSheet,
}

impl DocumentKind {
    pub fn all() -> [DocumentKind; 3] {
        [
            DocumentKind::Invoice,
            DocumentKind::TotalSheet,
            DocumentKind::ReceivingSheet,
        ]
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoices",
            DocumentKind::TotalSheet => "total-sheet",
            DocumentKind::ReceivingSheet => "receiving-sheet",
        }
    }

    /// `<kind>-<YYYY-MM-DD>.pdf`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}-{}.pdf", self.file_stem(), date.format("%Y-%m-%d"))
    }
}

impl PrintArgs {
    /// Requested kinds, deduplicated and in document order
    pub fn kinds(&self) -> Vec<DocumentKind> {
        if self.kinds.is_empty() {
            return vec![DocumentKind::default()];
        }
        let mut kinds = self.kinds.clone();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// One entry of a `--rooms` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSelector {
    Block(String),
    Room(RoomName),
}

impl RoomSelector {
    pub fn matches(&self, room: &Room) -> bool {
        match self {
            RoomSelector::Block(block) => room.block_number.eq_ignore_ascii_case(block),
            RoomSelector::Room(name) => room.room_name.eq_ignore_ascii_case(&name.to_string()),
        }
    }
}

/// Parse a room selection such as "A1, A3, B"
pub fn parse_room_selection(spec: &str) -> Result<Vec<RoomSelector>, ConfigError> {
    let mut selectors = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some(block) = parse_block(part) {
            selectors.push(RoomSelector::Block(block));
        } else {
            let name = parse_room_name(part)
                .map_err(|_| ConfigError::InvalidRoomSelection(part.to_string()))?;
            selectors.push(RoomSelector::Room(name));
        }
    }

    if selectors.is_empty() {
        return Err(ConfigError::InvalidRoomSelection(spec.to_string()));
    }

    Ok(selectors)
}

/// Parse a reading such as "A1=120,45" into (room, electric, water)
pub fn parse_reading(spec: &str) -> Result<(RoomName, f64, f64), ConfigError> {
    let invalid = || ConfigError::InvalidReading(spec.to_string());

    let (room, values) = spec.split_once('=').ok_or_else(invalid)?;
    let (electric, water) = values.split_once(',').ok_or_else(invalid)?;

    let room = parse_room_name(room).map_err(|_| invalid())?;
    let electric: f64 = electric.trim().parse().map_err(|_| invalid())?;
    let water: f64 = water.trim().parse().map_err(|_| invalid())?;

    if !electric.is_finite() || !water.is_finite() {
        return Err(invalid());
    }

    Ok((room, electric, water))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print_args(extra: &[&str]) -> PrintArgs {
        let mut argv = vec!["unit-ledger", "print", "ledger.json"];
        argv.extend_from_slice(extra);
        match Args::parse_from(argv).command {
            Command::Print(args) => args,
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_room_selection() {
        let selectors = parse_room_selection("A1, a3,B").unwrap();
        assert_eq!(selectors.len(), 3);
        assert_eq!(
            selectors[1],
            RoomSelector::Room(RoomName {
                block: "A".to_string(),
                number: 3
            })
        );
        assert_eq!(selectors[2], RoomSelector::Block("B".to_string()));
    }

    #[test]
    fn test_parse_room_selection_rejects_garbage() {
        assert!(parse_room_selection("A1,12").is_err());
        assert!(parse_room_selection(" , ").is_err());
    }

    #[test]
    fn test_selector_matches() {
        let room = Room::new("B", 4, 0.0);
        assert!(RoomSelector::Block("b".to_string()).matches(&room));
        assert!(parse_room_selection("b4").unwrap()[0].matches(&room));
        assert!(!parse_room_selection("B5").unwrap()[0].matches(&room));
    }

    #[test]
    fn test_parse_reading() {
        let (room, electric, water) = parse_reading("a12=1530.5, 88").unwrap();
        assert_eq!(room.to_string(), "A12");
        assert_eq!(electric, 1530.5);
        assert_eq!(water, 88.0);

        assert!(parse_reading("A12=1530").is_err());
        assert!(parse_reading("A12").is_err());
        assert!(parse_reading("A12=x,1").is_err());
        assert!(parse_reading("A12=NaN,1").is_err());
    }

    #[test]
    fn test_default_kind_is_invoice() {
        assert_eq!(print_args(&[]).kinds(), vec![DocumentKind::Invoice]);
    }

    #[test]
    fn test_kinds_are_deduplicated_and_ordered() {
        let args = print_args(&[
            "--kind",
            "receiving-sheet",
            "--kind",
            "invoice",
            "--kind",
            "receiving-sheet",
        ]);
        assert_eq!(
            args.kinds(),
            vec![DocumentKind::Invoice, DocumentKind::ReceivingSheet]
        );
    }

    #[test]
    fn test_print_options() {
        let args = print_args(&["--date", "2024-03-10", "--bottom-up", "--no-date", "-c", "2"]);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert!(args.bottom_up);
        assert!(args.no_date);
        assert_eq!(args.cost_set.as_deref(), Some("2"));
        assert_eq!(args.page_size, PageSize::A4);
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(DocumentKind::Invoice.file_name(date), "invoices-2024-03-10.pdf");
        assert_eq!(DocumentKind::TotalSheet.file_name(date), "total-sheet-2024-03-10.pdf");
        assert_eq!(
            DocumentKind::ReceivingSheet.file_name(date),
            "receiving-sheet-2024-03-10.pdf"
        );
    }
}
