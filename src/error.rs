use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format")]
    InvalidFormat,

    #[error("Unsupported file version")]
    UnsupportedVersion,

    #[error("Invalid export date")]
    InvalidExportDate,

    #[error("{0} must be an array")]
    NotAnArray(&'static str),

    #[error("Invalid {field} in room {index}")]
    InvalidRoomField { index: usize, field: &'static str },

    #[error("Invalid room object at index {0}")]
    InvalidRoom(usize),

    #[error("Invalid {field} in utility cost set {index}")]
    InvalidCostSetField { index: usize, field: &'static str },

    #[error("Invalid utility cost object at index {0}")]
    InvalidCostSet(usize),

    #[error("Invalid room name: {0}")]
    InvalidRoomName(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ReadingError {
    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("New electric reading {new} for room {room} is lower than the current {current}")]
    ElectricBelowCurrent { room: String, new: f64, current: f64 },

    #[error("New water reading {new} for room {room} is lower than the current {current}")]
    WaterBelowCurrent { room: String, new: f64, current: f64 },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    PdfGeneration(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid room selection: {0}")]
    InvalidRoomSelection(String),

    #[error("Unknown cost set: {0}")]
    UnknownCostSet(String),

    #[error("Ledger has no utility cost sets")]
    NoCostSets,

    #[error("Invalid reading {0}, expected ROOM=ELECTRIC,WATER")]
    InvalidReading(String),
}
