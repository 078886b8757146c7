use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

use super::cost::CostSet;
use super::room::Room;

/// The only ledger file version this crate reads and writes
pub const LEDGER_VERSION: &str = "1.0.0";

/// Footer lines printed on every invoice unless the ledger overrides them
pub const DEFAULT_INVOICE_REMARKS: [&str; 2] = [
    "Trả phòng vui lòng báo trước 1 tháng.",
    "Nếu không báo, nhà trọ không hoàn cọc.",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    pub remarks: Vec<String>,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            remarks: DEFAULT_INVOICE_REMARKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Everything the operator keeps: rooms, cost sets and invoice settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    pub rooms: Vec<Room>,
    pub cost_sets: Vec<CostSet>,
    pub invoice_settings: InvoiceSettings,
    /// When the file was exported, if it was read from one
    pub exported_at: Option<DateTime<Utc>>,
}

impl Ledger {
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|r| r.room_name.eq_ignore_ascii_case(name))
    }

    /// Find a cost set by numeric id or by name (case-insensitive)
    pub fn cost_set(&self, key: &str) -> Option<&CostSet> {
        let key = key.trim();
        if let Ok(id) = key.parse::<u64>() {
            if let Some(set) = self.cost_sets.iter().find(|s| s.id == id) {
                return Some(set);
            }
        }
        self.cost_sets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(key))
    }

    /// Record a new month's readings for one room, rolling its meters forward
    pub fn record_reading(
        &mut self,
        name: &str,
        electric: f64,
        water: f64,
        at: DateTime<Utc>,
    ) -> Result<&Room, ReadingError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.room_name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ReadingError::UnknownRoom(name.to_string()))?;

        *room = room.apply_readings(electric, water, at)?;
        log::info!(
            "Room {}: electric {} -> {}, water {} -> {}",
            room.room_name,
            room.previous_electric,
            room.current_electric,
            room.previous_water,
            room.current_water
        );
        Ok(room)
    }
}
