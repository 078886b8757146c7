//! Ledger JSON import and export
//!
//! Import is all-or-nothing: the document is checked field by field before
//! anything is deserialized, so a bad file never yields a partial ledger.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LedgerError;
use crate::model::{CostSet, InvoiceSettings, Ledger, Room, StoredCostSet, LEDGER_VERSION};

use super::room_name::parse_room_name;

/// On-disk shape, after validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerFile {
    rooms: Vec<Room>,
    utility_costs: Vec<StoredCostSet>,
    #[serde(default)]
    invoice_settings: Option<Value>,
    exported_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportFile<'a> {
    rooms: &'a [Room],
    utility_costs: &'a [CostSet],
    invoice_settings: &'a InvoiceSettings,
    exported_at: String,
    version: &'static str,
}

const ROOM_STRING_FIELDS: [(&str, &str); 2] =
    [("roomName", "room name"), ("blockNumber", "block number")];

const ROOM_NUMBER_FIELDS: [(&str, &str); 5] = [
    ("roomPrice", "room price"),
    ("currentElectric", "current electric reading"),
    ("currentWater", "current water reading"),
    ("previousElectric", "previous electric reading"),
    ("previousWater", "previous water reading"),
];

const COST_NUMBER_FIELDS: [(&str, &str); 3] = [
    ("electricityCost", "electricity cost"),
    ("waterCost", "water cost"),
    ("garbageCost", "garbage cost"),
];

/// Parse and validate a ledger export.
///
/// Legacy cost sets are upgraded, missing invoice settings fall back to the
/// defaults, and rooms missing a block or number get them from their name.
pub fn parse_ledger(content: &str) -> Result<Ledger, LedgerError> {
    let mut value: Value = serde_json::from_str(content)?;
    validate(&mut value)?;

    let file: LedgerFile = serde_json::from_value(value)?;
    let exported_at = parse_timestamp(&file.exported_at).ok_or(LedgerError::InvalidExportDate)?;

    let legacy_count = file.utility_costs.iter().filter(|c| c.is_legacy()).count();
    let cost_sets: Vec<CostSet> = file
        .utility_costs
        .into_iter()
        .map(StoredCostSet::upgrade)
        .collect();

    let invoice_settings = file
        .invoice_settings
        .and_then(|v| serde_json::from_value::<InvoiceSettings>(v).ok())
        .unwrap_or_default();

    let rooms: Vec<Room> = file.rooms.into_iter().map(fill_from_name).collect();

    log::info!(
        "Loaded {} rooms and {} cost sets ({} migrated from garbageCost)",
        rooms.len(),
        cost_sets.len(),
        legacy_count
    );

    Ok(Ledger {
        rooms,
        cost_sets,
        invoice_settings,
        exported_at: Some(exported_at),
    })
}

/// Serialize a ledger in the export format
pub fn export_ledger(ledger: &Ledger, exported_at: DateTime<Utc>) -> Result<String, LedgerError> {
    let file = ExportFile {
        rooms: &ledger.rooms,
        utility_costs: &ledger.cost_sets,
        invoice_settings: &ledger.invoice_settings,
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: LEDGER_VERSION,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Default file name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("unit-ledger-export-{}.json", date.format("%Y-%m-%d"))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn fill_from_name(mut room: Room) -> Room {
    if room.block_number.is_empty() || room.room_number == 0 {
        if let Ok(name) = parse_room_name(&room.room_name) {
            log::debug!("Room {} takes block/number from its name", room.room_name);
            if room.block_number.is_empty() {
                room.block_number = name.block;
            }
            if room.room_number == 0 {
                room.room_number = name.number;
            }
        }
    }
    room
}

/// Check the document shape. Missing or null `rooms`/`utilityCosts` are
/// replaced with empty arrays in place, and null members of each room and
/// cost set are dropped.
fn validate(value: &mut Value) -> Result<(), LedgerError> {
    let obj = value.as_object_mut().ok_or(LedgerError::InvalidFormat)?;

    if obj.get("version").and_then(Value::as_str) != Some(LEDGER_VERSION) {
        return Err(LedgerError::UnsupportedVersion);
    }

    match obj.get("exportedAt").and_then(Value::as_str) {
        Some(s) if parse_timestamp(s).is_some() => {}
        _ => return Err(LedgerError::InvalidExportDate),
    }

    for key in ["rooms", "utilityCosts"] {
        if obj.get(key).map_or(true, Value::is_null) {
            obj.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }

    let rooms = obj
        .get_mut("rooms")
        .and_then(Value::as_array_mut)
        .ok_or(LedgerError::NotAnArray("Rooms"))?;
    for (i, room) in rooms.iter_mut().enumerate() {
        validate_room(room, i + 1)?;
        strip_nulls(room);
    }

    let costs = obj
        .get_mut("utilityCosts")
        .and_then(Value::as_array_mut)
        .ok_or(LedgerError::NotAnArray("Utility costs"))?;
    for (i, cost) in costs.iter_mut().enumerate() {
        validate_cost_set(cost, i + 1)?;
        strip_nulls(cost);
    }

    Ok(())
}

/// Null members count as absent and take their default
fn strip_nulls(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        obj.retain(|_, v| !v.is_null());
    }
}

/// Present, non-null field
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn validate_room(room: &Value, index: usize) -> Result<(), LedgerError> {
    let obj = room.as_object().ok_or(LedgerError::InvalidRoom(index))?;
    let invalid = |field: &'static str| LedgerError::InvalidRoomField { index, field };

    for (key, label) in ROOM_STRING_FIELDS {
        if field(obj, key).is_some_and(|v| !v.is_string()) {
            return Err(invalid(label));
        }
    }
    if field(obj, "roomNumber").is_some_and(|v| v.as_u64().map_or(true, |n| n > u32::MAX as u64)) {
        return Err(invalid("room number"));
    }
    for (key, label) in ROOM_NUMBER_FIELDS {
        if field(obj, key).is_some_and(|v| !v.is_number()) {
            return Err(invalid(label));
        }
    }
    if field(obj, "updatedAt").is_some_and(|v| !v.is_string()) {
        return Err(invalid("update time"));
    }
    Ok(())
}

fn validate_cost_set(cost: &Value, index: usize) -> Result<(), LedgerError> {
    let obj = cost.as_object().ok_or(LedgerError::InvalidCostSet(index))?;
    let invalid = |field: &'static str| LedgerError::InvalidCostSetField { index, field };

    if field(obj, "name").is_some_and(|v| !v.is_string()) {
        return Err(invalid("name"));
    }
    if field(obj, "id").is_some_and(|v| !v.is_u64()) {
        return Err(invalid("id"));
    }
    for (key, label) in COST_NUMBER_FIELDS {
        if field(obj, key).is_some_and(|v| !v.is_number()) {
            return Err(invalid(label));
        }
    }
    if let Some(services) = field(obj, "serviceCosts") {
        let services = services.as_array().ok_or_else(|| invalid("service costs"))?;
        let well_formed = services.iter().all(|s| {
            s.get("name").is_some_and(Value::is_string) && s.get("fee").is_some_and(Value::is_number)
        });
        if !well_formed {
            return Err(invalid("service costs"));
        }
    }
    Ok(())
}
