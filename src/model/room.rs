use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::ReadingError;

/// A rentable room with its two most recent meter readings.
///
/// Money fields are in thousands of the local currency, so a `room_price` of
/// `1500.0` prints as `1 500 000`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    pub room_name: String,
    pub block_number: String,
    pub room_number: u32,
    pub room_price: f64,
    pub current_electric: f64,
    pub current_water: f64,
    pub previous_electric: f64,
    pub previous_water: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Room {
    pub fn new(block: &str, number: u32, price: f64) -> Self {
        Self {
            room_name: format!("{}{}", block, number),
            block_number: block.to_string(),
            room_number: number,
            room_price: price,
            ..Default::default()
        }
    }

    /// Set the previous and current readings (builder style)
    pub fn with_readings(
        mut self,
        previous_electric: f64,
        current_electric: f64,
        previous_water: f64,
        current_water: f64,
    ) -> Self {
        self.previous_electric = previous_electric;
        self.current_electric = current_electric;
        self.previous_water = previous_water;
        self.current_water = current_water;
        self
    }

    pub fn electric_usage(&self) -> f64 {
        self.current_electric - self.previous_electric
    }

    pub fn water_usage(&self) -> f64 {
        self.current_water - self.previous_water
    }

    /// Roll the meters forward with a new month's readings.
    ///
    /// The current readings become the previous ones and the new values become
    /// current. A new reading lower than the current one is rejected.
    pub fn apply_readings(
        &self,
        new_electric: f64,
        new_water: f64,
        at: DateTime<Utc>,
    ) -> Result<Room, ReadingError> {
        if new_electric < self.current_electric {
            return Err(ReadingError::ElectricBelowCurrent {
                room: self.room_name.clone(),
                new: new_electric,
                current: self.current_electric,
            });
        }
        if new_water < self.current_water {
            return Err(ReadingError::WaterBelowCurrent {
                room: self.room_name.clone(),
                new: new_water,
                current: self.current_water,
            });
        }

        Ok(Room {
            previous_electric: self.current_electric,
            previous_water: self.current_water,
            current_electric: new_electric,
            current_water: new_water,
            updated_at: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..self.clone()
        })
    }
}

/// Print order: block ascending, then room number ascending
pub fn compare_rooms(a: &Room, b: &Room) -> Ordering {
    a.block_number
        .cmp(&b.block_number)
        .then(a.room_number.cmp(&b.room_number))
}

/// Sort rooms into print order. The sort is stable, so rooms with the same
/// block and number keep their input order.
pub fn sort_rooms(rooms: &mut [Room]) {
    rooms.sort_by(compare_rooms);
}

/// Rooms of one block, in print order
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGroup<'a> {
    pub block: &'a str,
    pub rooms: Vec<&'a Room>,
}

/// Group rooms by block. Blocks come out in ascending order and rooms within
/// each block are sorted by room number.
pub fn group_by_block(rooms: &[Room]) -> Vec<BlockGroup<'_>> {
    let mut ordered: Vec<&Room> = rooms.iter().collect();
    ordered.sort_by(|a, b| compare_rooms(a, b));

    let mut groups: Vec<BlockGroup<'_>> = Vec::new();
    for room in ordered {
        let same_block = groups
            .last()
            .is_some_and(|group| group.block == room.block_number);

        if same_block {
            if let Some(group) = groups.last_mut() {
                group.rooms.push(room);
            }
        } else {
            groups.push(BlockGroup {
                block: &room.block_number,
                rooms: vec![room],
            });
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn names(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(|r| r.room_name.as_str()).collect()
    }

    #[test]
    fn test_usage() {
        let room = Room::new("A", 1, 1500.0).with_readings(100.0, 150.0, 20.0, 26.0);
        assert_eq!(room.electric_usage(), 50.0);
        assert_eq!(room.water_usage(), 6.0);
    }

    #[test]
    fn test_sort_rooms_block_then_number() {
        let mut rooms = vec![
            Room::new("B", 2, 0.0),
            Room::new("A", 10, 0.0),
            Room::new("B", 1, 0.0),
            Room::new("A", 2, 0.0),
        ];
        sort_rooms(&mut rooms);
        assert_eq!(names(&rooms), vec!["A2", "A10", "B1", "B2"]);
    }

    #[test]
    fn test_group_by_block() {
        let rooms = vec![
            Room::new("C", 1, 0.0),
            Room::new("A", 3, 0.0),
            Room::new("A", 1, 0.0),
        ];
        let groups = group_by_block(&rooms);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].block, "A");
        assert_eq!(groups[0].rooms[0].room_name, "A1");
        assert_eq!(groups[0].rooms[1].room_name, "A3");
        assert_eq!(groups[1].block, "C");
    }

    #[test]
    fn test_group_by_block_empty() {
        assert!(group_by_block(&[]).is_empty());
    }

    #[test]
    fn test_apply_readings_rolls_forward() {
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let room = Room::new("A", 1, 1500.0).with_readings(100.0, 150.0, 20.0, 26.0);

        let updated = room.apply_readings(180.0, 30.0, at).unwrap();
        assert_eq!(updated.previous_electric, 150.0);
        assert_eq!(updated.current_electric, 180.0);
        assert_eq!(updated.previous_water, 26.0);
        assert_eq!(updated.current_water, 30.0);
        assert_eq!(updated.updated_at.as_deref(), Some("2024-03-10T08:00:00.000Z"));
        assert_eq!(updated.room_price, 1500.0);
    }

    #[test]
    fn test_apply_readings_rejects_lower_reading() {
        let at = Utc::now();
        let room = Room::new("A", 1, 1500.0).with_readings(100.0, 150.0, 20.0, 26.0);

        assert!(matches!(
            room.apply_readings(149.0, 30.0, at),
            Err(ReadingError::ElectricBelowCurrent { .. })
        ));
        assert!(matches!(
            room.apply_readings(150.0, 25.0, at),
            Err(ReadingError::WaterBelowCurrent { .. })
        ));
        // Unchanged readings are allowed (a vacant month)
        assert!(room.apply_readings(150.0, 26.0, at).is_ok());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let room = Room::new("B", 4, 2000.0);
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["roomName"], "B4");
        assert_eq!(json["blockNumber"], "B");
        assert_eq!(json["roomNumber"], 4);
        assert!(json.get("updatedAt").is_none());
    }

    proptest! {
        #[test]
        fn sorting_is_independent_of_input_order(
            keys in prop::collection::vec((0u8..4, 1u32..30), 0..40),
            seed in any::<u64>()
        ) {
            let rooms: Vec<Room> = keys
                .iter()
                .map(|(b, n)| Room::new(&((b'A' + b) as char).to_string(), *n, 0.0))
                .collect();

            let mut sorted = rooms.clone();
            sort_rooms(&mut sorted);

            // Rotate by an arbitrary amount to get a different input order
            let mut shuffled = rooms.clone();
            if !shuffled.is_empty() {
                let k = (seed as usize) % shuffled.len();
                shuffled.rotate_left(k);
            }
            sort_rooms(&mut shuffled);

            prop_assert_eq!(names(&sorted), names(&shuffled));
            for pair in sorted.windows(2) {
                prop_assert_ne!(compare_rooms(&pair[0], &pair[1]), Ordering::Greater);
            }
        }
    }
}
