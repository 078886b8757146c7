pub mod ledger;
pub mod room_name;

pub use ledger::{export_file_name, export_ledger, parse_ledger};
pub use room_name::{parse_block, parse_room_name, RoomName};
