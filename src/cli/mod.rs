mod args;

pub use args::{
    parse_reading, parse_room_selection, Args, Command, DocumentKind, ExportArgs, PageSize,
    PrintArgs, ReadArgs, RoomSelector,
};
