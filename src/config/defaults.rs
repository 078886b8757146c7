/// A4 portrait width in mm
pub const A4_WIDTH: f32 = 210.0;

/// A4 portrait height in mm
pub const A4_HEIGHT: f32 = 297.0;

/// Day of the month used when no print date is given
pub const DEFAULT_PRINT_DAY: u32 = 10;

/// Body font size in points
pub const DEFAULT_BODY_FONT_SIZE: f32 = 12.0;

/// Heading font size in points (invoice header, totals)
pub const DEFAULT_HEADER_FONT_SIZE: f32 = 14.0;

/// Total sheet title font size in points
pub const DEFAULT_TITLE_FONT_SIZE: f32 = 16.0;

/// Table and card border thickness in points
pub const DEFAULT_BORDER_THICKNESS: f32 = 0.5;
