//! Total Sheet Layout Renderer
//!
//! One A4 page per block: a bordered table with a row per room and a
//! borderless totals row beneath it. The table sits at the top margin, or
//! with `bottom_up` it is anchored so the totals row rests on the bottom
//! margin.

use printpdf::{BuiltinFont, Mm, PdfPage};

use crate::config::Settings;
use crate::error::RenderError;
use crate::model::{compute_charges_with, group_by_block, CostSet, Room};

use crate::render::helpers::colors::{black, border};
use crate::render::helpers::compress::save_document;
use crate::render::helpers::format::{format_day_month, format_month_year, format_number};
use crate::render::helpers::layer::{Align, LayerBuilder};

const MARGIN: f32 = 5.0;
const CELL_PADDING: f32 = 3.0;
const HEADER_HEIGHT: f32 = 12.0;
const ROW_HEIGHT: f32 = 10.0;
/// Space reserved for the block/date title when it is printed
const TITLE_HEIGHT: f32 = 8.0;
const TOTAL_ROW_SPACING: f32 = 1.0;
/// The date in the title starts this far right of the block label
const TITLE_DATE_OFFSET: f32 = 60.0;
const TOTALS_FONT_SIZE: f32 = 13.0;

const COLUMN_WIDTHS: [f32; 8] = [20.0, 20.0, 25.0, 25.0, 25.0, 25.0, 25.0, 40.0];
const HEADERS: [&str; 8] = [
    "Date", "Room", "Electric", "Water", "Services", "Rent", "Total", "Note",
];

const FONT: BuiltinFont = BuiltinFont::Helvetica;
const BOLD: BuiltinFont = BuiltinFont::HelveticaBold;

/// One room's row. Amounts are in thousands; `total` is the rounded grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub room_name: String,
    pub electricity: f64,
    pub water: f64,
    pub services: f64,
    pub rent: f64,
    pub total: i64,
}

/// Column sums over every row of a sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTotals {
    pub electricity: f64,
    pub water: f64,
    pub services: f64,
    pub rent: f64,
    pub total: i64,
}

impl SheetTotals {
    fn add(&mut self, row: &SheetRow) {
        self.electricity += row.electricity;
        self.water += row.water;
        self.services += row.services;
        self.rent += row.rent;
        self.total += row.total;
    }
}

/// The table for one block, with its vertical positions (mm from the page top)
#[derive(Debug, Clone, PartialEq)]
pub struct TotalSheet {
    pub block: String,
    pub rows: Vec<SheetRow>,
    pub totals: SheetTotals,
    /// Baseline of the block/date title, if printed
    pub title_y: Option<f32>,
    /// Top of the header row
    pub table_y: f32,
    /// Top of the totals row
    pub totals_y: f32,
}

impl TotalSheet {
    /// Top of the data row at `index`
    pub fn row_y(&self, index: usize) -> f32 {
        self.table_y + HEADER_HEIGHT + index as f32 * ROW_HEIGHT
    }
}

fn table_width() -> f32 {
    COLUMN_WIDTHS.iter().sum()
}

/// Group rooms by block and lay out one table per block
pub fn plan_total_sheets(rooms: &[Room], cost_set: &CostSet, settings: &Settings) -> Vec<TotalSheet> {
    group_by_block(rooms)
        .into_iter()
        .map(|group| {
            let rows: Vec<SheetRow> = group
                .rooms
                .iter()
                .map(|room| {
                    let charges = compute_charges_with(room, cost_set, settings.water_rounding);
                    SheetRow {
                        room_name: room.room_name.clone(),
                        electricity: charges.electricity,
                        water: charges.water,
                        services: charges.services,
                        rent: charges.rent,
                        total: charges.grand_total_units(),
                    }
                })
                .collect();

            let mut totals = SheetTotals::default();
            for row in &rows {
                totals.add(row);
            }

            place_sheet(group.block.to_string(), rows, totals, settings)
        })
        .collect()
}

fn place_sheet(
    block: String,
    rows: Vec<SheetRow>,
    totals: SheetTotals,
    settings: &Settings,
) -> TotalSheet {
    let title_height = if settings.include_date { TITLE_HEIGHT } else { 0.0 };
    let content_height = title_height
        + HEADER_HEIGHT
        + ROW_HEIGHT * rows.len() as f32
        + TOTAL_ROW_SPACING
        + ROW_HEIGHT;
    let available = settings.page_height - 2.0 * MARGIN;

    if content_height > available {
        log::warn!(
            "Block {} has {} rooms and does not fit on one page",
            block,
            rows.len()
        );
    }

    let top = if settings.bottom_up {
        (settings.page_height - MARGIN - content_height).max(MARGIN)
    } else {
        MARGIN
    };

    let title_y = settings.include_date.then(|| top + TITLE_HEIGHT - 2.0);
    let table_y = top + title_height;
    let totals_y = table_y + HEADER_HEIGHT + ROW_HEIGHT * rows.len() as f32 + TOTAL_ROW_SPACING;

    TotalSheet {
        block,
        rows,
        totals,
        title_y,
        table_y,
        totals_y,
    }
}

/// Total sheet renderer
pub struct TotalSheetRenderer {
    settings: Settings,
}

impl TotalSheetRenderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Generate the total sheet PDF, one page per block
    pub fn render(&self, rooms: &[Room], cost_set: &CostSet) -> Result<Vec<u8>, RenderError> {
        let sheets = plan_total_sheets(rooms, cost_set, &self.settings);
        log::info!("Rendering total sheets for {} blocks", sheets.len());

        let page = |ops| {
            PdfPage::new(
                Mm(self.settings.page_width),
                Mm(self.settings.page_height),
                ops,
            )
        };

        let mut pages: Vec<PdfPage> = sheets
            .iter()
            .map(|sheet| {
                let mut layer = LayerBuilder::new(self.settings.page_height);
                self.render_sheet(&mut layer, sheet);
                page(layer.into_ops())
            })
            .collect();

        if pages.is_empty() {
            pages.push(page(Vec::new()));
        }

        Ok(save_document("Total Sheet", pages))
    }

    fn render_sheet(&self, layer: &mut LayerBuilder, sheet: &TotalSheet) {
        let start_x = (self.settings.page_width - table_width()) / 2.0;
        let body = self.settings.body_font_size;

        layer.set_fill_color(black());
        layer.set_outline_color(border());
        layer.set_outline_thickness(self.settings.border_thickness);

        if let Some(title_y) = sheet.title_y {
            let size = self.settings.title_font_size;
            layer.use_text(
                format!("Block: {}", sheet.block),
                size,
                start_x,
                title_y,
                BOLD,
                Align::Left,
            );
            layer.use_text(
                format_month_year(self.settings.print_date),
                size,
                start_x + TITLE_DATE_OFFSET,
                title_y,
                FONT,
                Align::Left,
            );
        }

        // Header row
        let mut x = start_x;
        for (header, width) in HEADERS.iter().zip(COLUMN_WIDTHS) {
            layer.add_rect(x, sheet.table_y, width, HEADER_HEIGHT);
            layer.use_text_in_band(
                header,
                self.settings.header_font_size,
                x + width / 2.0,
                sheet.table_y,
                HEADER_HEIGHT,
                BOLD,
                Align::Center,
            );
            x += width;
        }

        // Data rows
        let date = format_day_month(self.settings.print_date);
        for (index, row) in sheet.rows.iter().enumerate() {
            let top = sheet.row_y(index);
            let cells = [
                date.clone(),
                row.room_name.clone(),
                format_number(row.electricity),
                format_number(row.water),
                format_number(row.services),
                format_number(row.rent),
                row.total.to_string(),
                String::new(),
            ];

            let mut x = start_x;
            for (column, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
                layer.add_rect(x, top, width, ROW_HEIGHT);
                let (anchor, align) = if column < 2 {
                    (x + width / 2.0, Align::Center)
                } else {
                    (x + width - CELL_PADDING, Align::Right)
                };
                layer.use_text_in_band(cell, body, anchor, top, ROW_HEIGHT, FONT, align);
                x += width;
            }
        }

        // Totals row, no borders
        let totals = &sheet.totals;
        let cells = [
            "Total".to_string(),
            String::new(),
            format_number(totals.electricity),
            format_number(totals.water),
            format_number(totals.services),
            format_number(totals.rent),
            totals.total.to_string(),
            String::new(),
        ];

        let mut x = start_x;
        for (column, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
            let (anchor, align) = if column == 0 {
                (x + CELL_PADDING, Align::Left)
            } else {
                (x + width - CELL_PADDING, Align::Right)
            };
            layer.use_text_in_band(
                cell,
                TOTALS_FONT_SIZE,
                anchor,
                sheet.totals_y,
                ROW_HEIGHT,
                BOLD,
                align,
            );
            x += width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_set() -> CostSet {
        CostSet::new(1, "Default", 3.5, 15.0).with_service("Rác", 20.0)
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room::new("B", 2, 1600.0).with_readings(500.0, 540.0, 80.0, 84.0),
            Room::new("A", 3, 1500.0).with_readings(100.0, 110.0, 10.0, 12.0),
            Room::new("A", 1, 1500.0).with_readings(1200.0, 1245.0, 300.0, 305.0),
            Room::new("C", 1, 1400.0),
        ]
    }

    fn settings(bottom_up: bool, include_date: bool) -> Settings {
        Settings {
            bottom_up,
            include_date,
            ..Settings::default()
        }
    }

    #[test]
    fn test_one_sheet_per_block() {
        let sheets = plan_total_sheets(&rooms(), &cost_set(), &settings(false, true));
        let blocks: Vec<&str> = sheets.iter().map(|s| s.block.as_str()).collect();
        assert_eq!(blocks, vec!["A", "B", "C"]);

        let names: Vec<&str> = sheets[0].rows.iter().map(|r| r.room_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A3"]);
    }

    #[test]
    fn test_totals_are_column_sums() {
        let sheets = plan_total_sheets(&rooms(), &cost_set(), &settings(false, true));
        let sheet = &sheets[0];

        // A1: 158 + 75 + 20 + 1500 = 1753; A3: 35 + 30 + 20 + 1500 = 1585
        assert_eq!(sheet.rows[0].total, 1753);
        assert_eq!(sheet.rows[1].total, 1585);

        assert_eq!(sheet.totals.electricity, 193.0);
        assert_eq!(sheet.totals.water, 105.0);
        assert_eq!(sheet.totals.services, 40.0);
        assert_eq!(sheet.totals.rent, 3000.0);
        assert_eq!(sheet.totals.total, 3338);
    }

    #[test]
    fn test_top_down_positions() {
        let sheets = plan_total_sheets(&rooms(), &cost_set(), &settings(false, true));
        let sheet = &sheets[0];
        assert_eq!(sheet.title_y, Some(11.0));
        assert_eq!(sheet.table_y, 13.0);
        assert_eq!(sheet.row_y(1), 35.0);
        assert_eq!(sheet.totals_y, 46.0);
    }

    #[test]
    fn test_without_title_table_starts_at_margin() {
        let sheets = plan_total_sheets(&rooms(), &cost_set(), &settings(false, false));
        assert_eq!(sheets[0].title_y, None);
        assert_eq!(sheets[0].table_y, MARGIN);
    }

    #[test]
    fn test_bottom_up_rests_totals_on_bottom_margin() {
        for include_date in [true, false] {
            let sheets = plan_total_sheets(&rooms(), &cost_set(), &settings(true, include_date));
            for sheet in &sheets {
                assert!((sheet.totals_y - (297.0 - MARGIN - ROW_HEIGHT)).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_no_rooms_gives_no_sheets() {
        assert!(plan_total_sheets(&[], &cost_set(), &Settings::default()).is_empty());
    }

    #[test]
    fn test_table_is_centred() {
        assert_eq!(table_width(), 205.0);
    }

    #[test]
    fn test_render_produces_pdf() {
        let renderer = TotalSheetRenderer::new(settings(true, true));
        let bytes = renderer.render(&rooms(), &cost_set()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let empty = renderer.render(&[], &cost_set()).unwrap();
        assert!(empty.starts_with(b"%PDF"));
    }
}
