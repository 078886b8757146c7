//! Invoice Layout Renderer
//!
//! One invoice card per room, four cards per A4 page in a centred 2x2 grid.
//! Each card shows both meter readings with their charges, the rent, every
//! service fee, the rounded grand total and the footer remarks.

use printpdf::{BuiltinFont, Mm, PdfPage};

use crate::config::Settings;
use crate::error::RenderError;
use crate::model::{compute_charges_with, sort_rooms, ChargeBreakdown, CostSet, Room};

use crate::render::helpers::colors::{black, border};
use crate::render::helpers::compress::save_document;
use crate::render::helpers::format::{format_date, format_money, format_number, group_digits};
use crate::render::helpers::layer::{Align, LayerBuilder};
use crate::render::helpers::pagination::{Grid, PagePlan};

/// Card size and spacing in mm
pub const INVOICE_GRID: Grid = Grid {
    columns: 2,
    rows: 2,
    cell_width: 97.0,
    cell_height: 140.0,
    spacing: 10.0,
};

const LINE_HEIGHT: f32 = 7.0;
const INDENT: f32 = 5.0;
/// Offset of reading values from the label column
const VALUE_COLUMN: f32 = 25.0;
/// Right-aligned amounts end this far from the card's right edge
const AMOUNT_INSET: f32 = 10.0;
/// The date is printed this far left of the card's right edge
const DATE_OFFSET: f32 = 50.0;
const REMARK_LINE_HEIGHT: f32 = 8.0;

const FONT: BuiltinFont = BuiltinFont::Helvetica;
const BOLD: BuiltinFont = BuiltinFont::HelveticaBold;

/// One room's invoice
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceCard {
    pub room: Room,
    pub charges: ChargeBreakdown,
}

/// Sort the rooms, compute their charges and assign each card to a page slot
pub fn plan_invoices(
    rooms: &[Room],
    cost_set: &CostSet,
    settings: &Settings,
) -> Vec<PagePlan<InvoiceCard>> {
    let mut sorted = rooms.to_vec();
    sort_rooms(&mut sorted);

    let cards = sorted.into_iter().map(|room| {
        let charges = compute_charges_with(&room, cost_set, settings.water_rounding);
        InvoiceCard { room, charges }
    });

    INVOICE_GRID.paginate(cards, settings.page_width, settings.page_height)
}

/// Invoice renderer
pub struct InvoiceRenderer {
    settings: Settings,
}

impl InvoiceRenderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Generate the invoices PDF
    pub fn render(&self, rooms: &[Room], cost_set: &CostSet) -> Result<Vec<u8>, RenderError> {
        let plan = plan_invoices(rooms, cost_set, &self.settings);
        log::info!(
            "Rendering {} invoices on {} pages",
            rooms.len(),
            plan.len()
        );

        let pages = plan
            .iter()
            .map(|page| {
                let mut layer = LayerBuilder::new(self.settings.page_height);
                for placement in &page.placements {
                    self.render_card(&mut layer, placement.x, placement.y, &placement.item, cost_set);
                }
                PdfPage::new(
                    Mm(self.settings.page_width),
                    Mm(self.settings.page_height),
                    layer.into_ops(),
                )
            })
            .collect();

        Ok(save_document("Invoices", pages))
    }

    /// Draw one card with its top-left corner at (x, y)
    fn render_card(
        &self,
        layer: &mut LayerBuilder,
        x: f32,
        y: f32,
        card: &InvoiceCard,
        cost_set: &CostSet,
    ) {
        let header = self.settings.header_font_size;
        let body = self.settings.body_font_size;
        let width = INVOICE_GRID.cell_width;
        let amount_x = x + width - AMOUNT_INSET;
        let label_x = x + INDENT;
        let reading_x = x + INDENT * 2.0;
        let value_x = reading_x + VALUE_COLUMN;
        let room = &card.room;
        let charges = &card.charges;

        layer.set_outline_color(border());
        layer.set_outline_thickness(self.settings.border_thickness);
        layer.add_rect(x, y, width, INVOICE_GRID.cell_height);

        layer.set_fill_color(black());

        // Header
        layer.use_text(
            format!("Room: {}", room.room_name),
            header,
            label_x,
            y + LINE_HEIGHT,
            BOLD,
            Align::Left,
        );
        layer.use_text(
            format!("Date: {}", format_date(self.settings.print_date)),
            header,
            x + width - DATE_OFFSET,
            y + LINE_HEIGHT,
            FONT,
            Align::Left,
        );

        let mut current_y = y + LINE_HEIGHT * 3.0;

        // Metered sections
        let meters = [
            (
                "ELECTRICITY:",
                room.current_electric,
                room.previous_electric,
                charges.electric_usage,
                cost_set.electricity_cost,
                charges.electricity,
            ),
            (
                "WATER:",
                room.current_water,
                room.previous_water,
                charges.water_usage,
                cost_set.water_cost,
                charges.water,
            ),
        ];

        for (label, current, previous, usage, price, charge) in meters {
            layer.use_text(label, body, label_x, current_y, BOLD, Align::Left);
            current_y += LINE_HEIGHT;

            layer.use_text("New:", body, reading_x, current_y, FONT, Align::Left);
            layer.use_text(format_number(current), body, value_x, current_y, FONT, Align::Left);
            current_y += LINE_HEIGHT;

            layer.use_text("Old:", body, reading_x, current_y, FONT, Align::Left);
            layer.use_text(format_number(previous), body, value_x, current_y, FONT, Align::Left);
            current_y += LINE_HEIGHT;

            layer.use_text(
                format!("{} x {} =", format_number(usage), format_money(price)),
                body,
                value_x,
                current_y,
                FONT,
                Align::Left,
            );
            layer.use_text(format_money(charge), body, amount_x, current_y, FONT, Align::Right);
            current_y += LINE_HEIGHT * 1.5;
        }

        // Rent and services
        layer.use_text("RENT:", body, label_x, current_y, BOLD, Align::Left);
        layer.use_text(format_money(charges.rent), body, amount_x, current_y, FONT, Align::Right);

        for service in &cost_set.service_costs {
            current_y += LINE_HEIGHT;
            layer.use_text(
                format!("{}:", service.name.to_uppercase()),
                body,
                label_x,
                current_y,
                BOLD,
                Align::Left,
            );
            layer.use_text(format_money(service.fee), body, amount_x, current_y, FONT, Align::Right);
        }
        current_y += LINE_HEIGHT * 2.0;

        // Total
        layer.use_text("TOTAL:", header, label_x, current_y, BOLD, Align::Left);
        layer.use_text(
            group_digits(charges.grand_total),
            header,
            amount_x,
            current_y,
            BOLD,
            Align::Right,
        );
        current_y += LINE_HEIGHT * 2.0;

        // Footer
        let centre_x = x + width / 2.0;
        for remark in &self.settings.remarks {
            if current_y > y + INVOICE_GRID.cell_height {
                log::warn!(
                    "Invoice for room {} is too long; remark {:?} falls outside the card",
                    room.room_name,
                    remark
                );
            }
            layer.use_text(remark, header, centre_x, current_y, FONT, Align::Center);
            current_y += REMARK_LINE_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_set() -> CostSet {
        CostSet::new(1, "Default", 3.5, 15.0).with_service("Rác", 20.0)
    }

    fn rooms(count: u32) -> Vec<Room> {
        (1..=count)
            .rev()
            .map(|n| Room::new("A", n, 1500.0).with_readings(1200.0, 1245.0, 300.0, 305.0))
            .collect()
    }

    #[test]
    fn test_five_rooms_take_two_pages() {
        let plan = plan_invoices(&rooms(5), &cost_set(), &Settings::default());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].len(), 4);
        assert_eq!(plan[1].len(), 1);
    }

    #[test]
    fn test_cards_are_sorted_and_placed_in_the_grid() {
        let plan = plan_invoices(&rooms(5), &cost_set(), &Settings::default());

        let names: Vec<&str> = plan[0].items().map(|c| c.room.room_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A2", "A3", "A4"]);

        let second = &plan[0].placements[1];
        assert_eq!((second.x, second.y), (110.0, 3.5));
        let last = &plan[1].placements[0];
        assert_eq!(last.item.room.room_name, "A5");
        assert_eq!((last.x, last.y), (3.0, 3.5));
    }

    #[test]
    fn test_cards_carry_charges() {
        let plan = plan_invoices(&rooms(1), &cost_set(), &Settings::default());
        let card = &plan[0].placements[0].item;
        // 45 * 3.5 = 157.5 -> 158; 5 * 15 = 75; 20; 1500
        assert_eq!(card.charges.electricity, 158.0);
        assert_eq!(card.charges.water, 75.0);
        assert_eq!(card.charges.grand_total, 1_753_000);
    }

    #[test]
    fn test_no_rooms_gives_one_blank_page() {
        let plan = plan_invoices(&[], &cost_set(), &Settings::default());
        assert_eq!(plan.len(), 1);
        assert!(plan[0].is_empty());
    }

    #[test]
    fn test_render_produces_pdf() {
        let renderer = InvoiceRenderer::new(Settings::default());
        let bytes = renderer.render(&rooms(5), &cost_set()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
