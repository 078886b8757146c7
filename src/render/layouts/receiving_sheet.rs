//! Receiving Sheet Layout Renderer
//!
//! A landscape checklist of the amount due from every room, used when
//! collecting payments. Lines run down narrow columns, block after block,
//! with a gap between blocks.

use printpdf::{BuiltinFont, Mm, PdfPage};

use crate::config::Settings;
use crate::error::RenderError;
use crate::model::{compute_charges_with, group_by_block, CostSet, Room};

use crate::render::helpers::colors::black;
use crate::render::helpers::compress::save_document;
use crate::render::helpers::layer::{Align, LayerBuilder};
use crate::render::helpers::pagination::{ColumnFlow, FlowMetrics, PagePlan};

pub const RECEIVING_FLOW: FlowMetrics = FlowMetrics {
    start_x: 5.0,
    start_y: 10.0,
    column_width: 30.0,
    line_height: 8.0,
    bottom_margin: 5.0,
};

/// Space between the last line of one block and the first of the next
const BLOCK_GAP: f32 = 12.0;

/// One room and the amount due, in thousands
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivingLine {
    pub room_name: String,
    pub amount: i64,
}

impl ReceivingLine {
    pub fn text(&self) -> String {
        format!("{}: {}", self.room_name, self.amount)
    }
}

/// Flow every room's line into columns on landscape pages
pub fn plan_receiving_sheet(
    rooms: &[Room],
    cost_set: &CostSet,
    settings: &Settings,
) -> Vec<PagePlan<ReceivingLine>> {
    let (width, height) = settings.landscape();
    let mut flow = ColumnFlow::new(RECEIVING_FLOW, width, height);

    for (index, group) in group_by_block(rooms).iter().enumerate() {
        if index > 0 {
            flow.gap(BLOCK_GAP);
        }
        for room in &group.rooms {
            let charges = compute_charges_with(room, cost_set, settings.water_rounding);
            flow.push(ReceivingLine {
                room_name: room.room_name.clone(),
                amount: charges.grand_total_units(),
            });
        }
    }

    flow.finish()
}

/// Receiving sheet renderer
pub struct ReceivingSheetRenderer {
    settings: Settings,
}

impl ReceivingSheetRenderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn render(&self, rooms: &[Room], cost_set: &CostSet) -> Result<Vec<u8>, RenderError> {
        let plan = plan_receiving_sheet(rooms, cost_set, &self.settings);
        let (width, height) = self.settings.landscape();
        log::info!(
            "Rendering receiving sheet for {} rooms on {} pages",
            rooms.len(),
            plan.len()
        );

        let pages = plan
            .iter()
            .map(|page| {
                let mut layer = LayerBuilder::new(height);
                layer.set_fill_color(black());
                for placement in &page.placements {
                    layer.use_text(
                        placement.item.text(),
                        self.settings.body_font_size,
                        placement.x,
                        placement.y,
                        BuiltinFont::Helvetica,
                        Align::Left,
                    );
                }
                PdfPage::new(Mm(width), Mm(height), layer.into_ops())
            })
            .collect();

        Ok(save_document("Receiving Sheet", pages))
    }
}
