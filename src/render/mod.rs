//! PDF rendering modules

pub mod helpers;
pub mod layouts;

// Re-export commonly used items for convenience
pub use helpers::{LayerBuilder, PagePlan, Placement};
pub use layouts::{
    plan_invoices, plan_receiving_sheet, plan_total_sheets, InvoiceRenderer,
    ReceivingSheetRenderer, TotalSheetRenderer,
};
