//! Layout renderers - one per document kind

pub mod invoice;
pub mod receiving_sheet;
pub mod total_sheet;

pub use invoice::{plan_invoices, InvoiceCard, InvoiceRenderer};
pub use receiving_sheet::{plan_receiving_sheet, ReceivingLine, ReceivingSheetRenderer};
pub use total_sheet::{plan_total_sheets, SheetRow, SheetTotals, TotalSheet, TotalSheetRenderer};
