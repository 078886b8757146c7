pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use cli::DocumentKind;
pub use config::Settings;
pub use error::{ConfigError, LedgerError, ReadingError, RenderError};
pub use model::{compute_charges, ChargeBreakdown, CostSet, Ledger, Room};
pub use parser::{export_ledger, parse_ledger};

use render::{InvoiceRenderer, ReceivingSheetRenderer, TotalSheetRenderer};

/// A rendered PDF and the file name it should be saved under
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render one document kind to PDF bytes.
///
/// Rooms may be given in any order; every layout sorts them by block and
/// room number. An empty room list yields a document with a single blank page.
///
/// # Example
///
/// ```no_run
/// use unit_ledger::{parse_ledger, render_document, DocumentKind, Settings};
///
/// let json = std::fs::read_to_string("ledger.json").unwrap();
/// let ledger = parse_ledger(&json).unwrap();
/// let settings = Settings::default().with_invoice_settings(&ledger.invoice_settings);
///
/// let pdf_bytes = render_document(
///     DocumentKind::Invoice,
///     &ledger.rooms,
///     &ledger.cost_sets[0],
///     &settings,
/// )
/// .unwrap();
///
/// std::fs::write("invoices.pdf", pdf_bytes).unwrap();
/// ```
pub fn render_document(
    kind: DocumentKind,
    rooms: &[Room],
    cost_set: &CostSet,
    settings: &Settings,
) -> Result<Vec<u8>, RenderError> {
    let settings = settings.clone();
    match kind {
        DocumentKind::Invoice => InvoiceRenderer::new(settings).render(rooms, cost_set),
        DocumentKind::TotalSheet => TotalSheetRenderer::new(settings).render(rooms, cost_set),
        DocumentKind::ReceivingSheet => {
            ReceivingSheetRenderer::new(settings).render(rooms, cost_set)
        }
    }
}

/// Render several document kinds in one run.
///
/// Kinds are deduplicated and produced in a fixed order (invoices, total
/// sheet, receiving sheet). Each document is named `<kind>-<print date>.pdf`.
pub fn render_documents(
    kinds: &[DocumentKind],
    rooms: &[Room],
    cost_set: &CostSet,
    settings: &Settings,
) -> Result<Vec<RenderedDocument>, RenderError> {
    let mut kinds = kinds.to_vec();
    kinds.sort();
    kinds.dedup();

    kinds
        .into_iter()
        .map(|kind| {
            let bytes = render_document(kind, rooms, cost_set, settings)?;
            Ok(RenderedDocument {
                kind,
                file_name: kind.file_name(settings.print_date),
                bytes,
            })
        })
        .collect()
}
