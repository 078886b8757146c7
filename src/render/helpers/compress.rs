//! Stream compression for finished documents
//!
//! printpdf writes its content streams uncompressed; lopdf re-reads the
//! bytes, deflates every stream and saves them again.

use printpdf::{PdfDocument, PdfPage, PdfSaveOptions};
use std::io::Cursor;

use crate::error::RenderError;

pub fn compress_pdf(uncompressed: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut doc = lopdf::Document::load_mem(uncompressed).map_err(|e| {
        RenderError::PdfGeneration(format!("Failed to parse PDF for compression: {}", e))
    })?;

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| RenderError::PdfGeneration(format!("Failed to save compressed PDF: {}", e)))?;

    Ok(output.into_inner())
}

/// Assemble pages into a document and return its compressed bytes.
///
/// Compression is best effort: if lopdf cannot handle the output the
/// uncompressed bytes are returned instead.
pub fn save_document(title: &str, pages: Vec<PdfPage>) -> Vec<u8> {
    let page_count = pages.len();
    let mut doc = PdfDocument::new(title);
    doc.with_pages(pages);

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        log::debug!("printpdf: {:?}", warning);
    }

    match compress_pdf(&bytes) {
        Ok(compressed) => {
            log::debug!(
                "{}: {} pages, {} bytes ({} uncompressed)",
                title,
                page_count,
                compressed.len(),
                bytes.len()
            );
            compressed
        }
        Err(e) => {
            log::warn!("{}; writing uncompressed output", e);
            bytes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::Mm;

    #[test]
    fn test_save_document_produces_pdf() {
        let page = PdfPage::new(Mm(210.0), Mm(297.0), Vec::new());
        let bytes = save_document("Blank", vec![page]);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_compress_rejects_garbage() {
        assert!(compress_pdf(b"not a pdf").is_err());
    }
}
