pub mod attendance;
pub mod batch;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod schedule;

use std::path::Path;

use attendance::build_attendance;
use error::FichaError;
use extraction::{ExtractedDocument, PdfExtractor};
use model::ExtractedRecord;
use parsing::parse_fields;
use schedule::resolve_schedule;

/// Main API entry point: extract the enrollment record of one PDF form.
///
/// Fails only when the document itself cannot be read; fields that are not
/// found come back empty in an otherwise complete record.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<ExtractedRecord, FichaError> {
    let document = read_document(pdf_bytes, extractor)?;
    Ok(assemble_record(&document))
}

/// Read a PDF from disk and extract its record.
pub fn extract_file(
    path: &Path,
    extractor: &dyn PdfExtractor,
) -> Result<ExtractedRecord, FichaError> {
    let pdf_bytes = std::fs::read(path)?;
    extract_pdf(&pdf_bytes, extractor)
}

/// Run the extraction backend and wrap its pages as a document.
pub fn read_document(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<ExtractedDocument, FichaError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    log::debug!(
        "{}: extracted {} page(s)",
        extractor.backend_name(),
        pages.len()
    );
    Ok(ExtractedDocument::new(pages))
}

/// Combine text fields, schedule and attendance into one record.
pub fn assemble_record(document: &ExtractedDocument) -> ExtractedRecord {
    let text = document.text();
    let fields = parse_fields(&text);
    let schedule = resolve_schedule(document.tables());
    let attendance = build_attendance(document.tables());
    ExtractedRecord::new(fields, schedule, attendance)
}
