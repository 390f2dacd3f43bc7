use ficha_core::batch::BatchReport;
use ficha_core::error::FichaError;
use ficha_core::extraction::ExtractedDocument;

pub fn format_report(report: &BatchReport) -> Result<String, FichaError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn print_document(document: &ExtractedDocument) -> Result<(), FichaError> {
    let json = serde_json::to_string_pretty(document)?;
    println!("{json}");
    Ok(())
}
