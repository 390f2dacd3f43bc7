use ficha_core::error::FichaError;
use ficha_core::extraction::pdftotext::PdftotextExtractor;
use ficha_core::read_document;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), FichaError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let document = read_document(&pdf_bytes, &extractor)?;

    match output_format {
        "json" => output::json::print_document(&document)?,
        _ => print!("{}", output::table::format_document(&document)),
    }

    let table_count = document.tables().count();
    eprintln!(
        "{}: {} page(s), {} table(s)",
        input_file.display(),
        document.pages.len(),
        table_count
    );
    Ok(())
}
