use crate::error::FichaError;
use crate::extraction::table::detect_tables;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that form tables keep their column alignment;
/// tables are then rebuilt from the aligned lines.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FichaError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| FichaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| FichaError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FichaError::PdftotextNotFound
                } else {
                    FichaError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(FichaError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_layout_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext -layout output into pages (form feed separated).
///
/// pdftotext terminates the last page with a form feed as well, which leaves
/// an empty trailing chunk that is not a page.
pub fn split_layout_pages(layout: &str) -> Vec<PageContent> {
    let mut chunks: Vec<&str> = layout.split('\x0c').collect();
    if chunks.len() > 1 && chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| layout_page(i + 1, page_text))
        .collect()
}

fn layout_page(page_number: usize, page_text: &str) -> PageContent {
    let lines: Vec<&str> = page_text.lines().collect();
    let tables = detect_tables(&lines);

    // Plain text keeps one line per layout line, with alignment padding collapsed.
    let text = lines
        .iter()
        .map(|l| normalize_ws(l))
        .collect::<Vec<_>>()
        .join("\n");

    log::debug!(
        "page {}: {} line(s), {} table(s)",
        page_number,
        lines.len(),
        tables.len()
    );

    PageContent {
        page_number,
        text: text.trim_matches('\n').to_string(),
        tables,
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
