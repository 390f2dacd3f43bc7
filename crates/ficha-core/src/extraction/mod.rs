pub mod pdftotext;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::FichaError;

/// A table recovered from a page: ordered rows of ordered cells.
///
/// Cells the backend could not fill are stored as empty strings, so every
/// consumer can treat a missing cell and a blank cell the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        TableGrid { rows }
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    /// Plain text of the page. Empty when the page yielded no text.
    pub text: String,
    pub tables: Vec<TableGrid>,
}

/// Everything the field logic needs from one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    pub fn new(pages: Vec<PageContent>) -> Self {
        ExtractedDocument { pages }
    }

    /// Page texts joined with a newline; unreadable pages contribute "".
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All tables in scan order: page order, then table order within a page.
    pub fn tables(&self) -> impl Iterator<Item = &TableGrid> {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }
}

/// Trait for PDF text/table extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract page content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FichaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
