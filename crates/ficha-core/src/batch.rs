use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::extract_file;
use crate::extraction::PdfExtractor;
use crate::model::ExtractedRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    Sequential,
    #[default]
    Parallel,
}

/// A record together with the document it came from.
#[derive(Debug, Clone, Serialize)]
pub struct SourcedRecord {
    pub source: PathBuf,
    pub record: ExtractedRecord,
}

/// A document that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub reason: String,
    /// The document could not be opened or decoded, as opposed to a setup
    /// problem such as a missing pdftotext binary.
    pub unreadable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Extracted(SourcedRecord),
    Failed(DocumentFailure),
}

impl DocumentOutcome {
    pub fn source(&self) -> &Path {
        match self {
            DocumentOutcome::Extracted(r) => &r.source,
            DocumentOutcome::Failed(f) => &f.source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn records(&self) -> impl Iterator<Item = &SourcedRecord> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Extracted(r) => Some(r),
            DocumentOutcome::Failed(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Failed(f) => Some(f),
            DocumentOutcome::Extracted(_) => None,
        })
    }

    pub fn summary(&self) -> BatchSummary {
        let succeeded = self.records().count();
        BatchSummary {
            total: self.outcomes.len(),
            succeeded,
            failed: self.outcomes.len() - succeeded,
        }
    }
}

/// Extract one record per input file.
///
/// A document that fails is reported in the batch and never stops the rest.
pub fn extract_batch(
    paths: &[PathBuf],
    extractor: &dyn PdfExtractor,
    mode: BatchMode,
) -> BatchReport {
    let outcomes = match mode {
        BatchMode::Sequential => paths.iter().map(|p| process_one(p, extractor)).collect(),
        BatchMode::Parallel => paths.par_iter().map(|p| process_one(p, extractor)).collect(),
    };

    let report = BatchReport { outcomes };
    let summary = report.summary();
    log::info!(
        "batch finished: {} succeeded, {} failed ({} total)",
        summary.succeeded,
        summary.failed,
        summary.total
    );
    report
}

fn process_one(path: &Path, extractor: &dyn PdfExtractor) -> DocumentOutcome {
    log::debug!("processing {}", path.display());
    match extract_file(path, extractor) {
        Ok(record) => DocumentOutcome::Extracted(SourcedRecord {
            source: path.to_path_buf(),
            record,
        }),
        Err(e) => {
            log::warn!("failed to process {}: {}", path.display(), e);
            DocumentOutcome::Failed(DocumentFailure {
                source: path.to_path_buf(),
                reason: e.to_string(),
                unreadable: e.is_document_unreadable(),
            })
        }
    }
}
