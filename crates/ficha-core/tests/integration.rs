//! Integration tests for the extract_pdf() pipeline and the batch driver.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use std::path::PathBuf;

use ficha_core::attendance::Weekday;
use ficha_core::batch::{extract_batch, BatchMode, DocumentOutcome};
use ficha_core::error::FichaError;
use ficha_core::extraction::pdftotext::split_layout_pages;
use ficha_core::extraction::{PageContent, PdfExtractor, TableGrid};
use ficha_core::extract_pdf;
use ficha_core::model::{Column, FieldValue};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FichaError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Treats the file bytes as pdftotext -layout output; "%BROKEN" fails.
struct LayoutTextExtractor;

impl PdfExtractor for LayoutTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FichaError> {
        let text = String::from_utf8_lossy(pdf_bytes);
        if text.starts_with("%BROKEN") {
            return Err(FichaError::PdftotextFailed {
                code: 1,
                stderr: "Syntax Error: Couldn't find trailer dictionary".into(),
            });
        }
        Ok(split_layout_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "layout-text"
    }
}

fn grid(rows: &[&[&str]]) -> TableGrid {
    TableGrid::new(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

fn page(number: usize, text: &str, tables: Vec<TableGrid>) -> PageContent {
    PageContent {
        page_number: number,
        text: text.to_string(),
        tables,
    }
}

fn text_of(value: FieldValue) -> String {
    value.to_string()
}

// ---------------------------------------------------------------------------
// Test 1: Complete two-page form
// ---------------------------------------------------------------------------
#[test]
fn complete_form_populates_every_column() {
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                "FICHA DE CARACTERIZACIÓN\n\
                 Código del Programa o EDT: 228118\n\
                 Programas especiales: No aplica\n\
                 Convenio: Convenio XYZ\n\
                 Nombre del Instructor: Luz Marina Gómez cedula: 40.123.456\n\
                 Fechas De inicio 05 08 23 De finalización 20 12 23",
                vec![grid(&[&["DESDE", "HASTA"], &["6 am", "2 pm"]])],
            ),
            page(
                2,
                "MUNICIPIO: Sogamoso\n\
                 LUGAR DONDE SE DICTA: Institución Educativa\n\
                 VEREDA: Morcá\n\
                 Cupo: 25",
                vec![
                    grid(&[&["HORARIO 7 13"]]),
                    grid(&[
                        &["LU", "MA", "MI", "JU", "VI", "SA", "DO"],
                        &["8", "", "8", "", "", "4", ""],
                    ]),
                ],
            ),
        ],
    };

    let record = extract_pdf(&[], &extractor).unwrap();

    assert_eq!(text_of(record.get(Column::ProgramCode)), "228118");
    assert_eq!(text_of(record.get(Column::SpecialProgram)), "Convenio XYZ");
    assert_eq!(text_of(record.get(Column::IdentityNumber)), "40.123.456");
    assert_eq!(text_of(record.get(Column::StartDate)), "5/8/2023");
    assert_eq!(text_of(record.get(Column::EndDate)), "20/12/2023");
    assert_eq!(text_of(record.get(Column::Municipality)), "Sogamoso");
    assert_eq!(
        text_of(record.get(Column::Venue)),
        "Institución Educativa - Morcá"
    );
    assert_eq!(text_of(record.get(Column::Schedule)), "6 A 14");
    assert_eq!(record.get(Column::Day(Weekday::Monday)), FieldValue::Text("X".into()));
    assert_eq!(record.get(Column::Day(Weekday::Tuesday)), FieldValue::Empty);
    assert_eq!(record.get(Column::Day(Weekday::Saturday)), FieldValue::Text("X".into()));
    assert_eq!(record.get(Column::Capacity), FieldValue::Integer(25));
}

// ---------------------------------------------------------------------------
// Test 2: Blank document still yields a full record of defaults
// ---------------------------------------------------------------------------
#[test]
fn blank_document_yields_defaults() {
    let extractor = MockExtractor {
        pages: vec![page(1, "", vec![]), page(2, "", vec![])],
    };

    let record = extract_pdf(&[], &extractor).unwrap();
    let values = record.values();

    assert_eq!(values.len(), Column::ALL.len());
    assert_eq!(record.get(Column::SpecialProgram), FieldValue::Text("NINGUNA".into()));
    assert_eq!(record.get(Column::Schedule), FieldValue::Empty);
    assert_eq!(record.get(Column::Capacity), FieldValue::Empty);
    assert!(Weekday::ALL
        .iter()
        .all(|d| record.get(Column::Day(*d)) == FieldValue::Empty));
}

// ---------------------------------------------------------------------------
// Test 3: Labels split across pages still join through the text blob
// ---------------------------------------------------------------------------
#[test]
fn instructor_fallback_across_page_boundary() {
    let extractor = MockExtractor {
        pages: vec![
            page(1, "Datos del Instructor", vec![]),
            page(2, "Documento 1053789456", vec![]),
        ],
    };

    let record = extract_pdf(&[], &extractor).unwrap();
    assert_eq!(text_of(record.get(Column::IdentityNumber)), "1.053.789.456");
}

// ---------------------------------------------------------------------------
// Test 4: Layout text end to end (pdftotext -layout shaped input)
// ---------------------------------------------------------------------------
#[test]
fn layout_text_end_to_end() {
    let layout = "\
   FICHA DE CARACTERIZACIÓN
   Código del Programa o EDT:   52450
   MUNICIPIO: Paipa

   DESDE          HASTA
   7:00 am        12:00 m

   LU    MA    MI    JU    VI    SA    DO
   5     5           5
\x0c";
    let record = extract_pdf(layout.as_bytes(), &LayoutTextExtractor).unwrap();

    assert_eq!(text_of(record.get(Column::ProgramCode)), "52450");
    assert_eq!(text_of(record.get(Column::Municipality)), "Paipa");
    assert_eq!(text_of(record.get(Column::Schedule)), "7 A 12");
    let marked: Vec<_> = record.attendance.marked_days().collect();
    assert_eq!(
        marked,
        vec![Weekday::Monday, Weekday::Tuesday, Weekday::Thursday]
    );
}

// ---------------------------------------------------------------------------
// Test 4b: Values printed slightly left of their header keep their column
// ---------------------------------------------------------------------------
#[test]
fn layout_value_left_of_header_keeps_schedule() {
    let layout = "  DESDE      HASTA\n  07:00     12:00\n\x0c";
    let record = extract_pdf(layout.as_bytes(), &LayoutTextExtractor).unwrap();
    assert_eq!(text_of(record.get(Column::Schedule)), "7 A 12");
}

// ---------------------------------------------------------------------------
// Test 4c: A caption line right above the day header does not hide it
// ---------------------------------------------------------------------------
#[test]
fn layout_caption_above_day_header_keeps_attendance() {
    let layout = "  Horas por dia     Semana 1\n  LU   MA   MI   JU   VI   SA   DO\n  4    4\n\x0c";
    let record = extract_pdf(layout.as_bytes(), &LayoutTextExtractor).unwrap();
    let marked: Vec<_> = record.attendance.marked_days().collect();
    assert_eq!(marked, vec![Weekday::Monday, Weekday::Tuesday]);
}

// ---------------------------------------------------------------------------
// Test 5: Unreadable document is a per-document error
// ---------------------------------------------------------------------------
#[test]
fn unreadable_document_is_an_error() {
    let err = extract_pdf(b"%BROKEN", &LayoutTextExtractor).unwrap_err();
    assert!(err.is_document_unreadable());
}

// ---------------------------------------------------------------------------
// Test 6: Batch isolates failures and keeps input order
// ---------------------------------------------------------------------------
#[test]
fn batch_isolates_failures_in_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("a.pdf");
    let bad = dir.path().join("b.pdf");
    let good_c = dir.path().join("c.pdf");
    let missing = dir.path().join("missing.pdf");
    std::fs::write(&good_a, "Cupo: 20\x0c").unwrap();
    std::fs::write(&bad, "%BROKEN").unwrap();
    std::fs::write(&good_c, "Cupo: 35\x0c").unwrap();

    let paths: Vec<PathBuf> = vec![good_a.clone(), bad.clone(), good_c.clone(), missing.clone()];

    for mode in [BatchMode::Sequential, BatchMode::Parallel] {
        let report = extract_batch(&paths, &LayoutTextExtractor, mode);
        let summary = report.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);

        let sources: Vec<_> = report.outcomes.iter().map(|o| o.source().to_path_buf()).collect();
        assert_eq!(sources, paths);

        let capacities: Vec<_> = report
            .records()
            .map(|r| r.record.get(Column::Capacity))
            .collect();
        assert_eq!(
            capacities,
            vec![FieldValue::Integer(20), FieldValue::Integer(35)]
        );

        match &report.outcomes[1] {
            DocumentOutcome::Failed(f) => {
                assert!(f.reason.contains("pdftotext failed"));
                assert!(f.unreadable);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(report.failures().all(|f| f.unreadable));
    }
}
