use ficha_core::batch::BatchReport;
use ficha_core::config::ExportConfig;
use ficha_core::extraction::ExtractedDocument;

use super::csv::source_label;

/// Render the successful records as an aligned text table.
pub fn format_report(report: &BatchReport, config: &ExportConfig) -> String {
    let header = config.header_labels();
    let rows: Vec<Vec<String>> = report
        .records()
        .map(|sourced| {
            let mut row = Vec::with_capacity(header.len());
            if config.include_source {
                row.push(source_label(sourced));
            }
            row.extend(sourced.record.values().iter().map(|v| v.to_string()));
            row
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(&header, &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format_row(&rule, &widths));
    for row in &rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Page-by-page dump of the text and tables of one document.
pub fn format_document(document: &ExtractedDocument) -> String {
    let mut out = String::new();
    for page in &document.pages {
        if page.page_number > 1 {
            out.push('\n');
        }
        out.push_str(&format!("=== Page {} ===\n\n", page.page_number));
        if page.text.is_empty() {
            out.push_str("  (no text)\n");
        } else {
            for line in page.text.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }

        for (i, table) in page.tables.iter().enumerate() {
            out.push_str(&format!("\n  --- Table {} ({} rows) ---\n", i + 1, table.rows.len()));
            for row in &table.rows {
                let cells: Vec<String> = row.iter().map(|c| format!("[{c}]")).collect();
                out.push_str(&format!("  {}\n", cells.join(" ")));
            }
        }
    }
    out
}
