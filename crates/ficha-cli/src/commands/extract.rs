use ficha_core::batch::{extract_batch, BatchMode, BatchReport, DocumentFailure};
use ficha_core::config::{load_config, ExportConfig, HeaderStyle};
use ficha_core::error::FichaError;
use ficha_core::extraction::pdftotext::PdftotextExtractor;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::output;

pub struct ExtractArgs {
    pub input_files: Vec<PathBuf>,
    pub output_format: String,
    pub output_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub header: Option<String>,
    pub include_source: bool,
    pub sequential: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), FichaError> {
    let config = resolve_config(&args)?;

    if !PdftotextExtractor::is_available() {
        return Err(FichaError::PdftotextNotFound);
    }
    let extractor = PdftotextExtractor::new();

    let mode = if args.sequential {
        BatchMode::Sequential
    } else {
        BatchMode::Parallel
    };
    let report = extract_batch(&args.input_files, &extractor, mode);

    match &args.output_file {
        Some(path) => {
            write_to_file(&report, &config, path)?;
            eprintln!(
                "Exported {} record(s) to {}",
                report.summary().succeeded,
                path.display()
            );
        }
        None => match args.output_format.as_str() {
            "json" => println!("{}", output::json::format_report(&report)?),
            "csv" => {
                output::csv::write_records(std::io::stdout().lock(), report.records(), &config)?
            }
            _ => println!("{}", output::table::format_report(&report, &config)),
        },
    }

    print_summary(&report);

    if report.summary().succeeded == 0 {
        return Err(FichaError::Extraction("no document could be processed".into()));
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &ExtractArgs) -> Result<ExportConfig, FichaError> {
    let mut config = match &args.config_file {
        Some(path) => load_config(path)?,
        None => ExportConfig::default(),
    };

    if let Some(style) = &args.header {
        config.header = HeaderStyle::from_str_loose(style).ok_or_else(|| {
            FichaError::ConfigInvalid(format!(
                "unknown header style '{style}' (expected letters or names)"
            ))
        })?;
    }
    if args.include_source {
        config.include_source = true;
    }
    log::debug!("export config: {config:?}");
    Ok(config)
}

/// JSON when the file ends in .json, CSV otherwise.
fn write_to_file(
    report: &BatchReport,
    config: &ExportConfig,
    path: &Path,
) -> Result<(), FichaError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        std::fs::write(path, output::json::format_report(report)?)?;
    } else {
        let writer = BufWriter::new(File::create(path)?);
        output::csv::write_records(writer, report.records(), config)?;
    }
    Ok(())
}

fn print_summary(report: &BatchReport) {
    let summary = report.summary();
    eprintln!(
        "{} of {} document(s) processed, {} failed",
        summary.succeeded, summary.total, summary.failed
    );
    for failure in report.failures() {
        eprintln!("{}", failure_line(failure));
    }
}

fn failure_line(failure: &DocumentFailure) -> String {
    let kind = if failure.unreadable {
        "unreadable"
    } else {
        "not processed"
    };
    format!("  {} ({kind}): {}", failure.source.display(), failure.reason)
}
