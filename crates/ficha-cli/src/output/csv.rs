use ficha_core::batch::SourcedRecord;
use ficha_core::config::ExportConfig;
use ficha_core::error::FichaError;
use std::io::Write;

/// File name shown in the source column.
pub fn source_label(record: &SourcedRecord) -> String {
    record
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| record.source.display().to_string())
}

/// Write one header row and one row per record.
pub fn write_records<'a, W, I>(
    writer: W,
    records: I,
    config: &ExportConfig,
) -> Result<(), FichaError>
where
    W: Write,
    I: IntoIterator<Item = &'a SourcedRecord>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte())
        .from_writer(writer);

    csv_writer
        .write_record(config.header_labels())
        .map_err(std::io::Error::from)?;

    for sourced in records {
        let mut row = Vec::new();
        if config.include_source {
            row.push(source_label(sourced));
        }
        row.extend(sourced.record.values().iter().map(|v| v.to_string()));
        csv_writer.write_record(&row).map_err(std::io::Error::from)?;
    }

    csv_writer.flush()?;
    Ok(())
}
