use crate::error::FichaError;
use crate::model::Column;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header of the optional source-file column.
pub const SOURCE_HEADER: &str = "Archivo";

/// How the export header row labels columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Spreadsheet letters: D, H, I, ...
    #[default]
    Letters,
    /// Descriptive names: "Código programa", "Municipio", ...
    Names,
}

impl HeaderStyle {
    pub fn from_str_loose(s: &str) -> Option<HeaderStyle> {
        match s.trim().to_lowercase().as_str() {
            "letters" | "letras" => Some(HeaderStyle::Letters),
            "names" | "nombres" => Some(HeaderStyle::Names),
            _ => None,
        }
    }

    pub fn label(self, column: Column) -> String {
        match self {
            HeaderStyle::Letters => column.letter().to_string(),
            HeaderStyle::Names => column.name(),
        }
    }
}

/// Export settings, loaded from a JSON file.
///
/// ```json
/// { "header": "names", "include_source": true, "delimiter": ";" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default)]
    pub header: HeaderStyle,
    /// Prepend a column with the source file name.
    #[serde(default)]
    pub include_source: bool,
    /// CSV field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            header: HeaderStyle::default(),
            include_source: false,
            delimiter: default_delimiter(),
        }
    }
}

impl ExportConfig {
    /// Header row labels, including the source column when enabled.
    pub fn header_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(Column::ALL.len() + 1);
        if self.include_source {
            labels.push(SOURCE_HEADER.to_string());
        }
        labels.extend(Column::ALL.iter().map(|c| self.header.label(*c)));
        labels
    }

    /// The delimiter as a single byte, as CSV writers expect.
    pub fn delimiter_byte(&self) -> u8 {
        // Validated to be ASCII.
        self.delimiter as u8
    }
}

/// Load an export config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExportConfig, FichaError> {
    let content = std::fs::read_to_string(path).map_err(|e| FichaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse an export config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ExportConfig, FichaError> {
    let config: ExportConfig = serde_json::from_str(json).map_err(|e| FichaError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse an export config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExportConfig, FichaError> {
    let config: ExportConfig = serde_json::from_str(json).map_err(FichaError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ExportConfig) -> Result<(), FichaError> {
    let d = config.delimiter;
    if !d.is_ascii() || d.is_ascii_alphanumeric() || d == '"' || d == '\n' || d == '\r' {
        return Err(FichaError::ConfigInvalid(format!(
            "invalid delimiter {:?} (expected a single ASCII punctuation or whitespace character)",
            d
        )));
    }
    Ok(())
}
