use regex::Regex;
use std::sync::LazyLock;

use super::values::{format_date, format_identity};

/// Label used when neither a special program nor an agreement applies.
pub const NO_SPECIAL_PROGRAM: &str = "NINGUNA";

const NOT_APPLICABLE: &str = "no aplica";

static PROGRAM_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)c[oó]digo(?:\s+del)?(?:\s+programa)?(?:\s+o\s+edt)?[\s:]*([0-9]{4,})")
        .unwrap()
});

static SPECIAL_PROGRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)programas[ \t]+especiales\s*[:\-]?\s*([^\n\r]*)").unwrap()
});

static AGREEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)convenio\s*[:\-]?\s*([^\n\r]*)").unwrap());

static IDENTITY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)c[eé]dul[ao]\s*[:\-]?\s*([0-9.,]+)").unwrap());

static IDENTITY_NEAR_INSTRUCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)instructor[\s\S]{0,80}?([0-9]{6,12})").unwrap());

static START_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)de\s+inicio\s+([0-9]{1,2})\s+([0-9]{1,2})\s+([0-9]{2})").unwrap()
});

static END_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)de\s+finalizaci[oó]n\s+([0-9]{1,2})\s+([0-9]{1,2})\s+([0-9]{2})").unwrap()
});

static MUNICIPALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)municipio\s*[:\-]?\s*(.*)").unwrap());

static PLACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)lugar\s+donde\s+se\s+dicta\s*[:\-]?\s*(.*)").unwrap());

static VILLAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vereda\s*[:\-]?\s*(.*)").unwrap());

static CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cupo\s*[:\-]?\s*([0-9]+)").unwrap());

/// First capture group of the first match, trimmed.
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Like `capture`, but an empty capture counts as absent.
fn capture_non_empty<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    capture(re, text).filter(|v| !v.is_empty())
}

/// Program code ("Código del Programa o EDT: 228118"). Empty when absent.
pub fn parse_program_code(text: &str) -> String {
    capture(&PROGRAM_CODE, text).unwrap_or_default().to_string()
}

/// Special program / agreement label, resolved to a single value.
pub fn parse_special_program(text: &str) -> String {
    let special = labeled_value(&SPECIAL_PROGRAMS, text, "programas especiales");
    let agreement = labeled_value(&AGREEMENT, text, "convenio");
    resolve_special_program(special, agreement)
}

/// A labeled value, ignoring captures that just repeat the label itself.
fn labeled_value<'t>(re: &Regex, text: &'t str, label: &str) -> Option<&'t str> {
    capture_non_empty(re, text).filter(|v| {
        let lower = v.to_lowercase();
        lower != label && lower.trim_end_matches(':') != label
    })
}

/// Pick between a special-program value and an agreement value.
///
/// The special program wins when it applies; otherwise the agreement; and
/// when nothing applies the result is `NINGUNA`.
pub fn resolve_special_program(special: Option<&str>, agreement: Option<&str>) -> String {
    let applies = |v: Option<&str>| -> Option<String> {
        v.map(str::trim)
            .filter(|s| !s.is_empty() && s.to_lowercase() != NOT_APPLICABLE)
            .map(str::to_string)
    };

    applies(special)
        .or_else(|| applies(agreement))
        .unwrap_or_else(|| NO_SPECIAL_PROGRAM.to_string())
}

/// Instructor identity number, formatted with thousands separators.
///
/// Looks for a "cédula" label first; only when that label is missing does
/// it fall back to a 6-12 digit run shortly after "Instructor".
pub fn parse_identity_number(text: &str) -> String {
    if let Some(raw) = capture(&IDENTITY_LABEL, text) {
        return format_identity(raw);
    }
    capture(&IDENTITY_NEAR_INSTRUCTOR, text)
        .map(format_identity)
        .unwrap_or_default()
}

pub fn parse_start_date(text: &str) -> String {
    parse_date(&START_DATE, text)
}

pub fn parse_end_date(text: &str) -> String {
    parse_date(&END_DATE, text)
}

fn parse_date(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| format_date(&c[1], &c[2], &c[3]))
        .unwrap_or_default()
}

/// Rest of the line after "MUNICIPIO".
pub fn parse_municipality(text: &str) -> String {
    capture(&MUNICIPALITY, text).unwrap_or_default().to_string()
}

/// Place of instruction, combined with the village when they differ.
pub fn parse_venue(text: &str) -> String {
    let place = capture_non_empty(&PLACE, text);
    let village = capture_non_empty(&VILLAGE, text);

    match (place, village) {
        (Some(p), Some(v)) if p.to_lowercase() == v.to_lowercase() => p.to_string(),
        (Some(p), Some(v)) => format!("{p} - {v}"),
        (Some(p), None) => p.to_string(),
        (None, Some(v)) => v.to_string(),
        (None, None) => String::new(),
    }
}

/// Enrollment capacity. None when absent or out of range.
pub fn parse_capacity(text: &str) -> Option<u32> {
    let raw = capture(&CAPACITY, text)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(e) => {
            log::debug!("ignoring capacity '{}': {}", raw, e);
            None
        }
    }
}
