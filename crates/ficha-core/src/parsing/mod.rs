pub mod fields;
pub mod values;

use serde::{Deserialize, Serialize};

use fields::{
    parse_capacity, parse_end_date, parse_identity_number, parse_municipality, parse_program_code,
    parse_special_program, parse_start_date, parse_venue,
};

/// Every text-derived field of a characterization form.
///
/// Fields that were not found hold an empty string (or None for capacity);
/// a missing label is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFields {
    pub program_code: String,
    pub special_program: String,
    pub identity_number: String,
    pub start_date: String,
    pub end_date: String,
    pub municipality: String,
    pub venue: String,
    pub capacity: Option<u32>,
}

/// Run every field parser over the document text.
pub fn parse_fields(text: &str) -> ParsedFields {
    ParsedFields {
        program_code: parse_program_code(text),
        special_program: parse_special_program(text),
        identity_number: parse_identity_number(text),
        start_date: parse_start_date(text),
        end_date: parse_end_date(text),
        municipality: parse_municipality(text),
        venue: parse_venue(text),
        capacity: parse_capacity(text),
    }
}
