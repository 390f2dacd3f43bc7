use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::attendance::{AttendanceFlags, Weekday};
use crate::parsing::ParsedFields;

/// Output columns of the enrollment export, in export order.
///
/// Each column keeps the spreadsheet letter it has always been written to,
/// so exports line up with existing consolidated workbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    ProgramCode,
    SpecialProgram,
    IdentityNumber,
    StartDate,
    EndDate,
    Municipality,
    Venue,
    Schedule,
    Day(Weekday),
    Capacity,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::ProgramCode,
        Column::SpecialProgram,
        Column::IdentityNumber,
        Column::StartDate,
        Column::EndDate,
        Column::Municipality,
        Column::Venue,
        Column::Schedule,
        Column::Day(Weekday::Monday),
        Column::Day(Weekday::Tuesday),
        Column::Day(Weekday::Wednesday),
        Column::Day(Weekday::Thursday),
        Column::Day(Weekday::Friday),
        Column::Day(Weekday::Saturday),
        Column::Day(Weekday::Sunday),
        Column::Capacity,
    ];

    /// Spreadsheet column letter.
    pub fn letter(self) -> &'static str {
        match self {
            Column::ProgramCode => "D",
            Column::SpecialProgram => "H",
            Column::IdentityNumber => "I",
            Column::StartDate => "N",
            Column::EndDate => "O",
            Column::Municipality => "P",
            Column::Venue => "Q",
            Column::Schedule => "R",
            Column::Day(Weekday::Monday) => "S",
            Column::Day(Weekday::Tuesday) => "T",
            Column::Day(Weekday::Wednesday) => "U",
            Column::Day(Weekday::Thursday) => "V",
            Column::Day(Weekday::Friday) => "W",
            Column::Day(Weekday::Saturday) => "X",
            Column::Day(Weekday::Sunday) => "Y",
            Column::Capacity => "Z",
        }
    }

    /// Descriptive header name.
    pub fn name(self) -> String {
        match self {
            Column::ProgramCode => "Código programa".into(),
            Column::SpecialProgram => "Programa especial".into(),
            Column::IdentityNumber => "Cédula instructor".into(),
            Column::StartDate => "Fecha inicio".into(),
            Column::EndDate => "Fecha fin".into(),
            Column::Municipality => "Municipio".into(),
            Column::Venue => "Lugar".into(),
            Column::Schedule => "Horario".into(),
            Column::Day(day) => day.to_string(),
            Column::Capacity => "Cupo".into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single cell value of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
    Empty,
}

impl FieldValue {
    fn text(s: &str) -> FieldValue {
        if s.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Text(s.to_string())
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_u32(*n),
            FieldValue::Empty => serializer.serialize_str(""),
        }
    }
}

/// The enrollment record extracted from one document.
///
/// Every column is always present; fields that were not found are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub fields: ParsedFields,
    pub schedule: String,
    pub attendance: AttendanceFlags,
}

impl ExtractedRecord {
    pub fn new(fields: ParsedFields, schedule: String, attendance: AttendanceFlags) -> Self {
        ExtractedRecord {
            fields,
            schedule,
            attendance,
        }
    }

    pub fn get(&self, column: Column) -> FieldValue {
        let f = &self.fields;
        match column {
            Column::ProgramCode => FieldValue::text(&f.program_code),
            Column::SpecialProgram => FieldValue::text(&f.special_program),
            Column::IdentityNumber => FieldValue::text(&f.identity_number),
            Column::StartDate => FieldValue::text(&f.start_date),
            Column::EndDate => FieldValue::text(&f.end_date),
            Column::Municipality => FieldValue::text(&f.municipality),
            Column::Venue => FieldValue::text(&f.venue),
            Column::Schedule => FieldValue::text(&self.schedule),
            Column::Day(day) => FieldValue::text(self.attendance.cell(day)),
            Column::Capacity => f.capacity.map_or(FieldValue::Empty, FieldValue::Integer),
        }
    }

    /// Values in export column order.
    pub fn values(&self) -> Vec<FieldValue> {
        Column::ALL.iter().map(|c| self.get(*c)).collect()
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::ALL.len()))?;
        for column in Column::ALL {
            map.serialize_entry(column.letter(), &self.get(column))?;
        }
        map.end()
    }
}
