use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::TableGrid;

/// Marker written in a weekday column that has attendance evidence.
pub const ATTENDANCE_MARK: &str = "X";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Two-letter code used in the form's day header.
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "LU",
            Weekday::Tuesday => "MA",
            Weekday::Wednesday => "MI",
            Weekday::Thursday => "JU",
            Weekday::Friday => "VI",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "DO",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weekday::Monday => write!(f, "Lunes"),
            Weekday::Tuesday => write!(f, "Martes"),
            Weekday::Wednesday => write!(f, "Miércoles"),
            Weekday::Thursday => write!(f, "Jueves"),
            Weekday::Friday => write!(f, "Viernes"),
            Weekday::Saturday => write!(f, "Sábado"),
            Weekday::Sunday => write!(f, "Domingo"),
        }
    }
}

/// Which weekdays have attendance evidence in a document.
///
/// Flags only ever go from unset to set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFlags {
    days: [bool; 7],
}

impl AttendanceFlags {
    pub fn mark(&mut self, day: Weekday) {
        self.days[day.index()] = true;
    }

    pub fn is_marked(&self, day: Weekday) -> bool {
        self.days[day.index()]
    }

    /// Column value for a day: `"X"` when marked, `""` otherwise.
    pub fn cell(&self, day: Weekday) -> &'static str {
        if self.is_marked(day) {
            ATTENDANCE_MARK
        } else {
            ""
        }
    }

    pub fn marked_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|d| self.is_marked(*d))
    }

    /// Union of two flag sets.
    pub fn merge(&mut self, other: &AttendanceFlags) {
        for day in other.marked_days() {
            self.mark(day);
        }
    }
}

/// Column index of every day code in a header row, or None unless all
/// seven codes are present.
fn day_columns<S: AsRef<str>>(header: &[S]) -> Option<[usize; 7]> {
    let header: Vec<String> = header
        .iter()
        .map(|c| c.as_ref().trim().to_uppercase())
        .collect();
    let mut columns = [0usize; 7];
    for day in Weekday::ALL {
        columns[day.index()] = header.iter().position(|c| c == day.code())?;
    }
    Some(columns)
}

/// True for a row carrying all seven day codes.
pub fn is_day_header<S: AsRef<str>>(cells: &[S]) -> bool {
    day_columns(cells).is_some()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Attendance evidence from a single table.
///
/// The first row must be a day header carrying all seven codes; any other
/// table contributes nothing.
pub fn table_attendance(table: &TableGrid) -> AttendanceFlags {
    let mut flags = AttendanceFlags::default();
    let Some(columns) = table.rows.first().and_then(|h| day_columns(h.as_slice())) else {
        return flags;
    };

    for row in &table.rows[1..] {
        for day in Weekday::ALL {
            let cell = row
                .get(columns[day.index()])
                .map(|c| c.trim())
                .unwrap_or_default();
            if is_digits(cell) {
                flags.mark(day);
            }
        }
    }

    flags
}

/// Attendance flags for a document: the union over all of its tables.
pub fn build_attendance<'a, I>(tables: I) -> AttendanceFlags
where
    I: IntoIterator<Item = &'a TableGrid>,
{
    let mut flags = AttendanceFlags::default();
    for table in tables {
        flags.merge(&table_attendance(table));
    }
    flags
}
