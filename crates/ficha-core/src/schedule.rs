use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::extraction::TableGrid;

/// An hour reading inside a cell: "7", "07:00", "2 pm", "1:30 p. m.".
static HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2})[0-9]*(?::[0-9]{2})?\s*(?:([ap])\.?\s?m\b\.?)?").unwrap()
});

/// A tentative class schedule found in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub start_hour: i32,
    pub end_hour: i32,
}

impl ScheduleCandidate {
    pub fn new(start_hour: i32, end_hour: i32) -> Self {
        ScheduleCandidate {
            start_hour,
            end_hour,
        }
    }

    /// End minus start. Negative when the range runs backwards; such ranges
    /// are kept and compete like any other.
    pub fn span(&self) -> i32 {
        self.end_hour - self.start_hour
    }
}

impl fmt::Display for ScheduleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} A {}", self.start_hour, self.end_hour)
    }
}

/// All hour readings in a cell, left to right, on a 24-hour clock.
pub fn hours_in_cell(cell: &str) -> Vec<i32> {
    HOUR.captures_iter(cell)
        .filter_map(|c| {
            let hour: i32 = c[1].parse().ok()?;
            let meridiem = c.get(2).map(|m| m.as_str().to_ascii_lowercase());
            Some(match meridiem.as_deref() {
                Some("p") if hour < 12 => hour + 12,
                Some("a") if hour == 12 => 0,
                _ => hour,
            })
        })
        .collect()
}

/// First hour reading in a cell.
pub fn first_hour(cell: &str) -> Option<i32> {
    hours_in_cell(cell).into_iter().next()
}

/// Collect schedule candidates from tables in scan order.
///
/// Two detectors feed the same pool:
/// - a row with a "DESDE" cell and a "HASTA" cell fixes two columns, and every
///   later row of that table with an hour in both columns is a candidate;
/// - a row mentioning "HORARIO" is a candidate built from its first two hours.
///
/// For a given row, the column candidates it triggers come before its own
/// "HORARIO" candidate.
pub fn collect_candidates<'a, I>(tables: I) -> Vec<ScheduleCandidate>
where
    I: IntoIterator<Item = &'a TableGrid>,
{
    let mut candidates = Vec::new();

    for table in tables {
        for (row_idx, row) in table.rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            let clean_row: Vec<&str> = row.iter().map(|c| c.trim()).collect();

            if let Some((from_col, to_col)) = from_to_columns(&clean_row) {
                candidates.extend(column_candidates(
                    &table.rows[row_idx + 1..],
                    from_col,
                    to_col,
                ));
            }

            if let Some(c) = labeled_row_candidate(&clean_row) {
                candidates.push(c);
            }
        }
    }

    candidates
}

/// True for a row with both a "DESDE" and a "HASTA" cell.
pub fn is_from_to_header(cells: &[&str]) -> bool {
    from_to_columns(cells).is_some()
}

/// Column positions of the "DESDE" and "HASTA" cells, if the row has both.
/// When several cells match, the rightmost one wins.
fn from_to_columns(row: &[&str]) -> Option<(usize, usize)> {
    let mut from_col = None;
    let mut to_col = None;
    for (col, cell) in row.iter().enumerate() {
        let upper = cell.to_uppercase();
        if upper.contains("DESDE") {
            from_col = Some(col);
        }
        if upper.contains("HASTA") {
            to_col = Some(col);
        }
    }
    Some((from_col?, to_col?))
}

fn column_candidates(
    rows: &[Vec<String>],
    from_col: usize,
    to_col: usize,
) -> impl Iterator<Item = ScheduleCandidate> + '_ {
    rows.iter()
        .filter(move |r| r.len() > from_col.max(to_col))
        .filter_map(move |r| {
            let start = first_hour(r[from_col].trim())?;
            let end = first_hour(r[to_col].trim())?;
            Some(ScheduleCandidate::new(start, end))
        })
}

fn labeled_row_candidate(row: &[&str]) -> Option<ScheduleCandidate> {
    if !row.join(" ").to_uppercase().contains("HORARIO") {
        return None;
    }
    let hours: Vec<i32> = row.iter().flat_map(|cell| hours_in_cell(cell)).collect();
    match hours.as_slice() {
        [start, end, ..] => Some(ScheduleCandidate::new(*start, *end)),
        _ => None,
    }
}

/// The candidate with the largest span; the earliest one wins a tie.
pub fn widest(candidates: &[ScheduleCandidate]) -> Option<ScheduleCandidate> {
    candidates.iter().fold(None, |best, c| match best {
        Some(b) if b.span() >= c.span() => Some(b),
        _ => Some(*c),
    })
}

/// Resolve a document's schedule display string ("6 A 14"), or "" if none.
pub fn resolve_schedule<'a, I>(tables: I) -> String
where
    I: IntoIterator<Item = &'a TableGrid>,
{
    let candidates = collect_candidates(tables);
    let chosen = widest(&candidates);
    log::debug!(
        "schedule: {} candidate(s), chosen {:?}",
        candidates.len(),
        chosen
    );
    chosen.map(|c| c.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> TableGrid {
        TableGrid::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_hours_in_cell() {
        assert_eq!(hours_in_cell("6 am"), vec![6]);
        assert_eq!(hours_in_cell("2 pm"), vec![14]);
        assert_eq!(hours_in_cell("1:30 p. m."), vec![13]);
        assert_eq!(hours_in_cell("12 PM"), vec![12]);
        assert_eq!(hours_in_cell("12 a.m."), vec![0]);
        assert_eq!(hours_in_cell("07:00 a 13:00"), vec![7, 13]);
        assert_eq!(hours_in_cell("HORARIO 7 13"), vec![7, 13]);
        assert!(hours_in_cell("sin hora").is_empty());
    }

    #[test]
    fn test_first_hour_truncates_long_numbers() {
        assert_eq!(first_hour("123"), Some(12));
        assert_eq!(first_hour("Jornada 8"), Some(8));
    }

    #[test]
    fn test_column_header_candidate() {
        let t = grid(&[&["DESDE", "HASTA"], &["6 am", "2 pm"]]);
        let c = collect_candidates([&t]);
        assert_eq!(c, vec![ScheduleCandidate::new(6, 14)]);
        assert_eq!(c[0].to_string(), "6 A 14");
    }

    #[test]
    fn test_column_header_skips_short_and_empty_rows() {
        let t = grid(&[
            &["Jornada", "Hora desde", "Hora hasta"],
            &["Mañana"],
            &["Mañana", "", "12"],
            &["Tarde", "1", "5"],
        ]);
        assert_eq!(collect_candidates([&t]), vec![ScheduleCandidate::new(1, 5)]);
    }

    #[test]
    fn test_row_label_candidate_uses_first_two_hours() {
        let t = grid(&[&["HORARIO", "7", "13", "18"]]);
        assert_eq!(collect_candidates([&t]), vec![ScheduleCandidate::new(7, 13)]);
    }

    #[test]
    fn test_row_label_needs_two_hours() {
        let t = grid(&[&["Horario", "por definir", "8"]]);
        assert!(collect_candidates([&t]).is_empty());
    }

    #[test]
    fn test_both_strategies_feed_the_pool() {
        let t = grid(&[&["HORARIO", "DESDE", "HASTA"], &["", "8", "12"]]);
        // The header row has no hours of its own, so only the column candidate appears.
        assert_eq!(collect_candidates([&t]), vec![ScheduleCandidate::new(8, 12)]);

        let t = grid(&[&["DESDE", "HASTA"], &["6", "12"], &["HORARIO 7 10", ""]]);
        let c = collect_candidates([&t]);
        assert_eq!(
            c,
            vec![ScheduleCandidate::new(6, 12), ScheduleCandidate::new(7, 10)]
        );
    }

    #[test]
    fn test_resolve_picks_widest() {
        let a = grid(&[&["HORARIO", "8", "10"]]);
        let b = grid(&[&["DESDE", "HASTA"], &["6", "18"]]);
        assert_eq!(resolve_schedule([&a, &b]), "6 A 18");
    }

    #[test]
    fn test_header_candidate_beats_labeled_row() {
        let header = grid(&[&["DESDE", "HASTA"], &["6 am", "2 pm"]]);
        let label = grid(&[&["HORARIO 7 13"]]);
        assert_eq!(resolve_schedule([&header, &label]), "6 A 14");
        assert_eq!(resolve_schedule([&label, &header]), "6 A 14");
    }

    #[test]
    fn test_resolve_tie_keeps_first_encountered() {
        let header = grid(&[&["DESDE", "HASTA"], &["6", "12"]]);
        let label = grid(&[&["HORARIO 7 13"]]);
        assert_eq!(resolve_schedule([&header, &label]), "6 A 12");
        assert_eq!(resolve_schedule([&label, &header]), "7 A 13");
    }

    #[test]
    fn test_negative_span_only_wins_alone() {
        let backwards = grid(&[&["HORARIO", "18", "6"]]);
        assert_eq!(resolve_schedule([&backwards]), "18 A 6");

        let forwards = grid(&[&["HORARIO", "8", "9"]]);
        assert_eq!(resolve_schedule([&backwards, &forwards]), "8 A 9");
    }

    #[test]
    fn test_resolve_no_candidates() {
        let t = grid(&[&["LU", "MA"], &["4", "4"]]);
        assert_eq!(resolve_schedule([&t]), "");
        assert_eq!(resolve_schedule(std::iter::empty::<&TableGrid>()), "");
    }

    #[test]
    fn test_widest_over_arbitrary_sets() {
        let sets = [
            vec![(1, 2), (3, 9), (0, 6)],
            vec![(10, 4), (9, 3)],
            vec![(5, 5)],
        ];
        for set in sets {
            let candidates: Vec<_> = set
                .iter()
                .map(|&(s, e)| ScheduleCandidate::new(s, e))
                .collect();
            let best = widest(&candidates).unwrap();
            assert!(candidates.iter().all(|c| c.span() <= best.span()));
            let first_max = candidates
                .iter()
                .find(|c| c.span() == best.span())
                .unwrap();
            assert_eq!(*first_max, best);
        }
    }
}
