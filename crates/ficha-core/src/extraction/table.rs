use crate::attendance::is_day_header;
use crate::extraction::TableGrid;
use crate::schedule::is_from_to_header;

/// Reconstruct table grids from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces. A table is a
/// run of consecutive lines that each split into two or more segments on
/// gaps of 2+ spaces; a day header or a DESDE/HASTA header line always opens
/// a new table. The first line of the run fixes the columns, and each segment
/// of a later line lands in the column its text overlaps most.
pub fn detect_tables(lines: &[&str]) -> Vec<TableGrid> {
    find_table_regions(lines)
        .into_iter()
        .map(|region| build_grid(&lines[region.start_line..region.end_line]))
        .collect()
}

/// Line ranges (end exclusive) that look like tabular data.
pub fn find_table_regions(lines: &[&str]) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let segments = split_by_whitespace_gaps(line);
        let tabular = segments.len() >= 2;
        match (tabular, start) {
            (true, None) => start = Some(i),
            (true, Some(s)) if is_header_line(&segments) => {
                regions.push(TableRegion {
                    start_line: s,
                    end_line: i,
                });
                start = Some(i);
            }
            (false, Some(s)) => {
                regions.push(TableRegion {
                    start_line: s,
                    end_line: i,
                });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        regions.push(TableRegion {
            start_line: s,
            end_line: lines.len(),
        });
    }

    log::debug!("layout table detection: {} region(s)", regions.len());
    regions
}

fn is_header_line(segments: &[&str]) -> bool {
    is_day_header(segments) || is_from_to_header(segments)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegion {
    pub start_line: usize,
    pub end_line: usize,
}

/// Character span `[start, end)` of a segment on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn overlap(self, other: Span) -> usize {
        self.end.min(other.end).saturating_sub(self.start.max(other.start))
    }

    /// Twice the midpoint, to stay in integers.
    fn center2(self) -> usize {
        self.start + self.end
    }
}

fn build_grid(lines: &[&str]) -> TableGrid {
    let Some(first) = lines.first() else {
        return TableGrid::default();
    };

    let columns: Vec<Span> = segment_spans(first).into_iter().map(|(span, _)| span).collect();
    let width = columns.len();

    let rows = lines
        .iter()
        .map(|line| {
            let mut row = vec![String::new(); width];
            for (span, text) in segment_spans(line) {
                let col = column_for(span, &columns);
                if row[col].is_empty() {
                    row[col] = text.to_string();
                } else {
                    row[col].push(' ');
                    row[col].push_str(text);
                }
            }
            row
        })
        .collect();

    TableGrid::new(rows)
}

/// The column a segment overlaps most; with no overlap, the column whose
/// center is nearest. Ties go to the leftmost column.
fn column_for(span: Span, columns: &[Span]) -> usize {
    let mut best: Option<(usize, usize)> = None;
    for (col, column) in columns.iter().enumerate() {
        let overlap = span.overlap(*column);
        if overlap > 0 && best.map_or(true, |(_, o)| overlap > o) {
            best = Some((col, overlap));
        }
    }
    if let Some((col, _)) = best {
        return col;
    }

    let mut nearest = 0;
    let mut nearest_dist = usize::MAX;
    for (col, column) in columns.iter().enumerate() {
        let dist = span.center2().abs_diff(column.center2());
        if dist < nearest_dist {
            nearest = col;
            nearest_dist = dist;
        }
    }
    nearest
}

/// Segments with the character span each one covers.
fn segment_spans(line: &str) -> Vec<(Span, &str)> {
    gap_segments(line)
        .into_iter()
        .map(|(byte, seg)| {
            let start = line[..byte].chars().count();
            let span = Span {
                start,
                end: start + seg.chars().count(),
            };
            (span, seg)
        })
        .collect()
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    gap_segments(line).into_iter().map(|(_, seg)| seg).collect()
}

fn gap_segments(line: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;
    let mut last_non_space_end = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push((s, &line[s..last_non_space_end]));
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
            last_non_space_end = i + c.len_utf8();
        }
    }

    if let Some(s) = start {
        segments.push((s, &line[s..last_non_space_end]));
    }

    segments
}
