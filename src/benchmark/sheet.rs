use std::ops::Range;

use super::types::BenchmarkRecord;

/// A raw worksheet: named grid of text cells, rows top to bottom.
///
/// Rows may have different widths. Cells that are empty or whitespace-only
/// count as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell text, or `None` when out of range or blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row indices whose `column` cell equals `marker` (trimmed, case-insensitive).
    pub fn find_marker_rows(&self, column: usize, marker: &str) -> Vec<usize> {
        let marker = marker.trim().to_lowercase();
        (0..self.rows.len())
            .filter(|&row| {
                self.cell(row, column)
                    .is_some_and(|c| c.trim().to_lowercase() == marker)
            })
            .collect()
    }
}

/// Unpivot a wide block into long-form records.
///
/// `rows` selects the block, `type_column` holds the building type and each
/// `(column, region)` pair names one region column. Output is region-major:
/// every row for the first region, then every row for the next. Cells with no
/// building type, or whose value is not a positive number, yield nothing.
pub fn melt(
    sheet: &Sheet,
    rows: Range<usize>,
    type_column: usize,
    region_columns: &[(usize, String)],
) -> Vec<BenchmarkRecord> {
    let mut records = Vec::new();
    for (column, region) in region_columns {
        for row in rows.clone() {
            let Some(building_type) = sheet.cell(row, type_column) else {
                continue;
            };
            let Some(value) = sheet.cell(row, *column).and_then(parse_eui) else {
                continue;
            };
            records.push(BenchmarkRecord::new(building_type, region.as_str(), value));
        }
    }
    records
}

fn parse_eui(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
