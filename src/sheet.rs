use crate::errors::SyncError;
use indexmap::IndexMap;
use umya_spreadsheet::Worksheet;

/// Header label -> 1-based column index, in left-to-right order.
pub type HeaderMap = IndexMap<String, u32>;

#[derive(Debug, Clone)]
pub struct HeaderLocation {
    pub row: u32,
    pub columns: HeaderMap,
}

/// Trimmed display text of a cell, empty string when the cell is absent.
pub fn cell_text(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().trim().to_string())
        .unwrap_or_default()
}

/// Raw (untrimmed) value of a cell, for change-log capture.
pub fn cell_value(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

/// Scan the leading rows for the first one whose non-empty cells include
/// every required label. Nothing below a sheet can be trusted without its
/// header, so failure here is fatal for the run.
pub fn detect_header_row(
    sheet: &Worksheet,
    required: &[String],
    max_scan: u32,
) -> Result<HeaderLocation, SyncError> {
    let (highest_col, highest_row) = sheet.get_highest_column_and_row();
    let limit = max_scan.min(highest_row);

    for row in 1..=limit {
        let mut columns: HeaderMap = IndexMap::new();
        for col in 1..=highest_col {
            let value = cell_text(sheet, col, row);
            if !value.is_empty() {
                columns.entry(value).or_insert(col);
            }
        }
        if required.iter().all(|label| columns.contains_key(label)) {
            return Ok(HeaderLocation { row, columns });
        }
    }

    Err(SyncError::HeaderNotFound {
        scanned: max_scan,
        required: required.to_vec(),
    })
}

/// Locate the row whose key-column cell equals `key`, scanning downward from
/// just below the header. A run of `end_empty_rows` consecutive empty-key
/// rows marks the end of the data region and bounds the scan.
pub fn find_row_by_key(
    sheet: &Worksheet,
    key: &str,
    header_row: u32,
    key_col: u32,
    end_empty_rows: u32,
) -> Option<u32> {
    let (_, highest_row) = sheet.get_highest_column_and_row();
    let mut empty_streak = 0u32;

    for row in (header_row + 1)..=highest_row {
        let value = cell_text(sheet, key_col, row);
        if value == key {
            return Some(row);
        }
        if value.is_empty() {
            empty_streak += 1;
            if empty_streak >= end_empty_rows {
                break;
            }
        } else {
            empty_streak = 0;
        }
    }
    None
}

/// The last row of the data region, or the header row itself when the sheet
/// has no data rows yet.
pub fn last_data_row(
    sheet: &Worksheet,
    header_row: u32,
    key_col: u32,
    end_empty_rows: u32,
) -> u32 {
    let (_, highest_row) = sheet.get_highest_column_and_row();
    let mut last = header_row;
    let mut empty_streak = 0u32;

    for row in (header_row + 1)..=highest_row {
        if cell_text(sheet, key_col, row).is_empty() {
            empty_streak += 1;
            if empty_streak >= end_empty_rows {
                break;
            }
        } else {
            empty_streak = 0;
            last = row;
        }
    }
    last
}
