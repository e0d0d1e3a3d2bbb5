use crate::config::SyncProfile;
use crate::errors::SyncError;
use crate::normalize::clean_cell_text;
use crate::sheet::{HeaderLocation, cell_text, cell_value, detect_header_row};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

/// One source row: recognized column name -> normalized text.
pub type Record = IndexMap<String, String>;

pub fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("failed to open workbook '{}'", path.display()))
}

/// Read the source sheet into ordered records. Rows with an empty key are
/// skipped (the source may interleave section banners with data rows).
pub fn read_source_records(
    path: &Path,
    profile: &SyncProfile,
) -> Result<(Vec<Record>, HeaderLocation)> {
    let book = open_workbook(path)?;
    let sheet = book
        .get_sheet_by_name(&profile.source_sheet)
        .ok_or_else(|| SyncError::SheetNotFound {
            sheet: profile.source_sheet.clone(),
        })?;

    let header = detect_header_row(
        sheet,
        &profile.required_source_headers,
        profile.header_scan_rows,
    )?;

    fn push_unique(interest: &mut Vec<String>, name: &str) {
        if !interest.iter().any(|existing| existing == name) {
            interest.push(name.to_string());
        }
    }
    let mut interest: Vec<String> = Vec::new();
    push_unique(&mut interest, &profile.key_column);
    for name in &profile.passthrough_columns {
        push_unique(&mut interest, name);
    }
    for name in profile.rewrite_columns.keys() {
        push_unique(&mut interest, name);
    }
    push_unique(&mut interest, &profile.filter.remark_column);
    push_unique(&mut interest, &profile.filter.team_column);

    let columns: Vec<(String, u32)> = interest
        .into_iter()
        .filter_map(|name| header.columns.get(&name).map(|col| (name, *col)))
        .collect();
    let key_col = columns
        .iter()
        .find(|(name, _)| name == &profile.key_column)
        .map(|(_, col)| *col)
        .ok_or_else(|| SyncError::HeaderNotFound {
            scanned: profile.header_scan_rows,
            required: vec![profile.key_column.clone()],
        })?;

    let (_, highest_row) = sheet.get_highest_column_and_row();
    let mut records = Vec::new();
    for row in (header.row + 1)..=highest_row {
        if cell_text(sheet, key_col, row).is_empty() {
            continue;
        }
        let mut record: Record = IndexMap::new();
        for (name, col) in &columns {
            let raw = cell_value(sheet, *col, row);
            record.insert(name.clone(), clean_cell_text(&raw));
        }
        records.push(record);
    }

    tracing::debug!(rows = records.len(), sheet = %profile.source_sheet, "read source records");
    Ok((records, header))
}

/// Keys already present in the target sheet, in top-to-bottom order.
pub fn read_target_keys(path: &Path, profile: &SyncProfile) -> Result<Vec<String>> {
    let book = open_workbook(path)?;
    let sheet = book
        .get_sheet_by_name(&profile.target_sheet)
        .ok_or_else(|| SyncError::SheetNotFound {
            sheet: profile.target_sheet.clone(),
        })?;

    let header = detect_header_row(
        sheet,
        &profile.required_target_headers,
        profile.header_scan_rows,
    )?;
    let key_col = header
        .columns
        .get(&profile.key_column)
        .copied()
        .ok_or_else(|| SyncError::HeaderNotFound {
            scanned: profile.header_scan_rows,
            required: vec![profile.key_column.clone()],
        })?;

    let (_, highest_row) = sheet.get_highest_column_and_row();
    let mut keys = Vec::new();
    for row in (header.row + 1)..=highest_row {
        let key = cell_text(sheet, key_col, row);
        if !key.is_empty() {
            keys.push(key);
        }
    }
    Ok(keys)
}
