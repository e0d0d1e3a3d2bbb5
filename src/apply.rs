use crate::config::{DEFAULT_END_EMPTY_ROWS, DEFAULT_HEADER_SCAN_ROWS, SyncProfile};
use crate::errors::SyncError;
use crate::patch::{FieldMap, Operation, PatchDocument};
use crate::protect::ColumnGuard;
use crate::sheet::{
    HeaderLocation, cell_value, detect_header_row, find_row_by_key, last_data_row,
};
use serde::Serialize;
use tracing::{debug, warn};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// What happened (or failed to happen) for one operation, in application
/// order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeLogEntry {
    Update {
        key: String,
        changes: Vec<ColumnChange>,
    },
    Insert {
        key: String,
        after_key: String,
        row: u32,
    },
    Warning {
        key: String,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnChange {
    pub column: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Labels the target header row must carry.
    pub required_headers: Vec<String>,
    pub header_scan_rows: u32,
    pub end_empty_rows: u32,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            required_headers: SyncProfile::default().required_target_headers,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            end_empty_rows: DEFAULT_END_EMPTY_ROWS,
        }
    }
}

impl ApplyOptions {
    pub fn from_profile(profile: &SyncProfile) -> Self {
        Self {
            required_headers: profile.required_target_headers.clone(),
            header_scan_rows: profile.header_scan_rows,
            end_empty_rows: profile.end_empty_rows,
        }
    }
}

/// Apply a validated patch to the workbook in place and return the change
/// log. Structural problems (missing sheet, undiscoverable header) are
/// fatal; a missing key or anchor only downgrades that one operation to a
/// warning entry.
///
/// Operations run strictly in patch order. Inserts shift row indices, so
/// every lookup scans the sheet's current state rather than a cached
/// key->row map.
pub fn apply_patch(
    book: &mut Spreadsheet,
    patch: &PatchDocument,
    guard: &ColumnGuard,
    options: &ApplyOptions,
) -> Result<Vec<ChangeLogEntry>, SyncError> {
    patch.validate()?;
    let key_column = patch.key_column().to_string();

    let sheet = book
        .get_sheet_by_name_mut(&patch.sheet)
        .ok_or_else(|| SyncError::SheetNotFound {
            sheet: patch.sheet.clone(),
        })?;

    let mut required = options.required_headers.clone();
    for column in &patch.key_columns {
        if !required.contains(column) {
            required.push(column.clone());
        }
    }
    let header = detect_header_row(sheet, &required, options.header_scan_rows)?;
    // Guaranteed by the required set above.
    let key_col = header.columns[key_column.as_str()];

    let mut log = Vec::with_capacity(patch.operations.len());
    for op in &patch.operations {
        match op {
            Operation::Update { key, set } => {
                let key = field(key, &key_column);
                apply_update(sheet, &header, key_col, key, set, guard, options, &mut log);
            }
            Operation::Insert { after_key, row } => {
                let after_key = field(after_key, &key_column);
                apply_insert(
                    sheet,
                    &header,
                    key_col,
                    after_key,
                    row,
                    &key_column,
                    options,
                    &mut log,
                );
            }
        }
    }
    Ok(log)
}

fn field<'a>(map: &'a FieldMap, column: &str) -> &'a str {
    map.get(column).map(String::as_str).unwrap_or("").trim()
}

#[allow(clippy::too_many_arguments)]
fn apply_update(
    sheet: &mut Worksheet,
    header: &HeaderLocation,
    key_col: u32,
    key: &str,
    set: &FieldMap,
    guard: &ColumnGuard,
    options: &ApplyOptions,
    log: &mut Vec<ChangeLogEntry>,
) {
    let Some(row) = find_row_by_key(sheet, key, header.row, key_col, options.end_empty_rows)
    else {
        warn!(key, "update target not found; skipping");
        log.push(ChangeLogEntry::Warning {
            key: key.to_string(),
            message: "key not found for update; operation skipped".to_string(),
        });
        return;
    };

    let mut changes = Vec::new();
    for (column, new_value) in set {
        let Some(col) = header.columns.get(column).copied() else {
            // Unknown column: silently skipped, same as a protected one.
            continue;
        };
        if guard.is_protected(column) {
            continue;
        }

        let old_value = cell_value(sheet, col, row);
        if old_value == *new_value {
            continue;
        }
        let cell = sheet.get_cell_mut((col, row));
        cell.get_cell_value_mut().remove_formula();
        cell.set_value(new_value.clone());
        changes.push(ColumnChange {
            column: column.clone(),
            old: old_value,
            new: new_value.clone(),
        });
    }

    debug!(key, row, changed = changes.len(), "applied update");
    log.push(ChangeLogEntry::Update {
        key: key.to_string(),
        changes,
    });
}

#[allow(clippy::too_many_arguments)]
fn apply_insert(
    sheet: &mut Worksheet,
    header: &HeaderLocation,
    key_col: u32,
    after_key: &str,
    row_fields: &FieldMap,
    key_column: &str,
    options: &ApplyOptions,
    log: &mut Vec<ChangeLogEntry>,
) {
    let key = row_fields
        .get(key_column)
        .cloned()
        .unwrap_or_else(|| "?".to_string());

    let template_row = if after_key.is_empty() {
        // Empty anchor always means append: template is the last data row.
        last_data_row(sheet, header.row, key_col, options.end_empty_rows)
    } else {
        match find_row_by_key(sheet, after_key, header.row, key_col, options.end_empty_rows) {
            Some(row) => row,
            None => {
                warn!(key = %key, after_key, "insert anchor not found; skipping");
                log.push(ChangeLogEntry::Warning {
                    key,
                    message: format!("anchor key '{after_key}' not found; operation skipped"),
                });
                return;
            }
        }
    };

    let new_row = template_row + 1;
    sheet.insert_new_row(&new_row, &1);
    clone_template_row(sheet, template_row, new_row);

    for (column, value) in row_fields {
        let Some(col) = header.columns.get(column).copied() else {
            continue;
        };
        // Explicit row data always wins over an inherited formula, and
        // protection does not apply: this is initial population of a new
        // row, not an overwrite.
        let cell = sheet.get_cell_mut((col, new_row));
        cell.get_cell_value_mut().remove_formula();
        cell.set_value(value.clone());
    }

    debug!(key = %key, after_key, row = new_row, "inserted row");
    log.push(ChangeLogEntry::Insert {
        key,
        after_key: after_key.to_string(),
        row: new_row,
    });
}

/// Clone the template row's per-cell style and formula texts into the new
/// row so an inserted record visually matches its neighbor. Styles are
/// cloned values, never shared, so later edits to one row cannot leak into
/// another.
fn clone_template_row(sheet: &mut Worksheet, template_row: u32, new_row: u32) {
    let (highest_col, _) = sheet.get_highest_column_and_row();

    for col in 1..=highest_col {
        let Some(src_cell) = sheet.get_cell((col, template_row)) else {
            continue;
        };
        let style = src_cell.get_style().clone();
        let formula = if src_cell.is_formula() {
            Some(src_cell.get_formula().to_string())
        } else {
            None
        };

        let dest_cell = sheet.get_cell_mut((col, new_row));
        dest_cell.set_style(style);
        if let Some(formula) = formula {
            dest_cell.set_formula(formula);
            dest_cell.set_formula_result_default("");
        }
    }

    let height = sheet
        .get_row_dimension(&template_row)
        .map(|row| *row.get_height());
    if let Some(height) = height
        && height > 0.0
    {
        sheet.get_row_dimension_mut(&new_row).set_height(height);
    }
}
