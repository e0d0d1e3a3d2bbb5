use crate::apply::{ApplyOptions, ChangeLogEntry, apply_patch};
use crate::config::SyncProfile;
use crate::errors::SyncError;
use crate::patch::load_patch;
use crate::protect::ColumnGuard;
use crate::read::open_workbook;
use crate::write::save_workbook;
use crate::renumber::renumber_rows;
use crate::report::{render_apply_report, write_report};
use crate::sheet::detect_header_row;
use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug)]
pub struct ApplyParams {
    pub base: PathBuf,
    pub patch: PathBuf,
    pub output: PathBuf,
    pub report: PathBuf,
    pub profile: Option<PathBuf>,
    pub sheet: Option<String>,
    pub end_empty_rows: Option<u32>,
    pub dry_run: bool,
}

pub fn run(params: ApplyParams) -> Result<Value> {
    let profile = SyncProfile::load_or_default(params.profile.as_deref())?;
    let mut patch = load_patch(&params.patch)?;
    if let Some(sheet) = params.sheet {
        patch.sheet = sheet;
    }
    info!(
        operations = patch.operations.len(),
        sheet = %patch.sheet,
        "loaded patch"
    );

    let guard = ColumnGuard::from_config(&profile.protection)?;
    let mut options = ApplyOptions::from_profile(&profile);
    if let Some(end_empty_rows) = params.end_empty_rows {
        options.end_empty_rows = end_empty_rows;
    }

    let mut book = open_workbook(&params.base)?;
    let entries = apply_patch(&mut book, &patch, &guard, &options)?;

    let renumbered = {
        let sheet =
            book.get_sheet_by_name_mut(&patch.sheet)
                .ok_or_else(|| SyncError::SheetNotFound {
                    sheet: patch.sheet.clone(),
                })?;
        let header = detect_header_row(sheet, &options.required_headers, options.header_scan_rows)?;
        let number_col = header.columns.get(&profile.number_column).copied();
        let key_col = header.columns.get(patch.key_column()).copied();
        match (number_col, key_col) {
            (Some(number_col), Some(key_col)) => renumber_rows(
                sheet,
                header.row,
                number_col,
                key_col,
                options.end_empty_rows,
            ),
            _ => {
                warn!(
                    number_column = %profile.number_column,
                    "number or key column not found; skipping renumbering"
                );
                0
            }
        }
    };

    let updates = count(&entries, |e| matches!(e, ChangeLogEntry::Update { .. }));
    let inserts = count(&entries, |e| matches!(e, ChangeLogEntry::Insert { .. }));
    let warnings = count(&entries, |e| matches!(e, ChangeLogEntry::Warning { .. }));

    if params.dry_run {
        info!("dry run; workbook not written");
    } else {
        save_workbook(&book, &params.output)?;
        info!(output = %params.output.display(), "workbook written");
    }
    write_report(&params.report, &render_apply_report(&entries))?;

    Ok(json!({
        "output": params.output.display().to_string(),
        "report": params.report.display().to_string(),
        "dry_run": params.dry_run,
        "updates": updates,
        "inserts": inserts,
        "warnings": warnings,
        "renumbered": renumbered,
    }))
}

fn count(entries: &[ChangeLogEntry], predicate: impl Fn(&&ChangeLogEntry) -> bool) -> usize {
    entries.iter().filter(predicate).count()
}
