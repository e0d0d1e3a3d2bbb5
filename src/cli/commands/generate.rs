use crate::config::SyncProfile;
use crate::filter::RowFilter;
use crate::patch::{FieldMap, Operation, PatchDocument, write_patch};
use crate::read::{Record, read_source_records, read_target_keys};
use crate::report::{GenerateSummary, render_generate_report, write_report};
use crate::resolve::resolve_after_keys;
use crate::rewrite::{GlossaryRewriter, Rewrite};
use anyhow::Result;
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct GenerateParams {
    pub source: PathBuf,
    pub target: PathBuf,
    pub out_patch: PathBuf,
    pub out_report: PathBuf,
    pub profile: Option<PathBuf>,
    pub glossary: Option<PathBuf>,
    pub strict: bool,
}

pub fn run(params: GenerateParams) -> Result<Value> {
    let profile = SyncProfile::load_or_default(params.profile.as_deref())?;
    let rewriter = match &params.glossary {
        Some(path) => GlossaryRewriter::from_file(path)?,
        None => GlossaryRewriter::empty(),
    };

    let (records, _) = read_source_records(&params.source, &profile)?;
    let total_rows = records.len();

    let row_filter = RowFilter::from_config(&profile.filter);
    let filtered: Vec<&Record> = records
        .iter()
        .filter(|record| {
            row_filter.selects(
                field(record, &profile.filter.remark_column),
                field(record, &profile.filter.team_column),
            )
        })
        .collect();
    info!(
        total = total_rows,
        filtered = filtered.len(),
        "filtered source rows"
    );

    let existing: HashSet<String> = read_target_keys(&params.target, &profile)?
        .into_iter()
        .collect();

    let order: Vec<String> = filtered
        .iter()
        .map(|record| field(record, &profile.key_column).to_string())
        .collect();
    let plan = resolve_after_keys(&order, &existing, params.strict)?;

    let mut operations = Vec::with_capacity(filtered.len());
    let mut warnings: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut update_count = 0usize;
    let mut insert_count = 0usize;

    for record in &filtered {
        let key = field(record, &profile.key_column).to_string();
        if !seen.insert(key.clone()) {
            warnings.push(format!(
                "duplicate key '{key}' in source order; later row skipped"
            ));
            continue;
        }

        let mut rewritten: FieldMap = IndexMap::new();
        for (source_column, target_column) in &profile.rewrite_columns {
            let raw = field(record, source_column);
            rewritten.insert(target_column.clone(), rewriter.rewrite(raw));
        }

        if existing.contains(&key) {
            operations.push(Operation::Update {
                key: key_map(&profile.key_column, &key),
                set: rewritten,
            });
            update_count += 1;
        } else {
            let anchor = plan.get(&key).cloned().flatten();
            if anchor.is_none() {
                warnings.push(format!(
                    "key '{key}': no anchor found; row will be appended at end"
                ));
            }

            let mut row: FieldMap = IndexMap::new();
            for column in &profile.passthrough_columns {
                if let Some(value) = record.get(column)
                    && !value.is_empty()
                {
                    row.insert(column.clone(), value.clone());
                }
            }
            row.extend(rewritten);

            operations.push(Operation::Insert {
                after_key: key_map(&profile.key_column, anchor.as_deref().unwrap_or("")),
                row,
            });
            insert_count += 1;
        }
    }

    let mut patch = PatchDocument::new(profile.target_sheet.clone(), profile.key_column.clone());
    patch.operations = operations;
    write_patch(&patch, &params.out_patch)?;

    let summary = GenerateSummary {
        total_rows,
        filtered_rows: filtered.len(),
        update_count,
        insert_count,
        plan,
        warnings: warnings.clone(),
    };
    write_report(&params.out_report, &render_generate_report(&summary))?;
    info!(
        updates = update_count,
        inserts = insert_count,
        patch = %params.out_patch.display(),
        "patch written"
    );

    Ok(json!({
        "patch": params.out_patch.display().to_string(),
        "report": params.out_report.display().to_string(),
        "total_rows": total_rows,
        "filtered_rows": summary.filtered_rows,
        "updates": update_count,
        "inserts": insert_count,
        "warnings": warnings,
    }))
}

fn field<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

fn key_map(key_column: &str, value: &str) -> FieldMap {
    let mut map = IndexMap::new();
    map.insert(key_column.to_string(), value.to_string());
    map
}
