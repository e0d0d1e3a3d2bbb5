use crate::apply::ChangeLogEntry;
use crate::resolve::InsertPlan;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

const TRUNCATE_CHARS: usize = 80;

/// Inputs for the generation report.
#[derive(Debug)]
pub struct GenerateSummary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub update_count: usize,
    pub insert_count: usize,
    pub plan: InsertPlan,
    pub warnings: Vec<String>,
}

pub fn render_generate_report(summary: &GenerateSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Patch Generation Report".to_string());
    lines.push(String::new());
    lines.push(format!("Generated: {}", Utc::now().to_rfc3339()));
    lines.push(String::new());
    lines.push(format!("- Source rows: {}", summary.total_rows));
    lines.push(format!("- After filter: {}", summary.filtered_rows));
    lines.push(format!("- Updates: {}", summary.update_count));
    lines.push(format!("- Inserts: {}", summary.insert_count));
    lines.push(String::new());

    if !summary.plan.is_empty() {
        lines.push("## Insertion anchors".to_string());
        lines.push(String::new());
        lines.push("| New key | After |".to_string());
        lines.push("|---|---|".to_string());
        for (key, anchor) in &summary.plan {
            let anchor = anchor.as_deref().unwrap_or("(end of sheet)");
            lines.push(format!("| `{key}` | `{anchor}` |"));
        }
        lines.push(String::new());
    }

    push_warning_section(
        &mut lines,
        summary.warnings.iter().map(|w| format!("- {w}")),
    );

    lines.join("\n")
}

pub fn render_apply_report(entries: &[ChangeLogEntry]) -> String {
    let updates: Vec<_> = entries
        .iter()
        .filter_map(|entry| match entry {
            ChangeLogEntry::Update { key, changes } => Some((key, changes)),
            _ => None,
        })
        .collect();
    let inserts: Vec<_> = entries
        .iter()
        .filter_map(|entry| match entry {
            ChangeLogEntry::Insert {
                key,
                after_key,
                row,
            } => Some((key, after_key, row)),
            _ => None,
        })
        .collect();
    let warnings: Vec<_> = entries
        .iter()
        .filter_map(|entry| match entry {
            ChangeLogEntry::Warning { key, message } => Some((key, message)),
            _ => None,
        })
        .collect();

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Patch Application Report".to_string());
    lines.push(String::new());
    lines.push(format!("Generated: {}", Utc::now().to_rfc3339()));
    lines.push(String::new());
    lines.push(format!("- Updates: {}", updates.len()));
    lines.push(format!("- Inserts: {}", inserts.len()));
    lines.push(format!("- Warnings: {}", warnings.len()));
    lines.push(String::new());

    if !updates.is_empty() {
        lines.push("## Updates".to_string());
        lines.push(String::new());
        for (key, changes) in updates {
            lines.push(format!("### `{key}`"));
            lines.push(String::new());
            for change in changes {
                lines.push(format!(
                    "- **{}**: `{}` -> `{}`",
                    change.column,
                    truncate(&change.old),
                    truncate(&change.new)
                ));
            }
            lines.push(String::new());
        }
    }

    if !inserts.is_empty() {
        lines.push("## Inserts".to_string());
        lines.push(String::new());
        for (key, after_key, row) in inserts {
            let anchor = if after_key.is_empty() {
                "(end of sheet)"
            } else {
                after_key.as_str()
            };
            lines.push(format!("- `{key}` inserted after `{anchor}` (row {row})"));
        }
        lines.push(String::new());
    }

    push_warning_section(
        &mut lines,
        warnings
            .iter()
            .map(|(key, message)| format!("- **{key}**: {message}")),
    );

    lines.join("\n")
}

fn push_warning_section(lines: &mut Vec<String>, warnings: impl Iterator<Item = String>) {
    let mut warnings = warnings.peekable();
    if warnings.peek().is_none() {
        return;
    }
    lines.push("## Warnings".to_string());
    lines.push(String::new());
    lines.extend(warnings);
    lines.push(String::new());
}

fn truncate(text: &str) -> String {
    // Reports quote cell contents that can run to whole paragraphs.
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= TRUNCATE_CHARS {
        return flat;
    }
    let mut short: String = flat.chars().take(TRUNCATE_CHARS).collect();
    short.push_str("...");
    short
}

pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write report '{}'", path.display()))
}
