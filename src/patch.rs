use crate::errors::SyncError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Column name -> value, in the order the fields were authored.
pub type FieldMap = IndexMap<String, String>;

/// One patch operation. The `op` tag is load-bearing: an unrecognized kind
/// fails deserialization of the whole document before anything is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Overwrite columns of the row identified by `key`.
    Update { key: FieldMap, set: FieldMap },
    /// Insert a new row immediately after the row identified by `after_key`.
    /// An empty anchor value means append at the end of the data region.
    Insert { after_key: FieldMap, row: FieldMap },
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Update { .. } => "update",
            Operation::Insert { .. } => "insert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchDocument {
    pub sheet: String,
    pub key_columns: Vec<String>,
    pub operations: Vec<Operation>,
}

impl PatchDocument {
    pub fn new(sheet: impl Into<String>, key_column: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            key_columns: vec![key_column.into()],
            operations: Vec::new(),
        }
    }

    /// The primary key column. Only valid after `validate`.
    pub fn key_column(&self) -> &str {
        self.key_columns.first().map(String::as_str).unwrap_or("")
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.sheet.trim().is_empty() {
            return Err(invalid("target sheet name is empty"));
        }
        if self.key_columns.is_empty() {
            return Err(invalid("key_columns must name at least one column"));
        }
        let key_column = &self.key_columns[0];

        for (index, op) in self.operations.iter().enumerate() {
            match op {
                Operation::Update { key, .. } => {
                    let value = key.get(key_column).map(String::as_str).unwrap_or("");
                    if value.trim().is_empty() {
                        return Err(invalid(format!(
                            "operation {index}: update requires a non-empty '{key_column}' key"
                        )));
                    }
                }
                Operation::Insert { row, .. } => {
                    if row.is_empty() {
                        return Err(invalid(format!(
                            "operation {index}: insert requires a row mapping"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> SyncError {
    SyncError::InvalidPatch {
        reason: reason.into(),
    }
}

/// Parse and validate a patch document from its YAML form. Any structural
/// problem is fatal here, before a single cell is touched.
pub fn parse_patch(raw: &str) -> Result<PatchDocument, SyncError> {
    let patch: PatchDocument =
        serde_yaml::from_str(raw).map_err(|err| invalid(err.to_string()))?;
    patch.validate()?;
    Ok(patch)
}

pub fn to_yaml(patch: &PatchDocument) -> Result<String> {
    serde_yaml::to_string(patch).context("failed to serialize patch document")
}

pub fn load_patch(path: &Path) -> Result<PatchDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read patch '{}'", path.display()))?;
    Ok(parse_patch(&raw)?)
}

pub fn write_patch(patch: &PatchDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(path, to_yaml(patch)?)
        .with_context(|| format!("failed to write patch '{}'", path.display()))
}
