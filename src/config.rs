use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_HEADER_SCAN_ROWS: u32 = 200;
pub const DEFAULT_END_EMPTY_ROWS: u32 = 3;
const DEFAULT_MODEL_CODE_PATTERN: &str = "^[A-Z]{2}[0-9]{4}$";

/// Every knob of one synchronization pairing, loadable from a YAML profile
/// file. The defaults describe the standard test-record layout; a profile
/// only needs to override what differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncProfile {
    /// Sheet read from the source workbook.
    pub source_sheet: String,
    /// Sheet patched in the target workbook.
    pub target_sheet: String,
    /// Column holding the unique record key in both workbooks.
    pub key_column: String,
    /// Column rewritten by the sequential renumbering pass.
    pub number_column: String,
    /// Labels that must all appear in one row for source header discovery.
    pub required_source_headers: Vec<String>,
    /// Labels that must all appear in one row for target header discovery.
    pub required_target_headers: Vec<String>,
    /// Columns copied into insert operations verbatim.
    pub passthrough_columns: Vec<String>,
    /// Source column -> target column pairs routed through the rewriter.
    pub rewrite_columns: IndexMap<String, String>,
    pub filter: FilterConfig,
    pub protection: ProtectionConfig,
    /// How many leading rows to scan for a header row.
    pub header_scan_rows: u32,
    /// Consecutive empty-key rows treated as end of data.
    pub end_empty_rows: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub remark_column: String,
    pub team_column: String,
    pub include_tag: String,
    pub exclude_tag: String,
    pub team_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// A column is protected when its header contains any of these.
    pub substrings: Vec<String>,
    /// Or when the header matches this pattern (per-model result columns).
    pub model_code_pattern: String,
}

impl Default for SyncProfile {
    fn default() -> Self {
        Self {
            source_sheet: "Test Items".to_string(),
            target_sheet: "Test Plan".to_string(),
            key_column: "Test ID".to_string(),
            number_column: "No.".to_string(),
            required_source_headers: vec![
                "Test ID".to_string(),
                "Test Procedure".to_string(),
                "Check Item".to_string(),
            ],
            required_target_headers: vec![
                "No.".to_string(),
                "Test ID".to_string(),
                "Test Title".to_string(),
            ],
            passthrough_columns: vec![
                "Test ID".to_string(),
                "Section".to_string(),
                "Sub-section".to_string(),
                "Test Title".to_string(),
            ],
            rewrite_columns: [
                ("Pre-Condition", "Pre-Condition"),
                ("Test Procedure", "Test Procedure"),
                ("Check Item", "Check Item"),
            ]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
            filter: FilterConfig::default(),
            protection: ProtectionConfig::default(),
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            end_empty_rows: DEFAULT_END_EMPTY_ROWS,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            remark_column: "Remark".to_string(),
            team_column: "Team".to_string(),
            include_tag: "#SYNC".to_string(),
            exclude_tag: "#SYNC-EXCLUDE".to_string(),
            team_value: "QC(Verification)".to_string(),
        }
    }
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            substrings: vec![
                "TestNo".to_string(),
                "Auto-filled".to_string(),
                "Case Count".to_string(),
            ],
            model_code_pattern: DEFAULT_MODEL_CODE_PATTERN.to_string(),
        }
    }
}

impl SyncProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile '{}'", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse profile '{}'", path.display()))
    }

    /// Loads the profile when a path is given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
