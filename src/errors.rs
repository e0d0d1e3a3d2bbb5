use thiserror::Error;

/// Fatal error kinds surfaced by the sync core. Per-operation problems
/// (missing keys, missing anchors) are reported as change-log warnings
/// instead and never abort a run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot determine anchor for key '{key}': no preceding known key")]
    NoAnchor { key: String },

    #[error("sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("header row not found within the first {scanned} rows (required labels: {})", required.join(", "))]
    HeaderNotFound { scanned: u32, required: Vec<String> },

    #[error("invalid patch document: {reason}")]
    InvalidPatch { reason: String },
}
