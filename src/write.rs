use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    umya_spreadsheet::writer::xlsx::write(book, path)
        .with_context(|| format!("failed to save workbook '{}'", path.display()))
}
