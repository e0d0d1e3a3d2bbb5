#![allow(dead_code)]
pub mod builders;

use sheet_sync::apply::ApplyOptions;
use sheet_sync::config::ProtectionConfig;
use sheet_sync::protect::ColumnGuard;
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

pub const TARGET_HEADERS: &[&str] = &[
    "No.",
    "Test ID",
    "Test Title",
    "Pre-Condition",
    "Test Procedure",
    "Check Item",
    "TestNo",
];

/// A target sheet with a banner row above the header and three data rows.
/// The TestNo column carries a formula, the anchor rows carry direct
/// formatting, so inserts have something to inherit.
pub fn target_book(sheet_name: &str) -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");
    sheet.set_name(sheet_name);

    sheet.get_cell_mut("A1").set_value("Regression test plan");

    for (i, header) in TARGET_HEADERS.iter().enumerate() {
        let col = (i + 1) as u32;
        sheet.get_cell_mut((col, 2)).set_value(header.to_string());
        sheet.get_style_mut((col, 2)).get_font_mut().set_bold(true);
    }

    for (offset, key) in ["TC-001", "TC-002", "TC-003"].iter().enumerate() {
        let row = 3 + offset as u32;
        sheet.get_cell_mut((1, row)).set_value_number(offset as i32 + 1);
        sheet.get_cell_mut((2, row)).set_value(key.to_string());
        sheet
            .get_cell_mut((3, row))
            .set_value(format!("Title {key}"));
        sheet
            .get_cell_mut((5, row))
            .set_value(format!("Procedure {key}"));
        sheet.get_cell_mut((7, row)).set_formula("ROW()-2");
    }

    book
}

pub fn apply_options() -> ApplyOptions {
    ApplyOptions {
        required_headers: vec![
            "No.".to_string(),
            "Test ID".to_string(),
            "Test Title".to_string(),
        ],
        header_scan_rows: 10,
        end_empty_rows: 3,
    }
}

pub fn default_guard() -> ColumnGuard {
    ColumnGuard::from_config(&ProtectionConfig::default()).expect("default guard")
}

pub fn write_book(book: &Spreadsheet, path: &Path) {
    umya_spreadsheet::writer::xlsx::write(book, path).expect("write workbook");
}
