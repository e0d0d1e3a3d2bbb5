use crate::sheet::cell_text;
use tracing::debug;
use umya_spreadsheet::Worksheet;

/// Reassign the sequential counter column after a patch run: every row with
/// a non-empty key gets the next integer starting at 1. A run of
/// `end_empty_rows` consecutive empty-key rows ends the walk; short gaps
/// inside the data region are skipped but do not reset the counter.
/// Idempotent by construction. Returns the number of rows numbered.
pub fn renumber_rows(
    sheet: &mut Worksheet,
    header_row: u32,
    number_col: u32,
    key_col: u32,
    end_empty_rows: u32,
) -> u32 {
    let (_, highest_row) = sheet.get_highest_column_and_row();
    let mut counter = 0u32;
    let mut empty_streak = 0u32;

    for row in (header_row + 1)..=highest_row {
        if cell_text(sheet, key_col, row).is_empty() {
            empty_streak += 1;
            if empty_streak >= end_empty_rows {
                break;
            }
            continue;
        }
        empty_streak = 0;
        counter += 1;
        sheet
            .get_cell_mut((number_col, row))
            .set_value_number(counter);
    }

    debug!(numbered = counter, "renumbered rows");
    counter
}
