use once_cell::sync::Lazy;
use regex::Regex;

static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("regex"));

/// Normalize a raw cell value into clean text: xlsx carriage-return escapes
/// become newlines, runs of blank lines collapse to one, surrounding
/// whitespace is stripped.
pub fn clean_cell_text(raw: &str) -> String {
    let text = raw
        .replace("_x000D_", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Fold full-width parentheses to ASCII so labels typed either way compare
/// equal.
pub fn normalize_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            _ => c,
        })
        .collect()
}

/// Canonical form used when comparing free-text labels (team names etc.).
pub fn comparison_key(text: &str) -> String {
    normalize_width(text.trim())
}
