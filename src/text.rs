/// Collapse extracted text into single-space separated prose.
///
/// Each line is trimmed and split on double spaces; the trimmed, non-empty
/// phrases of every line are joined with one space. Single spaces and
/// non-breaking spaces inside a phrase are kept as they are.
pub fn normalize(text: &str) -> String {
    text.split(is_line_boundary)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
