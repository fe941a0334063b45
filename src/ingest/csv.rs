// src/ingest/csv.rs

use super::models::Row;

/// Splits one CSV line on commas outside double-quote spans. A quote
/// character toggles the quoted state and is dropped; neither export
/// escapes quotes inside fields. Fields come back trimmed.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parses a whole export: first line is the header row, every line after
/// it one record. Cells missing from a short line map to empty strings,
/// so a malformed row still produces a (mostly empty) record instead of
/// aborting the parse.
pub fn parse(text: &str) -> Vec<Row> {
    let mut lines = text.trim().lines();
    let headers = match lines.next() {
        Some(header_line) => split_line(header_line),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values = split_line(line);
            Row::new(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
                    .collect(),
            )
        })
        .collect()
}
