//! Plain-text conflict previews.
//!
//! Pure string formatters over already-read content: an annotated per-line
//! view that highlights marker lines and tags each conflict side, and a
//! two-column side-by-side view per region. No I/O, no terminal handling --
//! callers decide where the text goes.

use crate::conflict::parser::{ConflictParser, END_MARKER, SEPARATOR_MARKER, START_MARKER};

/// Column width of each pane in the side-by-side view.
const PANE_WIDTH: usize = 38;
/// Lines longer than this are truncated with `...` in the side-by-side view.
const PANE_TEXT_WIDTH: usize = 35;

/// Render an annotated preview of `content`.
///
/// Marker lines are rewritten as `<<< OURS (current: <label>)`,
/// `=== SEPARATOR ...`, and `>>> THEIRS (incoming: <label>)`; conflict body
/// lines are prefixed by their side, and a summary line is appended.
pub fn annotated(content: &str, show_line_numbers: bool) -> String {
    let mut out = Vec::new();
    out.push("-".repeat(50));

    let mut in_ours = false;
    let mut in_theirs = false;
    let mut conflict_count = 0usize;
    let mut line_count = 0usize;

    for (i, line) in content.split('\n').enumerate() {
        line_count = i + 1;
        let number = if show_line_numbers {
            format!("{:4}: ", i + 1)
        } else {
            String::new()
        };

        if let Some(rest) = line.strip_prefix(START_MARKER) {
            in_ours = true;
            in_theirs = false;
            conflict_count += 1;
            let label = non_empty_or(rest.trim(), "HEAD");
            out.push(format!("{number}<<< OURS (current: {label})"));
        } else if in_ours && line.starts_with(SEPARATOR_MARKER) {
            in_ours = false;
            in_theirs = true;
            out.push(format!("{number}=== SEPARATOR {}", "=".repeat(25)));
        } else if in_theirs && line.starts_with(END_MARKER) {
            in_theirs = false;
            let rest = line.strip_prefix(END_MARKER).unwrap_or("");
            let label = non_empty_or(rest.trim(), "incoming");
            out.push(format!("{number}>>> THEIRS (incoming: {label})"));
        } else if in_ours {
            out.push(format!("{number}  < {line}"));
        } else if in_theirs {
            out.push(format!("{number}  > {line}"));
        } else {
            out.push(format!("{number}    {line}"));
        }
    }

    out.push("-".repeat(50));
    out.push(format!(
        "Found {conflict_count} conflict(s) in {line_count} lines"
    ));

    out.join("\n")
}

/// Render each conflict region of `content` as a two-column comparison.
pub fn side_by_side(content: &str) -> String {
    let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let parsed = ConflictParser::parse(lines);

    if parsed.regions.is_empty() {
        return "No conflict regions found".to_string();
    }

    let mut out = Vec::new();
    out.push("=".repeat(2 * PANE_WIDTH + 3));

    for (i, region) in parsed.regions.iter().enumerate() {
        out.push(format!("Conflict #{}:", i + 1));
        out.push(format!(
            "{:<width$} | {}",
            "OURS (current)",
            "THEIRS (incoming)",
            width = PANE_WIDTH
        ));
        out.push(format!(
            "{}-+-{}",
            "-".repeat(PANE_WIDTH),
            "-".repeat(PANE_WIDTH)
        ));

        let rows = region.ours.len().max(region.theirs.len());
        for row in 0..rows {
            let left = region.ours.get(row).map(String::as_str).unwrap_or("");
            let right = region.theirs.get(row).map(String::as_str).unwrap_or("");
            out.push(format!(
                "{:<width$} | {}",
                truncate(left),
                truncate(right),
                width = PANE_WIDTH
            ));
        }

        if i + 1 < parsed.regions.len() {
            out.push(String::new());
        }
    }

    out.join("\n")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn truncate(line: &str) -> String {
    if line.chars().count() > PANE_TEXT_WIDTH {
        let cut: String = line.chars().take(PANE_TEXT_WIDTH).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
