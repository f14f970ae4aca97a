//! Conflict marker parsing.
//!
//! Scans file lines for Git-style `<<<<<<<` / `=======` / `>>>>>>>` triples
//! and extracts each well-formed region together with its position in the
//! original line sequence. Parsing is a pure function over the lines: no
//! I/O, and it never fails -- malformed marker sequences degrade to fewer
//! (or zero) detected regions.

use serde::{Deserialize, Serialize};
use tracing::debug;

// ---------------------------------------------------------------------------
// Marker literals
// ---------------------------------------------------------------------------

/// Line prefix that opens a conflict region.
pub const START_MARKER: &str = "<<<<<<<";
/// Line prefix that separates the two sides of a region.
pub const SEPARATOR_MARKER: &str = "=======";
/// Line prefix that closes a conflict region.
pub const END_MARKER: &str = ">>>>>>>";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One complete `<<<<<<<` / `=======` / `>>>>>>>` block.
///
/// Line indices are zero-based positions in the original line sequence, with
/// `start_line < separator_line < end_line` always holding for a parsed
/// region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRegion {
    /// Index of the `<<<<<<<` line.
    pub start_line: usize,
    /// Index of the `=======` line.
    pub separator_line: usize,
    /// Index of the `>>>>>>>` line.
    pub end_line: usize,
    /// Free text after the start marker (commonly a branch name). May be empty.
    pub ours_label: String,
    /// Free text after the end marker. May be empty.
    pub theirs_label: String,
    /// Lines between start and separator. May be empty.
    pub ours: Vec<String>,
    /// Lines between separator and end. May be empty.
    pub theirs: Vec<String>,
}

/// A file's full line sequence plus the conflict regions found in it.
///
/// Regions are non-overlapping and strictly increasing:
/// `regions[i].end_line < regions[i + 1].start_line`.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Every line of the original content, region lines included.
    pub lines: Vec<String>,
    /// Well-formed regions in ascending line order.
    pub regions: Vec<ConflictRegion>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// A region that has seen its start marker but not yet its end marker.
struct OpenRegion {
    start_line: usize,
    ours_label: String,
    separator_line: Option<usize>,
    ours: Vec<String>,
    theirs: Vec<String>,
}

/// Stateless conflict marker parser.
pub struct ConflictParser;

impl ConflictParser {
    /// Cheap existence pre-check: `true` iff all three marker literals occur
    /// anywhere in the content. Callers use this to short-circuit files with
    /// no conflicts before running the full parser.
    pub fn detect(content: &str) -> bool {
        content.contains(START_MARKER)
            && content.contains(SEPARATOR_MARKER)
            && content.contains(END_MARKER)
    }

    /// Extract every well-formed conflict region from `lines`.
    ///
    /// Single linear pass. Only sequential start/separator/end triples are
    /// recognized:
    /// - A start marker inside an already-open region is ordinary content of
    ///   the current side.
    /// - An end marker before the separator is ordinary content of `ours`.
    /// - A region still open at end-of-input is discarded; its lines remain
    ///   normal content starting from the abandoned start marker, so
    ///   unrelated content is never corrupted by malformed markers.
    pub fn parse(lines: Vec<String>) -> ParsedFile {
        let mut regions = Vec::new();
        let mut open: Option<OpenRegion> = None;

        for (i, line) in lines.iter().enumerate() {
            match open.take() {
                None => {
                    if let Some(rest) = line.strip_prefix(START_MARKER) {
                        open = Some(OpenRegion {
                            start_line: i,
                            ours_label: rest.trim().to_string(),
                            separator_line: None,
                            ours: Vec::new(),
                            theirs: Vec::new(),
                        });
                    }
                }
                Some(mut region) => match region.separator_line {
                    None => {
                        if line.starts_with(SEPARATOR_MARKER) {
                            region.separator_line = Some(i);
                        } else {
                            region.ours.push(line.clone());
                        }
                        open = Some(region);
                    }
                    Some(separator_line) => {
                        if let Some(rest) = line.strip_prefix(END_MARKER) {
                            regions.push(ConflictRegion {
                                start_line: region.start_line,
                                separator_line,
                                end_line: i,
                                ours_label: region.ours_label,
                                theirs_label: rest.trim().to_string(),
                                ours: region.ours,
                                theirs: region.theirs,
                            });
                        } else {
                            region.theirs.push(line.clone());
                            open = Some(region);
                        }
                    }
                },
            }
        }

        if let Some(region) = open {
            debug!(
                start_line = region.start_line,
                "discarding unterminated conflict region"
            );
        }

        debug!(
            line_count = lines.len(),
            region_count = regions.len(),
            "conflict parse complete"
        );

        ParsedFile { lines, regions }
    }
}
