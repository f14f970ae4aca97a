//! Whole-file conflict resolution.
//!
//! The [`FileResolver`] is the engine's single entry point for callers:
//! read, detect, parse, resolve, reconstruct, write. Each invocation is
//! independent and owns its own line buffer, so processing many conflicted
//! files in parallel is entirely the caller's choice.
//!
//! `Auto` resolution fails closed: one unresolvable region aborts the whole
//! file and nothing is written. The optional backup copy and the main write
//! are two separate filesystem operations; if the process dies between
//! them, the backup exists but the resolved content was not written.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::heuristics::{HeuristicChain, HeuristicResult};
use super::parser::{ConflictParser, ParsedFile};
use super::resolver::{RegionResolver, ResolutionStrategy, Side};
use crate::errors::ResolveError;

/// Suffix appended to the original path for the pre-write backup copy.
pub const BACKUP_SUFFIX: &str = ".conflict_backup";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tri-state outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FileOutcome {
    /// No well-formed conflict regions were present; the file is untouched.
    NoConflicts,
    /// Every region was resolved and the file was rewritten.
    Resolved {
        /// Number of regions replaced.
        regions: usize,
        /// Distinct, non-empty labels seen on the markers, in file order.
        labels: Vec<String>,
    },
    /// `Auto` only: at least one region had no applicable heuristic. The
    /// file is byte-for-byte unmodified.
    Unresolvable,
}

/// Caller-controlled options for [`FileResolver::resolve_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Copy the original file to `<path>.conflict_backup` before writing.
    pub backup: bool,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Stateless whole-file resolver.
pub struct FileResolver;

impl FileResolver {
    /// Resolve every conflict region in the file at `path` with `strategy`.
    ///
    /// Content is decoded as UTF-8 with invalid sequences replaced rather
    /// than failing: conflicted files are expected to be text.
    ///
    /// Returns [`ResolveError::ManualStrategy`] for
    /// [`ResolutionStrategy::Manual`] -- manual resolution is routed to an
    /// external editor by the caller, never through this engine.
    pub fn resolve_file(
        path: &Path,
        strategy: ResolutionStrategy,
        options: &ResolveOptions,
    ) -> Result<FileOutcome, ResolveError> {
        let side = match strategy {
            ResolutionStrategy::Ours => Some(Side::Ours),
            ResolutionStrategy::Theirs => Some(Side::Theirs),
            ResolutionStrategy::Auto => None,
            ResolutionStrategy::Manual => return Err(ResolveError::ManualStrategy),
        };

        info!(path = %path.display(), %strategy, "resolving conflicted file");

        let raw = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResolveError::NotFound(path.display().to_string())
            } else {
                ResolveError::Io(e)
            }
        })?;
        let content = String::from_utf8_lossy(&raw);

        if !ConflictParser::detect(&content) {
            debug!(path = %path.display(), "no conflict markers present");
            return Ok(FileOutcome::NoConflicts);
        }

        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let parsed = ConflictParser::parse(lines);

        // Markers were present but none formed a well-formed region.
        if parsed.regions.is_empty() {
            debug!(path = %path.display(), "markers present but no well-formed regions");
            return Ok(FileOutcome::NoConflicts);
        }

        // Resolve every region before touching the file.
        let mut replacements: Vec<Vec<String>> = Vec::with_capacity(parsed.regions.len());
        for region in &parsed.regions {
            let replacement = match side {
                Some(side) => RegionResolver::resolve_region(region, side).to_vec(),
                None => match HeuristicChain::resolve_auto(region) {
                    HeuristicResult::Resolved(lines) => lines,
                    HeuristicResult::Unresolvable => {
                        info!(
                            path = %path.display(),
                            start_line = region.start_line,
                            "region not auto-resolvable, file left untouched"
                        );
                        return Ok(FileOutcome::Unresolvable);
                    }
                },
            };
            replacements.push(replacement);
        }

        let reconstructed = reconstruct(&parsed, &replacements);

        if options.backup {
            let backup = backup_path(path);
            fs::copy(path, &backup)?;
            debug!(backup = %backup.display(), "backup written");
        }
        fs::write(path, reconstructed.join("\n"))?;

        let regions = parsed.regions.len();
        let labels = collect_labels(&parsed);
        info!(path = %path.display(), regions, "file resolved");

        Ok(FileOutcome::Resolved { regions, labels })
    }
}

/// Splice each region's replacement lines over its original span, keeping
/// all non-region lines in original index order.
fn reconstruct(parsed: &ParsedFile, replacements: &[Vec<String>]) -> Vec<String> {
    let mut out = Vec::with_capacity(parsed.lines.len());
    let mut next = 0;

    for (region, replacement) in parsed.regions.iter().zip(replacements) {
        out.extend_from_slice(&parsed.lines[next..region.start_line]);
        out.extend_from_slice(replacement);
        next = region.end_line + 1;
    }
    out.extend_from_slice(&parsed.lines[next..]);

    out
}

/// Distinct non-empty marker labels, in the order they appear in the file.
fn collect_labels(parsed: &ParsedFile) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for region in &parsed.regions {
        for label in [&region.ours_label, &region.theirs_label] {
            if !label.is_empty() && !labels.iter().any(|l| l == label) {
                labels.push(label.clone());
            }
        }
    }
    labels
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(BACKUP_SUFFIX);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const CONFLICTED: &str = "\
before
<<<<<<< HEAD
A
=======
B
>>>>>>> feature
after";

    #[test]
    fn test_ours_strategy() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", CONFLICTED);

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Ours,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            FileOutcome::Resolved {
                regions: 1,
                labels: vec!["HEAD".into(), "feature".into()],
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "before\nA\nafter");
    }

    #[test]
    fn test_theirs_strategy() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", CONFLICTED);

        FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Theirs,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "before\nB\nafter");
    }

    #[test]
    fn test_no_markers_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", "plain\ncontent\n");

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Auto,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::NoConflicts);
        assert_eq!(fs::read_to_string(&path).unwrap(), "plain\ncontent\n");
    }

    #[test]
    fn test_malformed_markers_is_noop() {
        // All three literals present but never forming a well-formed triple.
        let content = ">>>>>>> stray\n=======\ntext\n<<<<<<< dangling\ntail";
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", content);

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Ours,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::NoConflicts);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_auto_unresolvable_leaves_file_untouched() {
        let content = "\
<<<<<<< HEAD
foo
=======
bar
>>>>>>> feature";
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", content);

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Auto,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Unresolvable);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_auto_fails_closed_across_regions() {
        // First region resolvable (identical sides), second is not. The
        // whole file must stay byte-identical.
        let content = "\
<<<<<<< HEAD
same
=======
same
>>>>>>> feature
middle
<<<<<<< HEAD
foo
=======
bar
>>>>>>> feature";
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", content);

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Auto,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome, FileOutcome::Unresolvable);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_auto_resolves_multiple_regions() {
        let content = "\
top
<<<<<<< HEAD
import os
import sys
=======
import json
import sys
>>>>>>> feature
middle
<<<<<<< HEAD
=======
added
>>>>>>> feature
bottom";
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", content);

        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Auto,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert!(matches!(outcome, FileOutcome::Resolved { regions: 2, .. }));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "top\nimport json\nimport os\nimport sys\nmiddle\nadded\nbottom"
        );
    }

    #[test]
    fn test_backup_written_before_modification() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", CONFLICTED);

        FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Ours,
            &ResolveOptions { backup: true },
        )
        .unwrap();

        let backup = dir.path().join("file.txt.conflict_backup");
        assert_eq!(fs::read_to_string(&backup).unwrap(), CONFLICTED);
        assert_eq!(fs::read_to_string(&path).unwrap(), "before\nA\nafter");
    }

    #[test]
    fn test_no_backup_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", CONFLICTED);

        FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Theirs,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert!(!dir.path().join("file.txt.conflict_backup").exists());
    }

    #[test]
    fn test_manual_strategy_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "file.txt", CONFLICTED);

        let result = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Manual,
            &ResolveOptions::default(),
        );

        assert!(matches!(result, Err(ResolveError::ManualStrategy)));
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFLICTED);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");

        let result = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Ours,
            &ResolveOptions::default(),
        );

        assert!(matches!(result, Err(ResolveError::NotFound(_))));
    }

    #[test]
    fn test_invalid_utf8_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"<<<<<<< HEAD\n");
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"A\n=======\n");
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"A\n>>>>>>> feature");
        fs::write(&path, &bytes).unwrap();

        // Both sides decode to the same replacement-character line, so the
        // identical-sides heuristic fires instead of erroring on decode.
        let outcome = FileResolver::resolve_file(
            &path,
            ResolutionStrategy::Auto,
            &ResolveOptions::default(),
        )
        .unwrap();

        assert!(matches!(outcome, FileOutcome::Resolved { regions: 1, .. }));
    }
}
