//! Automatic resolution heuristics.
//!
//! The [`HeuristicChain`] tries a fixed, ordered sequence of rules against a
//! single conflict region. The first rule that fires determines the result;
//! if none fire, the region is [`HeuristicResult::Unresolvable`] and the
//! caller must fall back to another strategy. The ordering is deliberate:
//! when a region satisfies both the subset rule and the whitespace-only
//! rule, subset wins.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::debug;

use super::parser::ConflictRegion;

/// Outcome of running the heuristic chain against one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicResult {
    /// A heuristic fired; these lines replace the region.
    Resolved(Vec<String>),
    /// No heuristic applies. The region needs another strategy.
    Unresolvable,
}

/// Stateless chain of automatic resolution heuristics.
pub struct HeuristicChain;

impl HeuristicChain {
    /// Try each heuristic in order against `region`.
    ///
    /// 1. Empty side: keep the non-empty side.
    /// 2. Identical sides: keep either.
    /// 3. Subset: keep the superset side.
    /// 4. Whitespace-only difference: keep the side with more characters.
    /// 5. Import/include blocks: union both sides, sorted and deduplicated.
    pub fn resolve_auto(region: &ConflictRegion) -> HeuristicResult {
        let ours = &region.ours;
        let theirs = &region.theirs;

        // 1. One side empty, the other not.
        if ours.is_empty() && !theirs.is_empty() {
            debug!(start_line = region.start_line, "heuristic: ours empty");
            return HeuristicResult::Resolved(theirs.clone());
        }
        if theirs.is_empty() && !ours.is_empty() {
            debug!(start_line = region.start_line, "heuristic: theirs empty");
            return HeuristicResult::Resolved(ours.clone());
        }

        // 2. Identical sides (also covers both sides empty).
        if ours == theirs {
            debug!(start_line = region.start_line, "heuristic: identical sides");
            return HeuristicResult::Resolved(ours.clone());
        }

        // 3. One side a subset of the other: take the superset.
        if is_subset(ours, theirs) {
            debug!(start_line = region.start_line, "heuristic: ours is subset");
            return HeuristicResult::Resolved(theirs.clone());
        }
        if is_subset(theirs, ours) {
            debug!(start_line = region.start_line, "heuristic: theirs is subset");
            return HeuristicResult::Resolved(ours.clone());
        }

        // 4. Whitespace-only difference: prefer the side that preserves more
        // of the original formatting; ties go to ours.
        let ours_trimmed: Vec<&str> = ours.iter().map(|l| l.trim()).collect();
        let theirs_trimmed: Vec<&str> = theirs.iter().map(|l| l.trim()).collect();
        if ours_trimmed == theirs_trimmed {
            debug!(start_line = region.start_line, "heuristic: whitespace only");
            let ours_chars: usize = ours.iter().map(String::len).sum();
            let theirs_chars: usize = theirs.iter().map(String::len).sum();
            let keep = if ours_chars >= theirs_chars { ours } else { theirs };
            return HeuristicResult::Resolved(keep.clone());
        }

        // 5. Both sides are import/include statements: merge them.
        if is_import_block(ours) && is_import_block(theirs) {
            debug!(start_line = region.start_line, "heuristic: import union");
            return HeuristicResult::Resolved(merge_imports(ours, theirs));
        }

        HeuristicResult::Unresolvable
    }
}

/// `a` is a subset of `b` iff it is strictly shorter and its joined, trimmed
/// text occurs as a contiguous substring of `b`'s joined, trimmed text.
fn is_subset(a: &[String], b: &[String]) -> bool {
    if a.len() >= b.len() {
        return false;
    }

    let a_joined = a.join("\n");
    let b_joined = b.join("\n");
    b_joined.trim().contains(a_joined.trim())
}

/// Language-agnostic import/include patterns, matched against trimmed lines.
fn import_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^import\s+",
            r"^from\s+.*\s+import\s+",
            r#"^#include\s*<"#,
            r#"^#include\s*""#,
            r"^require\s*\(",
            r"^const\s+.*\s*=\s*require\s*\(",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("import pattern is valid"))
        .collect()
    })
}

/// A side "is import statements" iff it is non-empty and every non-blank,
/// non-`#`-comment line matches one of the import patterns.
fn is_import_block(lines: &[String]) -> bool {
    if lines.is_empty() {
        return false;
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !import_patterns().iter().any(|p| p.is_match(line)) {
            return false;
        }
    }

    true
}

/// Union the trimmed lines of both sides, deduplicated and sorted.
fn merge_imports(ours: &[String], theirs: &[String]) -> Vec<String> {
    let merged: BTreeSet<String> = ours
        .iter()
        .chain(theirs)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    merged.into_iter().collect()
}
