//! Deterministic side selection.
//!
//! The [`RegionResolver`] handles the two strategies that always succeed:
//! keep "ours" or keep "theirs" for every region in the file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::ConflictRegion;

/// The caller's choice of how to resolve all regions in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Keep the current-branch side of every region.
    Ours,
    /// Keep the incoming side of every region.
    Theirs,
    /// Hand the file to an external editor. Not processed by this engine.
    Manual,
    /// Try the heuristic chain; fails closed for the whole file.
    Auto,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ours => write!(f, "ours"),
            Self::Theirs => write!(f, "theirs"),
            Self::Manual => write!(f, "manual"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ours" => Ok(Self::Ours),
            "theirs" => Ok(Self::Theirs),
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown strategy '{other}': use 'ours', 'theirs', 'manual', or 'auto'"
            )),
        }
    }
}

/// One side of a conflict region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Ours,
    Theirs,
}

/// Stateless region resolver for the deterministic strategies.
pub struct RegionResolver;

impl RegionResolver {
    /// Return the lines of the chosen side, verbatim.
    pub fn resolve_region(region: &ConflictRegion, side: Side) -> &[String] {
        match side {
            Side::Ours => &region.ours,
            Side::Theirs => &region.theirs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> ConflictRegion {
        ConflictRegion {
            start_line: 0,
            separator_line: 2,
            end_line: 4,
            ours_label: "HEAD".into(),
            theirs_label: "feature".into(),
            ours: vec!["  ours line  ".into()],
            theirs: vec!["theirs line".into()],
        }
    }

    #[test]
    fn test_resolve_region_sides() {
        let r = region();
        // Verbatim: no trimming, no transformation.
        assert_eq!(
            RegionResolver::resolve_region(&r, Side::Ours),
            ["  ours line  "]
        );
        assert_eq!(
            RegionResolver::resolve_region(&r, Side::Theirs),
            ["theirs line"]
        );
    }

    #[test]
    fn test_strategy_round_trip() {
        for s in ["ours", "theirs", "manual", "auto"] {
            let strategy: ResolutionStrategy = s.parse().unwrap();
            assert_eq!(strategy.to_string(), s);
        }
        assert!("merge".parse::<ResolutionStrategy>().is_err());
    }
}
