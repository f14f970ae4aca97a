//! gitresolve core library.
//!
//! This crate provides the merge-conflict resolution engine: parsing of
//! Git-style conflict markers into discrete regions, deterministic side
//! selection, heuristic automatic resolution, whole-file orchestration, and
//! plain-text conflict previews.
//!
//! The engine is deliberately narrow in scope: it processes the file paths
//! it is given and nothing more. Discovering which files are conflicted,
//! staging resolved files, and finalizing or aborting a merge all belong to
//! the caller and its VCS tooling.

pub mod conflict;
pub mod errors;
pub mod preview;

// Re-exports for convenience.
pub use conflict::{
    ConflictParser, ConflictRegion, FileOutcome, FileResolver, HeuristicChain, HeuristicResult,
    ParsedFile, RegionResolver, ResolutionStrategy, ResolveOptions, Side,
};
pub use errors::ResolveError;
