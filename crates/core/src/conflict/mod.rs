//! Conflict parsing, heuristic resolution, and whole-file orchestration.
//!
//! The conflict subsystem is responsible for:
//! 1. **Parsing** -- extracting `<<<<<<<` / `=======` / `>>>>>>>` regions
//!    from a file's lines.
//! 2. **Resolution** -- choosing replacement lines for each region, either
//!    deterministically by side or automatically via the heuristic chain.
//! 3. **Orchestration** -- reading a file, resolving every region, and
//!    writing the reconstructed content back (fail-closed for `Auto`).

pub mod file_resolver;
pub mod heuristics;
pub mod parser;
pub mod resolver;

pub use file_resolver::{FileOutcome, FileResolver, ResolveOptions, BACKUP_SUFFIX};
pub use heuristics::{HeuristicChain, HeuristicResult};
pub use parser::{ConflictParser, ConflictRegion, ParsedFile};
pub use resolver::{RegionResolver, ResolutionStrategy, Side};
