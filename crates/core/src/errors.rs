//! Error types for the gitresolve core library.
//!
//! The engine reports only genuine faults as errors. An `Auto` resolution
//! that cannot be completed is a normal outcome
//! ([`FileOutcome::Unresolvable`](crate::conflict::FileOutcome::Unresolvable)),
//! and malformed conflict markers never surface at all -- the parser
//! silently degrades to fewer detected regions.

use thiserror::Error;

/// Errors from resolving a conflicted file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target path does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Read, write, or backup-copy failure. The target file is left
    /// unmodified: reconstruction is built fully in memory before any
    /// write begins.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `Manual` strategy was requested. Manual resolution means handing
    /// the file to an external editor, which is outside this engine.
    #[error("manual resolution is handled by an external editor, not the engine")]
    ManualStrategy,
}
