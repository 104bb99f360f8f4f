//! Call-site resolution errors.
//!
//! None of these ever reach a script: the `dbg` builtin absorbs every
//! variant and degrades its output instead.

use thiserror::Error;

/// Why a caller location could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The caller frame is missing (stack shorter than the caller offset)
    /// or carries no script identifier.
    #[error("no caller frame at index {index}")]
    UnresolvedFrame {
        /// Index that was looked up in the raw frame source
        index: usize,
    },

    /// The caller's stack line matched none of the known engine formats.
    #[error("unrecognised stack line: {line:?}")]
    UnmatchedStackFormat {
        /// The stack line as captured
        line: String,
    },

    /// A file reference could not be made relative to the reference base.
    #[error("cannot resolve path {file:?}: {reason}")]
    PathResolution {
        /// The raw file reference
        file: String,
        /// What went wrong
        reason: String,
    },

    /// The host failed to provide stack information it claimed to support.
    #[error("host failure: {0}")]
    HostFailure(String),
}

impl ResolveError {
    /// Returns true if this failure degrades to the name-only output rather
    /// than the `[dbg error]` output.
    pub fn is_absorbed(&self) -> bool {
        !matches!(self, ResolveError::HostFailure(_))
    }
}
