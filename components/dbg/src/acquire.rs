//! Capturing the raw call stack.
//!
//! Whatever the strategy, the returned source starts with the frame of
//! `dbg` itself, so the caller always sits at [`CALLER_INDEX`]. For V8
//! stack text that means dropping the `Error` header line first; with the
//! header counted, the caller is line 2 of the raw text.

use core_types::{ResolveError, StackFrame};

use crate::host::Host;
use crate::probe::EnvironmentKind;

/// Position of the caller's frame: index 0 is `dbg`, index 1 its caller.
/// Every builtin frame pushed between the script and the capture point
/// shifts this, so it has to move with the call path into `dbg`.
pub const CALLER_INDEX: usize = 1;

/// `toString()` of the message-less `Error` created for stack capture
const SYNTHETIC_ERROR_HEADER: &str = "Error";

/// The call stack in whatever shape the host produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFrameSource {
    /// Structured call sites, innermost first
    CallSites(Vec<StackFrame>),
    /// `Error.prototype.stack` text with the header line removed
    StackText(String),
}

/// Capture the call stack using the strategy that fits `kind`.
pub fn acquire<H: Host + ?Sized>(
    host: &H,
    kind: EnvironmentKind,
) -> Result<RawFrameSource, ResolveError> {
    match kind {
        EnvironmentKind::CallSiteCapable(api) => host.get_call_sites(api).map(RawFrameSource::CallSites),
        EnvironmentKind::ServerStackOnly | EnvironmentKind::BrowserLike => {
            let stack = host
                .capture_error_stack()?
                .ok_or(ResolveError::UnresolvedFrame { index: CALLER_INDEX })?;
            Ok(RawFrameSource::StackText(strip_header(stack)))
        }
    }
}

fn strip_header(stack: String) -> String {
    match stack.split_once('\n') {
        Some((first, rest)) if first.trim_end() == SYNTHETIC_ERROR_HEADER => rest.to_string(),
        None if stack.trim_end() == SYNTHETIC_ERROR_HEADER => String::new(),
        _ => stack,
    }
}
