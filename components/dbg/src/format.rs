//! Building the `dbg` output line.

use core_types::ResolvedLocation;

/// Display name used when the script does not pass one
pub const DEFAULT_NAME: &str = "var";

/// `[file:line:column] name = `, `[file] name = ` when coordinates are
/// missing, or `name = ` with no location at all.
pub fn format_prefix(location: Option<&ResolvedLocation>, name: &str) -> String {
    match location {
        Some(location) => format!("[{}] {} = ", location, name),
        None => format!("{} = ", name),
    }
}

/// The line written when resolution failed unexpectedly.
pub fn format_error(name: &str, rendered: &str) -> String {
    format!("[dbg error] {} = {}", name, rendered)
}
