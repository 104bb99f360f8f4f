//! Call-site records and resolved source locations.
//!
//! [`StackFrame`] is what an engine reports for one frame of its call stack.
//! [`ResolvedLocation`] is the display-ready location of a caller after the
//! `dbg` builtin has picked the right frame and normalized its path.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Represents a single frame in a JavaScript call stack.
///
/// This is the record a structured call-site API (`util.getCallSites`)
/// hands out. Line and column are 1-based; engines that cannot report a
/// coordinate leave it as `None`.
///
/// # Examples
///
/// ```
/// use core_types::StackFrame;
///
/// let frame = StackFrame {
///     function_name: Some("myFunction".to_string()),
///     source_url: Some("file:///main.js".to_string()),
///     line: Some(25),
///     column: Some(10),
/// };
///
/// assert_eq!(frame.function_name, Some("myFunction".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Name of the function, or None for anonymous functions
    pub function_name: Option<String>,
    /// URL or file path of the script, or None for native frames
    pub source_url: Option<String>,
    /// Line number where the call occurred
    pub line: Option<u32>,
    /// Column number where the call occurred
    pub column: Option<u32>,
}

impl StackFrame {
    /// Create a frame for script code at a known position.
    pub fn new(function_name: Option<&str>, source_url: Option<&str>, line: u32, column: u32) -> Self {
        StackFrame {
            function_name: function_name.map(str::to_string),
            source_url: source_url.map(str::to_string),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a frame for a native builtin, which has no script position.
    pub fn native(function_name: &str) -> Self {
        StackFrame {
            function_name: Some(function_name.to_string()),
            source_url: None,
            line: None,
            column: None,
        }
    }

    /// Returns true if the frame belongs to native code.
    pub fn is_native(&self) -> bool {
        self.source_url.is_none()
    }
}

/// The resolved location of a caller.
///
/// `file` is always present; a caller without a file is represented by the
/// absence of a `ResolvedLocation` altogether. Coordinates may still be
/// unresolved when the engine only reported the script.
///
/// The [`Display`](fmt::Display) form is `file:line:column`, or just `file`
/// when either coordinate is missing, and it parses back losslessly:
///
/// ```
/// use core_types::ResolvedLocation;
///
/// let location = ResolvedLocation::new("src/app.ts", 30, 22);
/// let parsed: ResolvedLocation = location.to_string().parse().unwrap();
/// assert_eq!(parsed, location);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Display form of the file
    pub file: String,
    /// Line number, if resolved
    pub line: Option<u32>,
    /// Column number, if resolved
    pub column: Option<u32>,
}

impl ResolvedLocation {
    /// Create a fully resolved location.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        ResolvedLocation {
            file: file.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a location where only the file is known.
    pub fn file_only(file: impl Into<String>) -> Self {
        ResolvedLocation {
            file: file.into(),
            line: None,
            column: None,
        }
    }

    /// Both coordinates, if both were resolved.
    pub fn coordinates(&self) -> Option<(u32, u32)> {
        self.line.zip(self.column)
    }

    /// Returns true if file, line and column are all known.
    pub fn is_complete(&self) -> bool {
        self.coordinates().is_some()
    }

    /// Replace the file while keeping the coordinates.
    pub fn with_file(self, file: impl Into<String>) -> Self {
        ResolvedLocation {
            file: file.into(),
            ..self
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coordinates() {
            Some((line, column)) => write!(f, "{}:{}:{}", self.file, line, column),
            None => write!(f, "{}", self.file),
        }
    }
}

/// Error returned when a location string is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("empty location")]
pub struct ParseLocationError;

impl FromStr for ResolvedLocation {
    type Err = ParseLocationError;

    // Split at the last two colons only, so `file:` URLs and drive letters
    // stay inside the file part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseLocationError);
        }

        if let Some((rest, column)) = s.rsplit_once(':') {
            if let Some((file, line)) = rest.rsplit_once(':') {
                if let (false, Ok(line), Ok(column)) =
                    (file.is_empty(), line.parse::<u32>(), column.parse::<u32>())
                {
                    return Ok(ResolvedLocation::new(file, line, column));
                }
            }
        }

        Ok(ResolvedLocation::file_only(s))
    }
}
