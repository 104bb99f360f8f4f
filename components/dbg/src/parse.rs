//! Picking the caller's frame out of a raw call stack.
//!
//! Structured call sites are read field by field. Stack text has no
//! standard grammar, so the caller's line is tried against an ordered table
//! of per-engine formats and the first one yielding a full
//! `file:line:column` triple wins. An engine that changes its layout lands
//! in [`ResolveError::UnmatchedStackFormat`], never in a panic.

use std::sync::OnceLock;

use core_types::{ResolveError, ResolvedLocation};
use regex::{Captures, Regex};

use crate::acquire::{RawFrameSource, CALLER_INDEX};

/// One engine's stack line grammar, with `file`, `line` and `column`
/// capture groups.
struct StackLineFormat {
    engine: &'static str,
    pattern: Regex,
}

const FORMATS: [(&str, &str); 4] = [
    // V8: `at fn (file:line:col)`, also `at async fn (...)`, `at new C (...)`
    (
        "v8",
        r"^at .*?\((?P<file>.+):(?P<line>\d+):(?P<column>\d+)\)$",
    ),
    // V8 anonymous: `at file:line:col`
    ("v8-anonymous", r"^at (?P<file>.+):(?P<line>\d+):(?P<column>\d+)$"),
    // SpiderMonkey and JavaScriptCore: `fn@file:line:col`
    (
        "spidermonkey",
        r"^[^@]*@(?P<file>.+):(?P<line>\d+):(?P<column>\d+)$",
    ),
    // JavaScriptCore anonymous: `file:line:col`
    ("bare", r"^(?P<file>.+):(?P<line>\d+):(?P<column>\d+)$"),
];

fn formats() -> &'static [StackLineFormat] {
    static COMPILED: OnceLock<Vec<StackLineFormat>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        FORMATS
            .iter()
            .map(|&(engine, pattern)| StackLineFormat {
                engine,
                pattern: Regex::new(pattern).expect("stack line formats are valid regexes"),
            })
            .collect()
    })
}

/// Extract the caller's location from a raw frame source.
///
/// Structured frames may resolve partially: a frame that names its script
/// but lacks a coordinate yields a file-only location.
pub fn parse(source: &RawFrameSource) -> Result<ResolvedLocation, ResolveError> {
    let missing = ResolveError::UnresolvedFrame { index: CALLER_INDEX };

    match source {
        RawFrameSource::CallSites(frames) => {
            let frame = frames.get(CALLER_INDEX).ok_or(missing.clone())?;
            let file = frame
                .source_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or(missing)?;

            Ok(ResolvedLocation {
                file: file.to_string(),
                line: frame.line,
                column: frame.column,
            })
        }
        RawFrameSource::StackText(text) => {
            let line = text.lines().nth(CALLER_INDEX).ok_or(missing)?;
            parse_stack_line(line).ok_or_else(|| ResolveError::UnmatchedStackFormat {
                line: line.to_string(),
            })
        }
    }
}

/// Parse one stack line in any known engine format.
///
/// ```
/// use dbg::parse::parse_stack_line;
///
/// let location = parse_stack_line("    at main (file:///app/main.js:30:22)").unwrap();
/// assert_eq!(location.to_string(), "file:///app/main.js:30:22");
///
/// assert!(parse_stack_line("    at native").is_none());
/// ```
pub fn parse_stack_line(line: &str) -> Option<ResolvedLocation> {
    let line = line.trim();
    formats().iter().find_map(|format| {
        let captures = format.pattern.captures(line)?;
        let location = extract(&captures);
        if location.is_none() {
            log::debug!("dbg: {} format matched {:?} with unusable coordinates", format.engine, line);
        }
        location
    })
}

/// Coordinates that do not fit a `u32` make the format a non-match.
fn extract(captures: &Captures<'_>) -> Option<ResolvedLocation> {
    let file = captures.name("file")?.as_str();
    let line = captures.name("line")?.as_str().parse().ok()?;
    let column = captures.name("column")?.as_str().parse().ok()?;
    Some(ResolvedLocation::new(file, line, column))
}
