//! JavaScript Error objects and `Error.prototype.stack`
//!
//! Engines disagree on the text of `stack`. This module renders a captured
//! call stack in the layout of the engine a realm emulates:
//! - V8 (Node, Deno, Chrome): `Error` header, then `    at fn (url:line:col)`
//! - SpiderMonkey (Firefox): no header, `fn@url:line:col`
//! - JavaScriptCore (Safari, Bun): no header, `fn@url:line:col`, anonymous
//!   frames as bare `url:line:col`

use core_types::StackFrame;
use std::fmt;

/// Default `Error.stackTraceLimit`
pub const DEFAULT_STACK_TRACE_LIMIT: usize = 10;

/// Which engine's `stack` text layout to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackTraceStyle {
    /// V8 layout with a message header line
    #[default]
    V8,
    /// SpiderMonkey layout
    SpiderMonkey,
    /// JavaScriptCore layout
    JavaScriptCore,
}

impl StackTraceStyle {
    /// Returns true if the stack text starts with the error's header line
    pub fn has_header(&self) -> bool {
        matches!(self, StackTraceStyle::V8)
    }

    /// Render a single frame line
    pub fn format_frame(&self, frame: &StackFrame) -> String {
        let position = match (&frame.source_url, frame.line, frame.column) {
            (Some(url), Some(line), Some(column)) => format!("{}:{}:{}", url, line, column),
            (Some(url), _, _) => url.clone(),
            (None, _, _) => match self {
                StackTraceStyle::V8 => "native".to_string(),
                _ => "[native code]".to_string(),
            },
        };

        match (self, frame.function_name.as_deref()) {
            (StackTraceStyle::V8, Some(name)) => format!("    at {} ({})", name, position),
            (StackTraceStyle::V8, None) => format!("    at {}", position),
            (StackTraceStyle::SpiderMonkey, name) => format!("{}@{}", name.unwrap_or(""), position),
            (StackTraceStyle::JavaScriptCore, Some(name)) => format!("{}@{}", name, position),
            (StackTraceStyle::JavaScriptCore, None) => position,
        }
    }
}

/// JavaScript Error object representation
#[derive(Debug, Clone)]
pub struct JsErrorObject {
    /// Error name (`Error`, `TypeError`, or a custom name)
    name: String,
    /// Error message
    message: String,
    /// Stack frames, innermost first
    stack_frames: Vec<StackFrame>,
    /// Stack trace limit (default 10)
    stack_trace_limit: usize,
}

impl JsErrorObject {
    /// Create a new error object
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        JsErrorObject {
            name: name.into(),
            message: message.into(),
            stack_frames: Vec::new(),
            stack_trace_limit: DEFAULT_STACK_TRACE_LIMIT,
        }
    }

    /// Get the error name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Set Error.stackTraceLimit for this error
    pub fn set_stack_trace_limit(&mut self, limit: usize) {
        self.stack_trace_limit = limit;
    }

    /// Capture stack trace from provided frames (innermost first)
    pub fn capture_stack_trace(&mut self, frames: Vec<StackFrame>) {
        self.stack_frames = frames;
    }

    /// Captured frames, innermost first
    pub fn frames(&self) -> &[StackFrame] {
        &self.stack_frames
    }

    /// Get the stack trace as a formatted string
    pub fn stack(&self, style: StackTraceStyle) -> String {
        let mut lines = Vec::new();
        if style.has_header() {
            lines.push(self.to_string());
        }

        lines.extend(
            self.stack_frames
                .iter()
                .take(self.stack_trace_limit)
                .map(|frame| style.format_frame(frame)),
        );

        lines.join("\n")
    }
}

impl fmt::Display for JsErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

/// Error constructor functions matching JavaScript Error API
pub struct ErrorConstructor;

impl ErrorConstructor {
    /// Construct a base Error
    pub fn construct(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new("Error", message.unwrap_or_default())
    }
}
