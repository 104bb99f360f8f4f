//! Built-in objects used by the Corten `dbg` builtin
//!
//! This crate provides the host-side pieces of the standard library that
//! debug printing relies on:
//! - `util.inspect` (the [`Inspect`] trait)
//! - Console object (the diagnostic stream)
//! - Error objects and their engine-specific `stack` text
//!
//! # Example
//!
//! ```
//! use builtins::{ErrorConstructor, Inspect, StackTraceStyle};
//! use core_types::{StackFrame, Value};
//!
//! let arr = Value::Array(vec![Value::Smi(1), Value::String("two".into())]);
//! assert_eq!(arr.inspect(), "[ 1, 'two' ]");
//!
//! let mut error = ErrorConstructor::construct(None);
//! error.capture_stack_trace(vec![StackFrame::new(Some("main"), Some("main.js"), 1, 5)]);
//! assert_eq!(error.stack(StackTraceStyle::V8), "Error\n    at main (main.js:1:5)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod error;
pub mod util;

// Re-export main types for convenience
pub use console::{ConsoleObject, ConsoleStream, ConsoleWriter};
pub use error::{ErrorConstructor, JsErrorObject, StackTraceStyle};
pub use util::{inspect, Inspect};
