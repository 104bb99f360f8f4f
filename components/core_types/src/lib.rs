//! Core JavaScript value types and call-site location types.
//!
//! This crate provides the foundational types shared by the Corten `dbg`
//! builtin: value representation, call-stack records, resolved source
//! locations and the resolution error taxonomy.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of JavaScript values
//! - [`StackFrame`] - Call-site record as reported by the engine
//! - [`ResolvedLocation`] - File, line and column of a resolved caller
//! - [`ResolveError`] - Why a call site could not be resolved
//!
//! # Examples
//!
//! ```
//! use core_types::{ResolvedLocation, StackFrame, Value};
//!
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! let frame = StackFrame::new(Some("main"), Some("file:///app/main.js"), 3, 7);
//! assert_eq!(frame.line, Some(3));
//!
//! let location = ResolvedLocation::new("main.js", 3, 7);
//! assert_eq!(location.to_string(), "main.js:3:7");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;
mod value;

pub use error::ResolveError;
pub use source::{ParseLocationError, ResolvedLocation, StackFrame};
pub use value::Value;
