//! The `dbg` builtin.
//!
//! `dbg(value)` writes the value, prefixed with the location of the call,
//! to the host's diagnostic stream and returns the value untouched, so it
//! can wrap any sub-expression:
//!
//! ```text
//! const value = fn2(dbg(fn1()));
//! // stderr: [src/main.ts:3:19] var = 4
//! ```
//!
//! Resolving "the location of the call" is the only hard part and is split
//! into stages, each in its own module:
//!
//! 1. [`probe`] - which kind of host is this?
//! 2. [`acquire`] - capture the call stack the way that host allows
//! 3. [`parse`] - pick the caller's frame and read file, line and column
//! 4. [`normalize`] - shorten the file for display
//! 5. [`format`] - assemble the output line
//!
//! Any stage may give up. The output then degrades to `name = value` (or
//! `[dbg error] name = value` for host failures) and the value is still
//! returned; `dbg` never fails.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use builtins::ConsoleObject;
//! use core_types::{StackFrame, Value};
//! use dbg::{DbgOptions, Realm};
//!
//! let output = Rc::new(RefCell::new(Vec::new()));
//! let realm = Realm::node()
//!     .with_cwd(Some("/home/me/app".into()))
//!     .with_console(ConsoleObject::new_with_output(output.clone()));
//!
//! realm.push_frame(StackFrame::new(Some("main"), Some("/home/me/app/script.ts"), 30, 22));
//! let value = realm.call_dbg(Value::Smi(4), &DbgOptions::default());
//!
//! assert_eq!(value, Value::Smi(4));
//! if cfg!(unix) {
//!     assert_eq!(output.borrow()[0], "[script.ts:30:22] var = 4");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod acquire;
pub mod format;
pub mod host;
pub mod normalize;
pub mod parse;
pub mod probe;

pub use builtins::Inspect;
pub use core_types::{ResolveError, ResolvedLocation};
pub use host::{Host, Realm};
pub use probe::{CallSiteApi, EnvironmentKind};

use crate::acquire::acquire;
use crate::format::{format_error, format_prefix, DEFAULT_NAME};
use crate::normalize::{normalize, ReferenceBase};

/// Options a script can pass as the second argument of `dbg`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbgOptions {
    /// Name shown before ` = `; defaults to `var`
    pub name: Option<String>,
}

impl DbgOptions {
    /// Options with an explicit display name
    pub fn named(name: impl Into<String>) -> Self {
        DbgOptions {
            name: Some(name.into()),
        }
    }

    /// The display name in effect
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }
}

/// Print `value` with its caller's location to the host's diagnostic
/// stream and return it unchanged.
pub fn dbg<H: Host + ?Sized, T: Inspect>(host: &H, value: T, options: &DbgOptions) -> T {
    let name = options.name();
    let rendered = value.inspect();

    let line = match resolve_location(host) {
        Ok(location) => format!("{}{}", format_prefix(location.as_ref(), name), rendered),
        Err(err) => {
            log::debug!("dbg: call site resolution failed: {}", err);
            format_error(name, &rendered)
        }
    };

    host.warn(&line);
    value
}

/// [`dbg`] with a display name.
pub fn dbg_named<H: Host + ?Sized, T: Inspect>(host: &H, value: T, name: &str) -> T {
    dbg(host, value, &DbgOptions::named(name))
}

/// Resolve the location of the script that called `dbg`.
///
/// `Ok(None)` means resolution gave up in an expected way (missing frame,
/// unknown stack format). `Err` is reserved for host failures.
pub fn resolve_location<H: Host + ?Sized>(host: &H) -> Result<Option<ResolvedLocation>, ResolveError> {
    let kind = probe::detect(host);

    let Some(source) = absorb(acquire(host, kind))? else {
        return Ok(None);
    };
    let Some(location) = absorb(parse::parse(&source))? else {
        return Ok(None);
    };

    let base = host.cwd().map(ReferenceBase::working_dir);
    let file = normalize(&location.file, kind, base.as_ref());
    Ok(Some(location.with_file(file)))
}

fn absorb<T>(result: Result<T, ResolveError>) -> Result<Option<T>, ResolveError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_absorbed() => {
            log::debug!("dbg: degrading to name-only output: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
