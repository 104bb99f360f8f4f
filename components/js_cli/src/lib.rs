//! Corten dbg CLI Library
//!
//! Provides the Runtime struct and supporting modules for the `corten-dbg`
//! command, which resolves a captured stack dump the way the `dbg` builtin
//! would.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runtime;

pub use cli::{Cli, HostKind};
pub use error::{CliError, CliResult};
pub use runtime::Runtime;
