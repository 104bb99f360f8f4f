//! Runtime orchestration for the `corten-dbg` command
//!
//! The Runtime rebuilds a realm from a stack dump:
//! - the `--host` preset decides globals and stack text style
//! - each parseable dump line becomes a script frame
//! - the value goes through the realm's `dbg` builtin, which writes to the
//!   realm console

use crate::cli::{Cli, HostKind};
use crate::error::CliResult;
use builtins::{ConsoleObject, StackTraceStyle};
use core_types::{StackFrame, Value};
use dbg::parse::parse_stack_line;
use dbg::{DbgOptions, Realm};
use std::io::Read;
use std::path::PathBuf;

/// Runs `dbg` inside an emulated realm
pub struct Runtime {
    realm: Realm,
    options: DbgOptions,
}

impl Runtime {
    /// Create a runtime emulating the given host
    ///
    /// # Example
    /// ```
    /// use js_cli::{HostKind, Runtime};
    ///
    /// let runtime = Runtime::new(HostKind::Deno);
    /// ```
    pub fn new(host: HostKind) -> Self {
        let realm = match host {
            HostKind::Node => Realm::node(),
            HostKind::LegacyNode => Realm::legacy_node(),
            HostKind::Deno => Realm::deno(),
            HostKind::Bun => Realm::bun(),
            HostKind::Browser => Realm::browser(StackTraceStyle::V8),
        };

        Self {
            realm,
            options: DbgOptions::default(),
        }
    }

    /// Create a runtime configured from command line arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let mut runtime = Self::new(cli.host);
        if let Some(name) = &cli.name {
            runtime = runtime.with_name(name);
        }
        if let Some(base) = &cli.base {
            runtime = runtime.with_base(base.clone());
        }
        runtime
    }

    /// Set the display name
    pub fn with_name(mut self, name: &str) -> Self {
        self.options = DbgOptions::named(name);
        self
    }

    /// Set the directory paths are shown relative to
    pub fn with_base(mut self, base: PathBuf) -> Self {
        self.realm = self.realm.with_cwd(Some(base));
        self
    }

    /// Send diagnostics to the given console instead of stderr
    pub fn with_console(mut self, console: ConsoleObject) -> Self {
        self.realm = self.realm.with_console(console);
        self
    }

    /// Load a stack dump, innermost frame first, as the script's call stack
    ///
    /// Lines in no known format (headers, native frames) are skipped.
    /// Returns the number of frames loaded.
    pub fn load_stack(&mut self, dump: &str) -> usize {
        let frames: Vec<StackFrame> = dump
            .lines()
            .filter_map(|line| {
                let location = parse_stack_line(line);
                if location.is_none() && !line.trim().is_empty() {
                    log::debug!("corten-dbg: skipping stack line {:?}", line);
                }
                location
            })
            .map(|location| StackFrame {
                function_name: None,
                source_url: Some(location.file),
                line: location.line,
                column: location.column,
            })
            .collect();

        for frame in frames.iter().rev() {
            self.realm.push_frame(frame.clone());
        }
        frames.len()
    }

    /// Read a stack dump from a reader
    pub fn load_stack_from(&mut self, mut reader: impl Read) -> CliResult<usize> {
        let mut dump = String::new();
        reader.read_to_string(&mut dump)?;
        Ok(self.load_stack(&dump))
    }

    /// Call `dbg` on a command line value and return what it returned
    pub fn run(&self, value: &str) -> Value {
        self.realm.call_dbg(parse_value(value), &self.options)
    }

    /// The emulated realm
    pub fn realm(&self) -> &Realm {
        &self.realm
    }
}

/// Interpret a command line argument as a JavaScript literal.
///
/// `true`, `false`, `null`, `undefined` and numbers keep their type;
/// everything else is a string.
pub fn parse_value(text: &str) -> Value {
    match text {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "null" => Value::Null,
        "undefined" => Value::Undefined,
        _ => match text.parse::<i32>() {
            // `-0` is not a small integer
            Ok(n) if !(n == 0 && text.starts_with('-')) => Value::Smi(n),
            _ => match text.parse::<f64>() {
                Ok(n) => Value::Double(n),
                Err(_) => Value::String(text.to_string()),
            },
        },
    }
}
