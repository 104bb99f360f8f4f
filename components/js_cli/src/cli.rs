//! Command line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The kind of host to emulate while resolving the stack dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HostKind {
    /// Node with `util.getCallSites`
    #[default]
    Node,
    /// Node with only `util.getCallSite`
    LegacyNode,
    /// Deno (V8 stack text)
    Deno,
    /// Bun (JavaScriptCore stack text)
    Bun,
    /// A browser page
    Browser,
}

/// Print a value with the location of its caller, given a stack dump on stdin
#[derive(Debug, Parser)]
#[command(name = "corten-dbg", version, about)]
pub struct Cli {
    /// Host to emulate
    #[arg(long, value_enum, default_value_t = HostKind::Node)]
    pub host: HostKind,

    /// Name shown before the value
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory paths are shown relative to (defaults to the working directory)
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Value passed to dbg; echoed on stdout
    #[arg(allow_negative_numbers = true)]
    pub value: String,
}

impl Cli {
    /// Arguments for a single value with every option at its default
    pub fn with_value(value: impl Into<String>) -> Self {
        Cli {
            host: HostKind::default(),
            name: None,
            base: None,
            value: value.into(),
        }
    }
}
