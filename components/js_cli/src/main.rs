//! Corten dbg CLI
//!
//! Entry point for `corten-dbg`. Parses CLI arguments, loads the stack dump
//! from stdin and delegates to the Runtime.

use clap::Parser as ClapParser;
use js_cli::{Cli, Runtime};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut runtime = Runtime::from_cli(&cli);

    if let Err(e) = runtime.load_stack_from(std::io::stdin().lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    runtime.run(&cli.value);
    println!("{}", cli.value);
}
