#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use dlint_cli::args::CliArgs;
use dlint_cli::driver::{self, EXIT_FATAL};

fn main() -> ExitCode {
    // Initialize tracing if DLINT_LOG or RUST_LOG is set.
    // DLINT_LOG_FORMAT=tree|json|text picks the output format.
    dlint_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    match run(&args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_FATAL as u8)
        }
    }
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let outcome = driver::run(args, &cwd)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }
    Ok(outcome.exit_code)
}
