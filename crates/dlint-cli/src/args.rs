use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default suffix of ESTree files produced by the parser step.
pub const DEFAULT_AST_EXTENSION: &str = ".ast.json";

/// CLI arguments for the dlint binary.
#[derive(Parser, Debug)]
#[command(
    name = "dlint",
    version,
    about = "Lint ESTree syntax trees with the desktop rule plugin"
)]
pub struct CliArgs {
    // ==================== Configuration ====================
    /// Path to a .dlintrc.json file. Defaults to the nearest one above the
    /// working directory.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Override a rule's severity, e.g. `promise-must-complete=warn`.
    /// May be given more than once.
    #[arg(long = "rule", value_name = "NAME=SEVERITY")]
    pub rules: Vec<String>,

    // ==================== Input ====================
    /// Suffix that marks ESTree JSON files when walking directories.
    #[arg(long = "ast-ext", default_value = DEFAULT_AST_EXTENSION)]
    pub ast_ext: String,

    /// Skip files matching this glob. May be given more than once.
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    // ==================== Output ====================
    /// Output format for diagnostics.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Fail when more than this many warnings are reported.
    #[arg(long = "max-warnings", value_name = "N")]
    pub max_warnings: Option<usize>,

    /// Print the available rules and exit.
    #[arg(long = "list-rules")]
    pub list_rules: bool,

    /// AST files or directories to lint.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `file:line:col - severity rule: message` with a source snippet
    Pretty,
    /// One `file:line:col: severity [rule] message` line per diagnostic
    Compact,
    /// Machine-readable JSON document
    Json,
}
