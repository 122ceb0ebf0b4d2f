//! File discovery and the lint run behind the `dlint` binary.

use anyhow::{Context, Result, bail};
use dlint_common::Diagnostic;
use dlint_rules::{Linter, RuleRegistry};
use dlint_syntax::Program;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::{self, LintConfig};
use crate::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
/// Errors were reported, or more warnings than `--max-warnings` allows.
pub const EXIT_LINT_FAILURE: i32 = 1;
/// Usage, config or IO failure.
pub const EXIT_FATAL: i32 = 2;

/// A successfully linted file.
#[derive(Debug)]
pub struct LintedFile {
    pub ast_path: PathBuf,
    /// Sibling source text, when it exists.
    pub source: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A file that could not be read or loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct LintRun {
    pub files: Vec<LintedFile>,
    pub failures: Vec<LoadFailure>,
}

impl LintRun {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.severity.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| d.severity.is_warning()).count()
    }

    pub fn exit_code(&self, max_warnings: Option<usize>) -> i32 {
        if !self.failures.is_empty() {
            return EXIT_FATAL;
        }
        if self.error_count() > 0 {
            return EXIT_LINT_FAILURE;
        }
        match max_warnings {
            Some(max) if self.warning_count() > max => EXIT_LINT_FAILURE,
            _ => EXIT_SUCCESS,
        }
    }
}

/// Rendered output plus the process exit code.
#[derive(Debug)]
pub struct CliOutcome {
    pub output: String,
    pub exit_code: i32,
}

/// Run the CLI against `cwd`: resolve config, lint, render.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<CliOutcome> {
    let registry = RuleRegistry::builtin();
    let reporter = Reporter::new(!args.no_color, args.format);

    if args.list_rules {
        return Ok(CliOutcome {
            output: reporter.render_rule_list(registry),
            exit_code: EXIT_SUCCESS,
        });
    }

    if args.paths.is_empty() {
        bail!("no input paths given");
    }

    let config = load_lint_config(args.config.as_deref(), cwd)?;
    let rules = config::resolve_rules(config.as_ref(), &args.rules, registry)?;
    let linter = Linter::new(rules);

    let ignore = build_ignore_set(&args.ignore)?;
    let roots: Vec<PathBuf> = args.paths.iter().map(|p| cwd.join(p)).collect();
    let files = discover_files(&roots, &args.ast_ext, &ignore)?;
    debug!(files = files.len(), rules = linter.rules().len(), "starting lint");

    let run = lint_files(&linter, &files, &args.ast_ext);
    Ok(CliOutcome {
        output: reporter.render(&run),
        exit_code: run.exit_code(args.max_warnings),
    })
}

/// The explicit `--config`, else the nearest `.dlintrc.json`, else none.
pub fn load_lint_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<LintConfig>> {
    let path = match explicit {
        Some(path) => Some(cwd.join(path)),
        None => config::find_config(cwd),
    };
    let Some(path) = path else {
        return Ok(None);
    };
    debug!(path = %path.display(), "loading config");
    let config = config::load_config(&path)?;
    Ok(Some(config))
}

pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid --ignore glob '{}'", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Expand `roots` into the AST files to lint, sorted and deduplicated.
///
/// Explicit file arguments are taken as-is; directories are walked for
/// files ending in `ast_ext`. Ignore globs apply to both.
pub fn discover_files(roots: &[PathBuf], ast_ext: &str, ignore: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            if !ignore.is_match(root) {
                files.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            bail!("path not found: {}", root.display());
        }

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || ignore.is_match(path) {
                continue;
            }
            if path.to_string_lossy().ends_with(ast_ext) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// `foo.js.ast.json` -> `foo.js`. `None` when the name does not carry the
/// extension or nothing is left after stripping it.
pub fn source_path_for(ast_path: &Path, ast_ext: &str) -> Option<PathBuf> {
    let file_name = ast_path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(ast_ext)?;
    if stem.is_empty() {
        return None;
    }
    Some(ast_path.with_file_name(stem))
}

/// Lint files in parallel. Results keep the order of `files`.
pub fn lint_files(linter: &Linter, files: &[PathBuf], ast_ext: &str) -> LintRun {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, lint_file(linter, path, ast_ext)))
        .collect();

    let mut run = LintRun::default();
    for (path, result) in results {
        match result {
            Ok(file) => run.files.push(file),
            Err(err) => {
                warn!(path = %path.display(), "failed to load");
                run.failures.push(LoadFailure {
                    path: path.clone(),
                    message: format!("{:#}", err),
                });
            }
        }
    }
    run
}

/// Load one AST file (plus its sibling source, if any) and lint it.
///
/// Diagnostics name the source file when the AST file follows the
/// `<source><ast_ext>` convention, and the AST file otherwise.
pub fn lint_file(linter: &Linter, ast_path: &Path, ast_ext: &str) -> Result<LintedFile> {
    let _span = info_span!("lint_file", path = %ast_path.display()).entered();
    let json = std::fs::read_to_string(ast_path)
        .with_context(|| format!("failed to read {}", ast_path.display()))?;

    let source_path = source_path_for(ast_path, ast_ext);
    let source = source_path
        .as_deref()
        .filter(|path| path.is_file())
        .and_then(|path| std::fs::read_to_string(path).ok());
    let display_path = source_path.as_deref().unwrap_or(ast_path);

    let program = Program::from_json_str(display_path.display().to_string(), &json, source)
        .with_context(|| format!("failed to load {}", ast_path.display()))?;
    let diagnostics = linter.lint(&program);

    Ok(LintedFile {
        ast_path: ast_path.to_path_buf(),
        source: program.source,
        diagnostics,
    })
}
