use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use snippet_sync::config::{self, Config};
use snippet_sync::{compare, logging, Mode, SnippetError, SyncOptions, SyncReport, UpdateResult};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the reference location.
const REFERENCE_ENV: &str = "SNIPPET_SYNC_REFERENCE";

#[derive(Parser)]
#[command(name = "snippet-sync")]
#[command(
    about = "Check that code snippets embedded in files match their reference copy",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Rewrite drifted snippets in place instead of only reporting them
    #[arg(short, long)]
    write: bool,

    /// Location of the reference snippets (file or directory)
    #[arg(short = 'e', long = "expect", value_name = "PATH")]
    expect: Option<PathBuf>,

    /// Configuration file (default: ./snippet-sync.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Accepted file extension when walking directories (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Do not run the formatter on rewritten files
    #[arg(long)]
    no_format: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Files or directories to check
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("{}", format!("Warning: logging disabled: {err}").yellow());
    }

    let options = resolve_options(&cli)?;
    tracing::debug!(reference = %options.reference.display(), mode = ?options.mode, "starting");

    let report = compare(&options, &cli.paths).with_context(|| {
        format!(
            "cannot check snippets against {}",
            options.reference.display()
        )
    })?;

    match cli.output {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

/// Merge config file, environment and flags into run options.
///
/// Priority for the reference location:
/// 1. `--expect`
/// 2. `SNIPPET_SYNC_REFERENCE`
/// 3. `reference` in the config file
/// 4. `snippets.rs`
fn resolve_options(cli: &Cli) -> Result<SyncOptions> {
    let config = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => {
            let cwd = env::current_dir().context("cannot determine working directory")?;
            match config::locate(&cwd) {
                Some(path) => {
                    tracing::debug!(config = %path.display(), "using config file");
                    config::load_from_path(&path)?
                }
                None => Config::default(),
            }
        }
    };

    let mut options = config.to_options();

    if let Some(reference) = &cli.expect {
        options.reference = reference.clone();
    } else if let Ok(reference) = env::var(REFERENCE_ENV) {
        if !reference.trim().is_empty() {
            options.reference = PathBuf::from(reference);
        }
    }

    if !cli.extensions.is_empty() {
        let extensions = cli
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string());
        options.filter = options.filter.with_extensions(extensions);
    }

    if cli.no_format {
        options.formatter = None;
    }

    if cli.write {
        options.mode = Mode::Apply;
    }

    Ok(options)
}

fn print_report(report: &SyncReport) {
    for error in &report.errors {
        match error {
            SnippetError::ContentMismatch {
                name,
                actual,
                expected,
                diff,
            } => {
                eprintln!(
                    "{} {}: snippet `{}` differs from reference at {}",
                    "✗".red(),
                    actual,
                    name,
                    expected
                );
                print_diff(diff);
            }
            SnippetError::UnknownSnippet { .. } => {
                eprintln!("{} {}", "?".yellow(), error);
            }
            other if other.is_structural() => {
                eprintln!("{} {} {}", "✗".red(), other, "(file skipped)".dimmed());
            }
            other => {
                eprintln!("{} {}", "✗".red(), other);
            }
        }
    }

    for update in &report.updates {
        match update {
            UpdateResult::Applied { .. } => println!("{} {}", "✓".green(), update),
            UpdateResult::AlreadySynced { .. } => println!("{} {}", "⊙".yellow(), update),
        }
    }

    let mismatched = report.count("content-mismatch");
    let unknown = report.count("unknown-snippet");
    let other = report.errors.len() - mismatched - unknown;

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} files scanned", report.files_scanned);
    println!("  {} snippets checked", report.snippets_checked);
    println!("  {} mismatched", format!("{}", mismatched).red());
    println!("  {} unknown", format!("{}", unknown).yellow());
    println!("  {} other errors", format!("{}", other).red());
    if report.mode == Mode::Apply {
        println!(
            "  {} files rewritten",
            format!("{}", report.rewritten().count()).green()
        );
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        let colored = if line.starts_with("---") || line.starts_with("+++") {
            line.dimmed()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        eprintln!("    {}", colored);
    }
}
