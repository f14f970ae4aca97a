//! gitresolve command-line tool.
//!
//! Batch, non-interactive surface over the conflict resolution engine.
//! Callers (scripts, git aliases, CI jobs) pass the conflicted paths in;
//! discovering them -- e.g. via `git diff --name-only --diff-filter=U` --
//! and staging the results stays with the caller's VCS tooling.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitresolve_core::conflict::{
    ConflictParser, FileOutcome, FileResolver, ResolutionStrategy, ResolveOptions,
};
use gitresolve_core::preview;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Resolve Git merge-conflict markers in working-tree files.
#[derive(Parser, Debug)]
#[command(
    name = "gitresolve",
    version,
    about = "Resolve Git merge-conflict markers by side or heuristically"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve conflict regions in the given files.
    Resolve {
        /// Conflicted file paths to process.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Resolution strategy: ours, theirs, or auto.
        #[arg(short, long)]
        strategy: String,

        /// Copy each original to `<path>.conflict_backup` before writing.
        #[arg(long)]
        backup: bool,
    },

    /// Report conflict regions and labels without modifying anything.
    Check {
        /// File paths to inspect.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit one JSON object per file instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print a marker-annotated preview of one file's conflicts.
    Preview {
        /// File path to preview.
        file: PathBuf,

        /// Show each region as a two-column comparison instead.
        #[arg(long)]
        side_by_side: bool,

        /// Omit line numbers from the annotated view.
        #[arg(long)]
        no_line_numbers: bool,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // Minimal logging for CLI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            files,
            strategy,
            backup,
        } => cmd_resolve(&files, &strategy, backup),
        Commands::Check { files, json } => cmd_check(&files, json),
        Commands::Preview {
            file,
            side_by_side,
            no_line_numbers,
        } => cmd_preview(&file, side_by_side, no_line_numbers),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_resolve(files: &[PathBuf], strategy: &str, backup: bool) -> Result<()> {
    let strategy: ResolutionStrategy = strategy
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    if strategy == ResolutionStrategy::Manual {
        anyhow::bail!("'manual' means opening your editor; run it directly and stage the result");
    }

    let options = ResolveOptions { backup };
    let mut failures = 0usize;

    for path in files {
        match FileResolver::resolve_file(path, strategy, &options) {
            Ok(FileOutcome::Resolved { regions, labels }) => {
                if labels.is_empty() {
                    println!("resolved {} ({} region(s))", path.display(), regions);
                } else {
                    println!(
                        "resolved {} ({} region(s); {})",
                        path.display(),
                        regions,
                        labels.join(", ")
                    );
                }
            }
            Ok(FileOutcome::NoConflicts) => {
                println!("no conflicts in {}", path.display());
            }
            Ok(FileOutcome::Unresolvable) => {
                println!(
                    "UNRESOLVED {} (no heuristic applies; retry with --strategy ours|theirs or edit manually)",
                    path.display()
                );
                failures += 1;
            }
            Err(e) => {
                eprintln!("failed {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) not resolved", failures, files.len());
    }
    Ok(())
}

fn cmd_check(files: &[PathBuf], json: bool) -> Result<()> {
    for path in files {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&raw);

        let parsed = if ConflictParser::detect(&content) {
            ConflictParser::parse(content.split('\n').map(str::to_string).collect())
        } else {
            Default::default()
        };

        let labels: Vec<&str> = parsed
            .regions
            .iter()
            .flat_map(|r| [r.ours_label.as_str(), r.theirs_label.as_str()])
            .filter(|l| !l.is_empty())
            .collect();

        if json {
            let value = serde_json::json!({
                "path": path.display().to_string(),
                "conflicted": !parsed.regions.is_empty(),
                "regions": parsed.regions.len(),
                "labels": labels,
            });
            println!("{}", value);
        } else if parsed.regions.is_empty() {
            println!("{}: clean", path.display());
        } else {
            println!(
                "{}: {} region(s) [{}]",
                path.display(),
                parsed.regions.len(),
                labels.join(", ")
            );
        }
    }

    Ok(())
}

fn cmd_preview(file: &PathBuf, side_by_side: bool, no_line_numbers: bool) -> Result<()> {
    let raw = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let content = String::from_utf8_lossy(&raw);

    let rendered = if side_by_side {
        preview::side_by_side(&content)
    } else {
        preview::annotated(&content, !no_line_numbers)
    };

    println!("File: {}", file.display());
    println!("{}", rendered);

    Ok(())
}
