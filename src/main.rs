//! filesize - list every file in a tree with its raw and gzipped size.
//!
//! Usage:
//!   fsz [DIR]                       Table of files under DIR (default: .)
//!   fsz -d target,dist [DIR]        Skip directories matching the rules
//!   fsz -f '\.map$' [DIR]           Skip files matching the rules
//!   fsz -l 100KB [DIR]              Highlight files above 100KB
//!   fsz --format json [DIR]         Emit the report as JSON
//!   fsz --help                      Show help

mod table;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use filesize_analyze::{ReportConfig, SizeReporter};
use filesize_scan::{TreeWalker, WalkConfig, WalkProgress};

#[derive(Parser)]
#[command(
    name = "filesize",
    version,
    about = "List every file in a directory tree with its raw and gzipped size",
    long_about = "filesize walks a directory and prints a table of each file's size \
                  and gzipped size, with totals.\n\n\
                  Exclusion rules are regular expressions matched anywhere in a file \
                  or directory name; plain words act as substring matches."
)]
struct Cli {
    /// Directory to list (defaults to current directory)
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// File names or patterns used to exclude files from the listing (comma-separated)
    #[arg(short = 'f', long, value_delimiter = ',', value_parser = trimmed)]
    exclude_files: Option<Vec<String>>,

    /// Directory names or patterns used to exclude directories from the listing (comma-separated)
    #[arg(short = 'd', long, value_delimiter = ',', value_parser = trimmed)]
    exclude_dirs: Option<Vec<String>>,

    /// Size above which a file is flagged as too large (e.g., "500", "10KB", "1MB")
    #[arg(short = 'l', long, value_parser = parse_size)]
    large_file: Option<u64>,

    /// Output the progress while iterating over files and directories
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = WalkConfig::builder();
    builder.root(cli.dir.clone()).verbose(cli.verbose);
    if let Some(rules) = cli.exclude_files {
        builder.exclude_files(rules);
    }
    if let Some(rules) = cli.exclude_dirs {
        builder.exclude_dirs(rules);
    }
    let config = builder.build().context("Invalid configuration")?;

    let inventory = {
        let mut stderr = std::io::stderr();
        let mut walker = TreeWalker::with_progress(|p: &WalkProgress| {
            let spinner = if p.files_walked % 2 == 0 { '-' } else { '|' };
            let status = format!(
                "Processing: {} - {}...{spinner}",
                p.name,
                table::format_size(p.size)
            );
            status_line(&mut stderr, &status);
        });
        walker
            .walk(&config)
            .with_context(|| format!("Failed to list {}", cli.dir.display()))?
    };

    if cli.verbose {
        status_line(&mut std::io::stderr(), "Rendering...");
    }
    debug!(files = inventory.total_files(), "computing gzip sizes");

    let report_config = ReportConfig::builder()
        .large_file(cli.large_file)
        .build()
        .context("Invalid report configuration")?;
    let report = SizeReporter::with_config(report_config)
        .build(&inventory)
        .context("Failed to compute gzip sizes")?;

    if cli.verbose {
        status_line(&mut std::io::stderr(), "");
    }

    match cli.format {
        OutputFormat::Text => {
            let color = !cli.no_color && std::io::stdout().is_terminal();
            println!("{}", table::render(&report, color));
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if inventory.has_warnings() {
        eprintln!(
            "{} unreadable entries skipped during walk",
            inventory.warnings.len()
        );
        if cli.verbose {
            for warning in &inventory.warnings {
                eprintln!("  {}: {}", warning.path.display(), warning.message);
            }
        }
    }

    Ok(())
}

/// Replace the current terminal line with `text`.
fn status_line(out: &mut impl Write, text: &str) {
    let written = queue!(out, Clear(ClearType::CurrentLine), MoveToColumn(0), Print(text))
        .and_then(|()| out.flush());
    if let Err(err) = written {
        debug!(error = %err, "failed to update status line");
    }
}

/// Trim whitespace around a comma-separated list item.
fn trimmed(s: &str) -> Result<String, String> {
    Ok(s.trim().to_string())
}

/// Parse a size string (e.g., "500", "64B", "10KB", "1.5M", "1GB").
fn parse_size(s: &str) -> Result<u64, String> {
    let upper = s.trim().to_uppercase();
    let split = upper
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(upper.len());
    let (number, unit) = upper.split_at(split);

    let multiplier: u64 = match unit.trim() {
        "" | "B" => 1,
        "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        other => return Err(format!("invalid size `{s}`: unknown unit `{other}`")),
    };
    let number: f64 = number
        .parse()
        .map_err(|e| format!("invalid size `{s}`: {e}"))?;

    Ok((number * multiplier as f64) as u64)
}
