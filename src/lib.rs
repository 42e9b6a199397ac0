pub mod report;
pub mod scan;
pub mod walk;

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use report::Reporter;
use scan::{MatchMode, ScanError, SearchRequest};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "loggrep",
    version,
    about = "Search log files for lines containing literal phrases"
)]
pub struct Cli {
    /// Log file or directory to search
    pub path: PathBuf,

    /// One or more phrases to look for (literal substrings, no regex)
    #[arg(required = true)]
    pub phrases: Vec<String>,

    /// Ignore case when matching
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Report lines containing ANY phrase (default: ALL phrases)
    #[arg(short = 'a', long)]
    pub any: bool,

    /// Descend into subdirectories when the path is a directory
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Emit progress and per-file diagnostics on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Also write results to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Omit line numbers from printed matches
    #[arg(short = 'n', long)]
    pub no_line_numbers: bool,

    /// Print per-file match counts instead of matching lines
    #[arg(short = 'c', long, conflicts_with = "files_only")]
    pub count: bool,

    /// Print only names of files containing a match (like grep -l)
    #[arg(short = 'l', long)]
    pub files_only: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.phrases.iter().any(String::is_empty) {
        bail!("search phrases must be non-empty");
    }
    if cli.recursive && cli.path.is_file() {
        tracing::warn!(path = %cli.path.display(), "--recursive has no effect on a single file");
    }

    let files = walk::files_to_search(&cli.path, cli.recursive);
    if files.is_empty() {
        bail!("no files found to search under {}", cli.path.display());
    }

    let request = SearchRequest {
        phrases: cli.phrases.clone(),
        case_sensitive: !cli.ignore_case,
        mode: if cli.any { MatchMode::Any } else { MatchMode::All },
    };
    tracing::info!(
        files = files.len(),
        phrases = ?request.phrases,
        mode = ?request.mode,
        case_sensitive = request.case_sensitive,
        "starting search"
    );

    let mut reporter = Reporter::open(cli.output.as_deref(), !cli.no_line_numbers)?;
    let mut total = 0usize;
    let mut skipped = 0usize;

    for path in &files {
        match scan_one(path, &request, &cli, &mut reporter)? {
            Some(found) => total += found,
            None => skipped += 1,
        }
    }
    reporter.finish()?;

    tracing::info!(
        total_matches = total,
        files = files.len(),
        skipped,
        "search complete"
    );
    Ok(())
}

/// Scan one file. `Ok(Some(n))` is a completed scan with `n` matches,
/// `Ok(None)` a skipped file (unreadable or undecodable). `Err` is reserved
/// for output failures, which abort the whole run.
fn scan_one(
    path: &Path,
    request: &SearchRequest,
    cli: &Cli,
    reporter: &mut Reporter,
) -> Result<Option<usize>> {
    tracing::info!(path = %path.display(), "scanning");

    let matches = match scan::scan_file(path, request) {
        Ok(matches) => matches,
        Err(err) => {
            warn_skip(path, &err);
            return Ok(None);
        }
    };

    if cli.files_only {
        // Stop at the first match, like grep -l.
        for hit in matches {
            match hit {
                Ok(_) => {
                    reporter.file_name(path)?;
                    return Ok(Some(1));
                }
                Err(err) => {
                    warn_skip(path, &err);
                    return Ok(None);
                }
            }
        }
        return Ok(Some(0));
    }

    // Collect this file's matches before printing so a decode failure
    // mid-file leaves the file contributing zero results.
    let mut found = Vec::new();
    for hit in matches {
        match hit {
            Ok(hit) => found.push(hit),
            Err(err) => {
                warn_skip(path, &err);
                return Ok(None);
            }
        }
    }

    if cli.count {
        reporter.file_count(path, found.len())?;
    } else {
        for hit in &found {
            reporter.match_line(hit)?;
        }
    }
    Ok(Some(found.len()))
}

fn warn_skip(path: &Path, err: &ScanError) {
    tracing::warn!(path = %path.display(), "skipping file: {err}");
}
