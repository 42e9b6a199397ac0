//! Result rendering and output routing.
//!
//! Match lines go to stdout, and additionally to the `--output` file when
//! one was given. Any failure writing either stream is fatal to the run;
//! diagnostics never mix into result output (they go to stderr via
//! `tracing`).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use crate::scan::MatchResult;

pub struct Reporter {
    stdout: Stdout,
    file: Option<(PathBuf, BufWriter<File>)>,
    line_numbers: bool,
}

impl Reporter {
    /// Open the output sinks. Creating (truncating) the `--output` file
    /// fails the run up front rather than after results were printed.
    pub fn open(output: Option<&Path>, line_numbers: bool) -> Result<Self> {
        let file = match output {
            Some(path) => {
                let f = File::create(path)
                    .with_context(|| format!("cannot create output file {}", path.display()))?;
                Some((path.to_path_buf(), BufWriter::new(f)))
            }
            None => None,
        };
        Ok(Self {
            stdout: std::io::stdout(),
            file,
            line_numbers,
        })
    }

    /// Render one match as `path:line: content` (line number optional).
    pub fn match_line(&mut self, hit: &MatchResult) -> Result<()> {
        let rendered = if self.line_numbers {
            format!("{}:{}: {}", hit.path.display(), hit.line_number, hit.content)
        } else {
            format!("{}: {}", hit.path.display(), hit.content)
        };
        self.emit(&rendered)
    }

    /// `--count` rendering: `path: N`.
    pub fn file_count(&mut self, path: &Path, count: usize) -> Result<()> {
        self.emit(&format!("{}: {}", path.display(), count))
    }

    /// `--files-only` rendering: just the path.
    pub fn file_name(&mut self, path: &Path) -> Result<()> {
        self.emit(&path.display().to_string())
    }

    fn emit(&mut self, line: &str) -> Result<()> {
        writeln!(self.stdout, "{line}").context("cannot write to stdout")?;
        if let Some((path, writer)) = &mut self.file {
            writeln!(writer, "{line}")
                .with_context(|| format!("cannot write to output file {}", path.display()))?;
        }
        Ok(())
    }

    /// Flush the `--output` file; a failed flush is an output error like any
    /// other write failure.
    pub fn finish(mut self) -> Result<()> {
        if let Some((path, mut writer)) = self.file.take() {
            writer
                .flush()
                .with_context(|| format!("cannot write to output file {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_receives_rendered_matches() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("results.txt");

        let mut reporter = Reporter::open(Some(&out), true).unwrap();
        reporter
            .match_line(&MatchResult {
                path: PathBuf::from("t2.log"),
                line_number: 3,
                content: "ERROR database timeout".into(),
            })
            .unwrap();
        reporter.finish().unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "t2.log:3: ERROR database timeout\n");
    }

    #[test]
    fn line_numbers_can_be_suppressed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("results.txt");

        let mut reporter = Reporter::open(Some(&out), false).unwrap();
        reporter
            .match_line(&MatchResult {
                path: PathBuf::from("t2.log"),
                line_number: 3,
                content: "ERROR database timeout".into(),
            })
            .unwrap();
        reporter.finish().unwrap();

        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "t2.log: ERROR database timeout\n"
        );
    }

    #[test]
    fn unwritable_output_target_fails_up_front() {
        assert!(Reporter::open(Some(Path::new("/nonexistent/dir/out.txt")), true).is_err());
    }
}
