//! Line matcher: scans one file's lines against a set of phrases.
//!
//! Files are read line-by-line through a buffered reader so that large logs
//! never have to fit in memory. Matching is plain substring containment, no
//! regex. A decode or read failure mid-file surfaces as a [`ScanError`] that
//! the caller handles per-file; it never aborts the overall search.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How multiple phrases combine on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every phrase must appear in the line.
    All,
    /// At least one phrase must appear.
    Any,
}

/// One search run's matching parameters, threaded explicitly through the
/// enumerator and matcher (no process-global state).
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub phrases: Vec<String>,
    pub case_sensitive: bool,
    pub mode: MatchMode,
}

impl SearchRequest {
    /// Phrases in the form they are compared in: lowered once per file when
    /// matching case-insensitively, untouched otherwise.
    fn comparable_phrases(&self) -> Vec<String> {
        if self.case_sensitive {
            self.phrases.clone()
        } else {
            self.phrases.iter().map(|p| p.to_lowercase()).collect()
        }
    }
}

/// A single matching line. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub path: PathBuf,
    /// 1-based line number within the file.
    pub line_number: usize,
    /// Line content with the trailing terminator stripped.
    pub content: String,
}

/// Failure scoped to a single file. Recovered at the search level by
/// skipping the file and moving on.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid UTF-8 on line {line}")]
    InvalidUtf8 { line: usize },
}

/// Decide whether one already-case-normalized line matches.
pub fn line_matches(line: &str, phrases: &[String], mode: MatchMode, case_sensitive: bool) -> bool {
    let hay: Cow<'_, str> = if case_sensitive {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line.to_lowercase())
    };
    match mode {
        MatchMode::All => phrases.iter().all(|p| hay.contains(p.as_str())),
        MatchMode::Any => phrases.iter().any(|p| hay.contains(p.as_str())),
    }
}

/// Open `path` and return a lazy iterator over its matching lines.
///
/// The file handle lives only as long as the iterator, so it is released
/// before the next file is opened, on every exit path.
pub fn scan_file(path: &Path, request: &SearchRequest) -> Result<FileMatches, ScanError> {
    let file = File::open(path)?;
    Ok(FileMatches {
        path: path.to_path_buf(),
        reader: BufReader::new(file),
        phrases: request.comparable_phrases(),
        mode: request.mode,
        case_sensitive: request.case_sensitive,
        line: 0,
        buf: Vec::new(),
        done: false,
    })
}

/// Iterator over the matching lines of one file.
///
/// Yields `Ok(MatchResult)` per matching line; a read or decode failure
/// yields one `Err` and then the iterator is exhausted.
pub struct FileMatches {
    path: PathBuf,
    reader: BufReader<File>,
    phrases: Vec<String>,
    mode: MatchMode,
    case_sensitive: bool,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl Iterator for FileMatches {
    type Item = Result<MatchResult, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
            self.line += 1;

            // Strip the line terminator (\n or \r\n) before comparison and output.
            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
            }
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }

            let content = match std::str::from_utf8(&self.buf) {
                Ok(s) => s,
                Err(_) => {
                    self.done = true;
                    return Some(Err(ScanError::InvalidUtf8 { line: self.line }));
                }
            };

            if line_matches(content, &self.phrases, self.mode, self.case_sensitive) {
                return Some(Ok(MatchResult {
                    path: self.path.clone(),
                    line_number: self.line,
                    content: content.to_string(),
                }));
            }
        }
    }
}
