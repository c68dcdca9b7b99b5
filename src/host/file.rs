//! File-backed editor: a document on disk plus a 1-based line range.
//!
//! The selection always starts at column 0 of its first line, so the block
//! lands on a line of its own. Writes go through a uniquely named temp file
//! in the same directory that is renamed over the original, so concurrent
//! runs against one document never share a temp file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{byte_offset, EditorHost, MessageLevel, Position, Selection};
use crate::{PipetError, PipetResult};

const TEMP_SUFFIX: &str = ".pipet-tmp";

/// Inclusive 1-based line range. `end == None` with `open_ended` reaches EOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: Option<usize>,
    pub open_ended: bool,
}

impl LineRange {
    pub fn single(line: usize) -> Self {
        Self { start: line, end: None, open_ended: false }
    }
}

impl FromStr for LineRange {
    type Err = String;

    /// Accepts `START`, `START:END` and `START:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| -> Result<usize, String> {
            let n: usize = v
                .trim()
                .parse()
                .map_err(|_| format!("invalid line number '{}'", v.trim()))?;
            if n == 0 {
                return Err("line numbers start at 1".into());
            }
            Ok(n)
        };

        match s.split_once(':') {
            None => Ok(Self::single(parse(s)?)),
            Some((start, "")) => Ok(Self { start: parse(start)?, end: None, open_ended: true }),
            Some((start, end)) => {
                let (start, end) = (parse(start)?, parse(end)?);
                if end < start {
                    return Err(format!("range end {} is before start {}", end, start));
                }
                Ok(Self { start, end: Some(end), open_ended: false })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Rewrite the file.
    #[default]
    InPlace,
    /// Leave the file alone and print the edited document.
    Stdout,
}

pub struct FileHost {
    path: PathBuf,
    content: String,
    range: Option<LineRange>,
    write_mode: WriteMode,
}

impl FileHost {
    /// Read `path` and validate `range` against it. `None` selects the whole file.
    pub fn open(path: &Path, range: Option<LineRange>, write_mode: WriteMode) -> PipetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipetError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_content(path, content, range, write_mode)
    }

    pub fn from_content(
        path: &Path,
        content: String,
        range: Option<LineRange>,
        write_mode: WriteMode,
    ) -> PipetResult<Self> {
        if let Some(r) = range {
            let lines = line_count(&content).max(1);
            if r.start > lines {
                return Err(PipetError::InvalidInput(format!(
                    "line {} is past the end of {} ({} lines)",
                    r.start,
                    path.display(),
                    lines
                )));
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            content,
            range,
            write_mode,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn persist(&self, content: &str) -> PipetResult<()> {
        match self.write_mode {
            WriteMode::InPlace => write_atomic(&self.path, content),
            WriteMode::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

impl EditorHost for FileHost {
    fn selection(&self) -> Option<Selection> {
        let lines: Vec<&str> = self.content.split_inclusive('\n').collect();
        let (first, last) = match self.range {
            None => (1, lines.len()),
            Some(r) => {
                let last = match (r.end, r.open_ended) {
                    (Some(end), _) => end,
                    (None, true) => lines.len(),
                    (None, false) => r.start,
                };
                (r.start, last.min(lines.len()))
            }
        };

        let text = if first <= last && !lines.is_empty() {
            let joined = lines[first - 1..last].concat();
            let trimmed = joined.strip_suffix('\n').unwrap_or(&joined);
            trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string()
        } else {
            String::new()
        };

        Some(Selection {
            text,
            start: Position::new(first.saturating_sub(1), 0),
        })
    }

    fn show_message(&mut self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => eprintln!("{}", message),
            MessageLevel::Error => eprintln!("Error: {}", message),
        }
    }

    fn insert(&mut self, at: Position, text: &str) -> PipetResult<()> {
        let offset = byte_offset(&self.content, at).ok_or_else(|| {
            PipetError::InvalidInput(format!(
                "line {} is past the end of {}",
                at.line + 1,
                self.path.display()
            ))
        })?;
        let mut edited = String::with_capacity(self.content.len() + text.len());
        edited.push_str(&self.content[..offset]);
        edited.push_str(text);
        edited.push_str(&self.content[offset..]);
        self.persist(&edited)?;
        self.content = edited;
        tracing::info!(
            path = %self.path.display(),
            line = at.line + 1,
            inserted_len = text.len(),
            "Block inserted"
        );
        Ok(())
    }
}

fn line_count(content: &str) -> usize {
    content.split_inclusive('\n').count()
}

/// Write to a sibling temp file, fsync, then rename over `path`.
///
/// The temp file gets a random name, and is removed on drop if the rename
/// never happens.
pub fn write_atomic(path: &Path, content: &str) -> PipetResult<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PipetError::InvalidInput(format!("not a file path: {}", path.display())))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
