//! Editor host abstraction.
//!
//! The pipeline only needs three things from an editor: the current
//! selection, a way to show the user a message, and a way to insert text.
//! `FileHost` treats a file on disk plus a line range as the editor;
//! `StdioHost` is a filter over stdin/stdout.

pub mod file;
pub mod stdio;

pub use file::{FileHost, LineRange, WriteMode};
pub use stdio::StdioHost;

use crate::PipetResult;

/// 0-based line and column (in `char`s) inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Highlighted text at the moment a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub start: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

pub trait EditorHost {
    /// Current selection, or `None` when there is no active editor.
    fn selection(&self) -> Option<Selection>;

    /// Show a message to the user.
    fn show_message(&mut self, level: MessageLevel, message: &str);

    /// Insert `text` at `at`, leaving the existing text after it untouched.
    fn insert(&mut self, at: Position, text: &str) -> PipetResult<()>;
}

/// Byte offset of `pos` in `content`, clamped to the end of its line.
pub fn byte_offset(content: &str, pos: Position) -> Option<usize> {
    let mut line_start = 0usize;
    for _ in 0..pos.line {
        let rest = &content[line_start..];
        let newline = rest.find('\n')?;
        line_start += newline + 1;
    }

    let line = &content[line_start..];
    let line_end = line.find('\n').unwrap_or(line.len());
    let offset = line[..line_end]
        .char_indices()
        .nth(pos.column)
        .map(|(idx, _)| idx)
        .unwrap_or(line_end);
    Some(line_start + offset)
}
