//! Filter host: selection from piped stdin, edited text to stdout.
//!
//! Editors that pipe a region through a shell command (vim `!`, Emacs
//! `shell-command-on-region`, Helix `|`) get back the block followed by
//! their original text. Editors often merge stderr into the replaced region,
//! so progress messages go to the log only, and a run that inserts nothing
//! echoes the input back unchanged.

use std::io::{IsTerminal, Read, Write};

use super::{byte_offset, EditorHost, MessageLevel, Position, Selection};
use crate::{PipetError, PipetResult};

pub struct StdioHost<W: Write> {
    input: Option<String>,
    output: W,
    written: bool,
}

impl StdioHost<std::io::Stdout> {
    /// Read all of stdin. An interactive terminal counts as no active editor.
    pub fn from_stdin() -> PipetResult<Self> {
        let stdin = std::io::stdin();
        let input = if stdin.is_terminal() {
            tracing::debug!("stdin is a terminal, no selection available");
            None
        } else {
            let mut buf = String::new();
            stdin.lock().read_to_string(&mut buf)?;
            Some(buf)
        };
        Ok(Self::new(input, std::io::stdout()))
    }
}

impl<W: Write> StdioHost<W> {
    pub fn new(input: Option<String>, output: W) -> Self {
        Self { input, output, written: false }
    }

    /// Write the input back untouched, unless output was already produced.
    pub fn pass_through(&mut self) -> PipetResult<()> {
        if self.written {
            return Ok(());
        }
        if let Some(input) = self.input.as_deref() {
            self.written = true;
            self.output.write_all(input.as_bytes())?;
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> EditorHost for StdioHost<W> {
    fn selection(&self) -> Option<Selection> {
        self.input.as_ref().map(|text| Selection {
            text: text.clone(),
            start: Position::default(),
        })
    }

    fn show_message(&mut self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => tracing::info!("{}", message),
            MessageLevel::Error => eprintln!("Error: {}", message),
        }
    }

    fn insert(&mut self, at: Position, text: &str) -> PipetResult<()> {
        let input = self
            .input
            .as_deref()
            .ok_or_else(|| PipetError::InvalidInput("no input to insert into".into()))?;
        let offset = byte_offset(input, at).ok_or_else(|| {
            PipetError::InvalidInput(format!("line {} is past the end of input", at.line + 1))
        })?;

        self.written = true;
        self.output.write_all(input[..offset].as_bytes())?;
        self.output.write_all(text.as_bytes())?;
        self.output.write_all(input[offset..].as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}
