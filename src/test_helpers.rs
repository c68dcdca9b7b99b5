//! Shared test utilities: stub model and recording editor host.
//!
//! Available only under `#[cfg(test)]`.

use std::cell::RefCell;

use crate::host::{EditorHost, MessageLevel, Position, Selection};
use crate::provider::{ModelRequest, TextModel};
use crate::{PipetError, PipetResult};

// ============================================================================
// Models
// ============================================================================

/// Owned copy of a request seen by `StubModel`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model_name: String,
    pub api_key: String,
    pub prompt: String,
}

/// Returns canned text and remembers every request.
pub struct StubModel {
    response: String,
    calls: RefCell<Vec<RecordedRequest>>,
}

impl StubModel {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.borrow().clone()
    }
}

impl TextModel for StubModel {
    fn generate(&self, request: &ModelRequest<'_>) -> PipetResult<String> {
        self.calls.borrow_mut().push(RecordedRequest {
            model_name: request.model_name.to_string(),
            api_key: request.api_key.to_string(),
            prompt: request.prompt.to_string(),
        });
        Ok(self.response.clone())
    }
}

/// Always fails like an unreachable endpoint.
pub struct FailingModel;

impl TextModel for FailingModel {
    fn generate(&self, _request: &ModelRequest<'_>) -> PipetResult<String> {
        Err(PipetError::Provider("connection refused".into()))
    }
}

// ============================================================================
// RecordingHost
// ============================================================================

#[derive(Default)]
pub struct RecordingHost {
    pub selection: Option<Selection>,
    pub messages: Vec<(MessageLevel, String)>,
    pub inserts: Vec<(Position, String)>,
}

impl RecordingHost {
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }

    pub fn without_editor() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages_at(MessageLevel::Error)
    }

    pub fn infos(&self) -> Vec<&str> {
        self.messages_at(MessageLevel::Info)
    }

    fn messages_at(&self, level: MessageLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl EditorHost for RecordingHost {
    fn selection(&self) -> Option<Selection> {
        self.selection.clone()
    }

    fn show_message(&mut self, level: MessageLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }

    fn insert(&mut self, at: Position, text: &str) -> PipetResult<()> {
        self.inserts.push((at, text.to_string()));
        Ok(())
    }
}
