//! Command pipeline shared by comment, review and summary.
//!
//! checks → prompt → model call → format → insert.
//! Every check runs before the model is contacted and before any edit, so a
//! run either inserts exactly one block or leaves the document untouched.

use crate::command::CommandKind;
use crate::config::Settings;
use crate::formatter::{format_block, indent_prefix};
use std::io::Write;

use crate::host::{EditorHost, MessageLevel, Position, StdioHost};
use crate::prompt::build_prompt;
use crate::provider::{ModelRequest, TextModel};
use crate::PipetResult;

pub const MISSING_API_KEY_MESSAGE: &str = "API key not configured. Check your settings.";

/// How a run ended when nothing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted { at: Position, block: String },
    MissingApiKey,
    NoActiveEditor,
}

/// Run `kind` against the host's current selection.
///
/// Remote failures propagate as `Err` with the document left as it was.
pub fn run_command(
    kind: CommandKind,
    settings: &Settings,
    host: &mut dyn EditorHost,
    model: &dyn TextModel,
) -> PipetResult<Outcome> {
    let Some(api_key) = settings.api_key() else {
        tracing::warn!(command = %kind, "No API key configured");
        host.show_message(MessageLevel::Error, MISSING_API_KEY_MESSAGE);
        return Ok(Outcome::MissingApiKey);
    };

    let Some(selection) = host.selection() else {
        tracing::debug!(command = %kind, "Abandon: no open text editor");
        return Ok(Outcome::NoActiveEditor);
    };

    host.show_message(MessageLevel::Info, kind.progress_message());

    let profile = kind.profile();
    let prompt = build_prompt(profile, &selection.text);
    tracing::info!(
        command = %kind,
        model = %settings.model_name(),
        selection_len = selection.text.len(),
        prompt_len = prompt.len(),
        "Submitting prompt"
    );

    let response = model.generate(&ModelRequest {
        model_name: settings.model_name(),
        api_key,
        prompt: &prompt,
    })?;

    let block = format_block(&response, indent_prefix(&selection.text), profile.header_text);
    host.insert(selection.start, &block)?;

    tracing::info!(command = %kind, line = selection.start.line + 1, "Command complete");
    Ok(Outcome::Inserted {
        at: selection.start,
        block,
    })
}

/// `run_command` for a stdin/stdout filter.
///
/// The editor replaces the piped region with whatever lands on stdout, so any
/// run that does not insert a block writes the input back unchanged.
pub fn run_filter<W: Write>(
    kind: CommandKind,
    settings: &Settings,
    host: &mut StdioHost<W>,
    model: &dyn TextModel,
) -> PipetResult<Outcome> {
    let result = run_command(kind, settings, host, model);
    if !matches!(result, Ok(Outcome::Inserted { .. })) {
        if let Err(e) = host.pass_through() {
            tracing::warn!(command = %kind, error = %e, "Could not echo input back");
        }
    }
    result
}
