//! pipet: code comments, reviews and summaries from Gemini, spliced into
//! source as block comments.
//!
//! The library holds the pipeline and its pieces: prompt building, the
//! response formatter, the editor host abstraction and the Gemini client.

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod gemini;
pub mod host;
pub mod path_utils;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod tracing_init;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-exports for convenience
pub use command::CommandKind;
pub use error::{PipetError, PipetResult};
pub use pipeline::{run_command, Outcome};
