//! The three generation commands and the static profile each one runs with.
//!
//! Every command goes through the same pipeline; only the prompt template,
//! the header written into the block, and whether the prompt ends with an
//! answer label differ.

use std::fmt;
use std::str::FromStr;

use crate::constants::{COMMENT_LABEL, REVIEW_LABEL};
use crate::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Comment,
    Review,
    Summary,
}

/// Parameters that distinguish one command from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandProfile {
    pub prompt_template: &'static str,
    pub header_text: &'static str,
    /// Label closing the prompt, marking where the model's answer begins.
    pub answer_label: Option<&'static str>,
}

impl CommandProfile {
    pub fn includes_answer_label(&self) -> bool {
        self.answer_label.is_some()
    }
}

const COMMENT_PROFILE: CommandProfile = CommandProfile {
    prompt_template: prompt::COMMENT_TEMPLATE,
    header_text: "Code comment: (generated)",
    answer_label: Some(COMMENT_LABEL),
};

const REVIEW_PROFILE: CommandProfile = CommandProfile {
    prompt_template: prompt::REVIEW_TEMPLATE,
    header_text: "Code review: (generated)",
    answer_label: Some(REVIEW_LABEL),
};

const SUMMARY_PROFILE: CommandProfile = CommandProfile {
    prompt_template: prompt::SUMMARY_TEMPLATE,
    header_text: "Code summary: (generated)",
    answer_label: None,
};

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [Self::Comment, Self::Review, Self::Summary];

    pub fn profile(&self) -> &'static CommandProfile {
        match self {
            Self::Comment => &COMMENT_PROFILE,
            Self::Review => &REVIEW_PROFILE,
            Self::Summary => &SUMMARY_PROFILE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Review => "review",
            Self::Summary => "summary",
        }
    }

    /// Progress notice shown once the request is about to be sent.
    pub fn progress_message(&self) -> &'static str {
        match self {
            Self::Comment => "Generating comment...",
            Self::Review => "Generating code review...",
            Self::Summary => "Generating summary...",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comment" => Ok(Self::Comment),
            "review" => Ok(Self::Review),
            "summary" | "summarize" => Ok(Self::Summary),
            other => Err(format!(
                "unknown command '{}' (expected comment, review or summarize)",
                other
            )),
        }
    }
}
