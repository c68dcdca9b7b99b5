use crate::PipetResult;

/// One prompt submission to a remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest<'a> {
    pub model_name: &'a str,
    pub api_key: &'a str,
    pub prompt: &'a str,
}

/// Abstraction of the remote text model: submit a prompt, get text back or fail.
pub trait TextModel {
    fn generate(&self, request: &ModelRequest<'_>) -> PipetResult<String>;
}
