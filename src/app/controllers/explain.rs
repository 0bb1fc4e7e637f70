use thiserror::Error;

use crate::app::domain::Selection;
use crate::app::services::ai_client::{AiClient, ModelCall, ResponseFormat, TransportError};
use crate::app::services::prompts::{explain_content, explain_system_instruction};

/// Shown while an explanation request is in flight.
pub const EXPLAIN_PENDING: &str = "Analyzing code...";
/// Shown when the service answered with nothing.
pub const NO_EXPLANATION: &str = "No explanation found.";
/// Shown when the request failed.
pub const EXPLAIN_FAILED: &str = "Failed to fetch explanation.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplainError {
    #[error("nothing is selected")]
    NothingSelected,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ExplainError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ExplainError::NothingSelected => "Select some code to explain first",
            ExplainError::Transport(_) => EXPLAIN_FAILED,
        }
    }
}

pub struct ExplainOrchestrator<C> {
    client: C,
    model: String,
    language: String,
}

impl<C: AiClient> ExplainOrchestrator<C> {
    pub fn new(client: C, model: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            language: language.into(),
        }
    }

    /// Explain `selection`. An empty answer comes back as `Ok("")`.
    pub fn explain(&self, selection: &Selection) -> Result<String, ExplainError> {
        if selection.text.trim().is_empty() {
            return Err(ExplainError::NothingSelected);
        }

        let call = ModelCall {
            model: self.model.clone(),
            content: explain_content(selection, &self.language),
            system_instruction: explain_system_instruction(&self.language),
            response_format: ResponseFormat::Text,
            reasoning_budget: None,
        };
        tracing::info!(
            model = %call.model,
            kind = %selection.source_kind,
            chars = selection.text.chars().count(),
            "requesting explanation"
        );

        match self.client.generate_content(&call) {
            Ok(text) => Ok(text),
            Err(TransportError::EmptyResponse) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::BufferKind;
    use crate::app::services::ai_client::testing::ScriptedClient;

    fn orchestrator(client: &ScriptedClient) -> ExplainOrchestrator<&ScriptedClient> {
        ExplainOrchestrator::new(client, "gemini-3-flash-preview", "Arabic")
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let client = ScriptedClient::default();
        let result = orchestrator(&client).explain(&Selection::new(BufferKind::Style, ""));
        assert_eq!(result, Err(ExplainError::NothingSelected));
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn test_explain_uses_fast_model_and_language() {
        let client = ScriptedClient::replying(Ok("**Flexbox** centering".to_string()));
        let text = orchestrator(&client)
            .explain(&Selection::new(BufferKind::Style, "display: flex;"))
            .unwrap();
        assert_eq!(text, "**Flexbox** centering");

        let calls = client.calls.borrow();
        assert_eq!(calls[0].model, "gemini-3-flash-preview");
        assert_eq!(calls[0].response_format, ResponseFormat::Text);
        assert!(calls[0].content.contains("CSS"));
        assert!(calls[0].content.contains("display: flex;"));
        assert!(calls[0].system_instruction.contains("Arabic"));
    }

    #[test]
    fn test_empty_reply_is_not_an_error() {
        let client = ScriptedClient::replying(Err(TransportError::EmptyResponse));
        let text = orchestrator(&client)
            .explain(&Selection::new(BufferKind::Script, "x()"))
            .unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_network_failure() {
        let client = ScriptedClient::replying(Err(TransportError::Network("timed out".into())));
        let err = orchestrator(&client)
            .explain(&Selection::new(BufferKind::Script, "x()"))
            .unwrap_err();
        assert_eq!(err.user_message(), EXPLAIN_FAILED);
    }
}
