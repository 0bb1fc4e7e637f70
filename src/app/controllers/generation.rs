use serde_json::Value;
use thiserror::Error;

use crate::app::domain::{BufferKind, ModelChoice, WorkspaceState};
use crate::app::services::ai_client::{
    AiClient, ModelCall, ResponseFormat, TransportError, buffers_schema,
};
use crate::app::services::prompts::{GENERATION_SYSTEM_INSTRUCTION, generation_content};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("instruction is empty")]
    EmptyInstruction,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::EmptyInstruction => "Describe the change you want first".to_string(),
            GenerationError::Transport(e) => format!("Generation failed: {}", e),
            GenerationError::MalformedResponse(_) => {
                "Generation failed: the service returned an unexpected reply".to_string()
            }
        }
    }
}

/// Asks the model to rewrite all three buffers from a natural-language
/// instruction.
pub struct GenerationOrchestrator<C> {
    client: C,
    model: ModelChoice,
}

impl<C: AiClient> GenerationOrchestrator<C> {
    pub fn new(client: C, model: ModelChoice) -> Self {
        Self { client, model }
    }

    /// One request, no retries. On success returns `state` with every buffer
    /// replaced; names and mode are carried over.
    pub fn generate(
        &self,
        instruction: &str,
        state: &WorkspaceState,
    ) -> Result<WorkspaceState, GenerationError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(GenerationError::EmptyInstruction);
        }

        let call = ModelCall {
            model: self.model.model.clone(),
            content: generation_content(instruction, state),
            system_instruction: GENERATION_SYSTEM_INSTRUCTION.to_string(),
            response_format: ResponseFormat::Json(buffers_schema()),
            reasoning_budget: self.model.reasoning_budget,
        };
        tracing::info!(model = %call.model, component_mode = state.component_mode, "requesting generation");

        let reply = self.client.generate_content(&call)?;
        let [markup, style, script] = parse_buffers(&reply)?;

        let mut next = state.clone();
        next.replace_all(markup, style, script);
        Ok(next)
    }
}

/// Extract `[markup, style, script]` from a reply object keyed html/css/js.
pub fn parse_buffers(reply: &str) -> Result<[String; 3], GenerationError> {
    let value: Value = serde_json::from_str(reply.trim())
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(GenerationError::MalformedResponse(
            "reply is not a JSON object".to_string(),
        ));
    };

    let field = |kind: BufferKind| -> Result<String, GenerationError> {
        let key = kind.wire_key();
        match object.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) => Ok(String::new()),
            Some(other) => Err(GenerationError::MalformedResponse(format!(
                "\"{}\" is not a string: {}",
                key, other
            ))),
            None => Err(GenerationError::MalformedResponse(format!(
                "missing \"{}\"",
                key
            ))),
        }
    };

    Ok([
        field(BufferKind::Markup)?,
        field(BufferKind::Style)?,
        field(BufferKind::Script)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::ai_client::testing::ScriptedClient;

    fn fast() -> ModelChoice {
        ModelChoice {
            model: "gemini-3-flash-preview".to_string(),
            reasoning_budget: None,
        }
    }

    #[test]
    fn test_blank_instruction_makes_no_call() {
        let client = ScriptedClient::default();
        let orchestrator = GenerationOrchestrator::new(&client, fast());
        let result = orchestrator.generate("   \n", &WorkspaceState::default());
        assert_eq!(result, Err(GenerationError::EmptyInstruction));
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn test_success_replaces_all_buffers() {
        let client = ScriptedClient::replying(Ok(
            r#"{"html": "<h1>Hi</h1>", "css": "h1{color:red}", "js": ""}"#.to_string(),
        ));
        let orchestrator = GenerationOrchestrator::new(&client, fast());
        let mut state = WorkspaceState::new("<p>old</p>", "p{}", "old()", true);
        state.markup.display_name = "page.html".to_string();

        let next = orchestrator.generate("add a heading", &state).unwrap();
        assert_eq!(next.markup.content, "<h1>Hi</h1>");
        assert_eq!(next.style.content, "h1{color:red}");
        assert_eq!(next.script.content, "");
        assert_eq!(next.markup.display_name, "page.html");
        assert!(next.component_mode);
    }

    #[test]
    fn test_request_carries_instruction_and_schema() {
        let client = ScriptedClient::replying(Ok(r#"{"html":"","css":"","js":""}"#.to_string()));
        let model = ModelChoice {
            model: "gemini-3-pro-preview".to_string(),
            reasoning_budget: Some(4000),
        };
        let orchestrator = GenerationOrchestrator::new(&client, model);
        orchestrator
            .generate("make it blue", &WorkspaceState::new("", "", "x()", false))
            .unwrap();

        let calls = client.calls.borrow();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.model, "gemini-3-pro-preview");
        assert_eq!(call.reasoning_budget, Some(4000));
        assert_eq!(call.system_instruction, GENERATION_SYSTEM_INSTRUCTION);
        assert!(call.content.contains("USER REQUEST: \"make it blue\""));
        assert!(call.content.contains("- index.html: empty"));
        assert!(matches!(call.response_format, ResponseFormat::Json(_)));
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let client = ScriptedClient::replying(Ok(r#"{"html": "<p></p>", "css": ""}"#.to_string()));
        let orchestrator = GenerationOrchestrator::new(&client, fast());
        let result = orchestrator.generate("x", &WorkspaceState::default());
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_buffers("Sure! Here is your code"),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_buffers("[1, 2, 3]"),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_buffers(r#"{"html": 1, "css": "", "js": ""}"#),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_null_value_becomes_empty() {
        let [markup, style, script] =
            parse_buffers(r#"{"html": "<p>x</p>", "css": null, "js": "go()"}"#).unwrap();
        assert_eq!(markup, "<p>x</p>");
        assert_eq!(style, "");
        assert_eq!(script, "go()");
    }

    #[test]
    fn test_transport_error_passes_through() {
        let client = ScriptedClient::replying(Err(TransportError::Status {
            status: 503,
            body: "overloaded".to_string(),
        }));
        let orchestrator = GenerationOrchestrator::new(&client, fast());
        let err = orchestrator
            .generate("x", &WorkspaceState::default())
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport(TransportError::Status { status: 503, .. })));
        assert!(err.user_message().starts_with("Generation failed"));
    }
}
