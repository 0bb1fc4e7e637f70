//! Google Gemini `generateContent` client.
//!
//! Orchestrators talk to the [`AiClient`] trait; [`GeminiClient`] is the
//! production implementation over the blocking `minreq` client.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::app::domain::EditorSettings;
use crate::app::infrastructure::error::Result as AppResult;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    Text,
    /// JSON constrained to the given response schema.
    Json(Value),
}

/// One outbound request to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCall {
    pub model: String,
    pub content: String,
    pub system_instruction: String,
    pub response_format: ResponseFormat,
    pub reasoning_budget: Option<u32>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: i32, body: String },

    #[error("service returned no text")]
    EmptyResponse,

    #[error("could not decode service reply: {0}")]
    Decode(String),
}

pub trait AiClient {
    /// Send one request and return the model's text output.
    fn generate_content(&self, call: &ModelCall) -> Result<String, TransportError>;
}

impl<T: AiClient + ?Sized> AiClient for &T {
    fn generate_content(&self, call: &ModelCall) -> Result<String, TransportError> {
        (**self).generate_content(call)
    }
}

/// Schema for the three-key buffer object returned by generation calls.
pub fn buffers_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "html": { "type": "STRING" },
            "css": { "type": "STRING" },
            "js": { "type": "STRING" }
        },
        "required": ["html", "css", "js"]
    })
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> AppResult<Self> {
        Ok(Self::new(
            settings.api_key()?,
            settings.api_base_url.clone(),
            settings.request_timeout_secs,
        ))
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl AiClient for GeminiClient {
    fn generate_content(&self, call: &ModelCall) -> Result<String, TransportError> {
        let url = self.endpoint(&call.model);
        tracing::debug!(model = %call.model, bytes = call.content.len(), "sending generateContent request");

        let response = minreq::post(url)
            .with_header("x-goog-api-key", self.api_key.as_str())
            .with_timeout(self.timeout_secs)
            .with_json(&request_body(call))
            .map_err(|e| TransportError::Decode(e.to_string()))?
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let body = response
            .as_str()
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if !(200..300).contains(&response.status_code) {
            tracing::warn!(status = response.status_code, model = %call.model, "generateContent failed");
            return Err(TransportError::Status {
                status: response.status_code,
                body: body.chars().take(500).collect(),
            });
        }

        extract_text(body)
    }
}

fn request_body(call: &ModelCall) -> GenerateContentRequest {
    let (response_mime_type, response_schema) = match &call.response_format {
        ResponseFormat::Text => (None, None),
        ResponseFormat::Json(schema) => (Some("application/json"), Some(schema.clone())),
    };
    let thinking_config = call
        .reasoning_budget
        .map(|thinking_budget| ThinkingConfig { thinking_budget });

    let generation_config = if response_mime_type.is_none() && thinking_config.is_none() {
        None
    } else {
        Some(GenerationConfig {
            response_mime_type,
            response_schema,
            thinking_config,
        })
    };

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: call.system_instruction.clone(),
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: call.content.clone(),
            }],
        }],
        generation_config,
    }
}

/// Concatenate the answer parts of the first candidate.
fn extract_text(body: &str) -> Result<String, TransportError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(TransportError::EmptyResponse)
    } else {
        Ok(text)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn call(format: ResponseFormat, budget: Option<u32>) -> ModelCall {
        ModelCall {
            model: "gemini-3-pro-preview".to_string(),
            content: "USER REQUEST".to_string(),
            system_instruction: "You are an engineer".to_string(),
            response_format: format,
            reasoning_budget: budget,
        }
    }

    #[test]
    fn test_json_request_body_shape() {
        let body = serde_json::to_value(request_body(&call(
            ResponseFormat::Json(buffers_schema()),
            Some(4000),
        )))
        .unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are an engineer");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "USER REQUEST");
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["required"], json!(["html", "css", "js"]));
        assert_eq!(config["thinkingConfig"]["thinkingBudget"], 4000);
    }

    #[test]
    fn test_text_request_omits_generation_config() {
        let body = serde_json::to_value(request_body(&call(ResponseFormat::Text, None))).unwrap();
        assert!(body.get("generationConfig").is_none());
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_extract_text_skips_thoughts() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"planning...","thought":true},
            {"text":"{\"html\":"},
            {"text":"\"\",\"css\":\"\",\"js\":\"\"}"}
        ]}}]}"#;
        assert_eq!(
            extract_text(body).unwrap(),
            r#"{"html":"","css":"","js":""}"#
        );
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        assert_eq!(
            extract_text(r#"{"candidates":[]}"#),
            Err(TransportError::EmptyResponse)
        );
        assert_eq!(extract_text("{}"), Err(TransportError::EmptyResponse));
    }

    #[test]
    fn test_extract_text_rejects_garbage() {
        assert!(matches!(extract_text("<html>502</html>"), Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("k", "https://example.test/v1beta/", 5);
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
