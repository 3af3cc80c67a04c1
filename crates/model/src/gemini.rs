//! Google Gemini API client for structured extraction calls.
//!
//! Speaks the native Gemini `generateContent` API:
//! - Auth via `?key=API_KEY` query parameter
//! - Structured output requested with `generationConfig.responseMimeType`
//!   set to `application/json` plus a `responseSchema`
//! - Documents are passed as `file_data` parts carrying a URI the API
//!   fetches itself; TDR stages the bytes first and hands over the URL
//!
//! Exactly one request per stage invocation: no streaming, no retries, no
//! fallback model.

use crate::{ModelClient, ModelError};
use serde_json::Value;
use tdr_types::NonEmptyText;
use tracing::debug;

/// The default Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for all three stages.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A staged file the model should fetch by URI.
#[derive(Debug, Clone)]
pub struct FileRef {
    /// Dereferenceable URI of the staged payload
    pub uri: String,
    /// MIME type of the payload
    pub mime_type: String,
}

/// Configuration for the Gemini client, resolved at startup.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    api_key: NonEmptyText,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl ModelConfig {
    /// Creates a new `ModelConfig` with the default model, base URL and
    /// timeout. The API key must be non-empty.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self, ModelError> {
        let api_key = NonEmptyText::new(api_key).map_err(|_| ModelError::AuthFailed {
            message: "API key cannot be empty".into(),
        })?;
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Gemini API client implementing [`ModelClient`].
pub struct GeminiClient {
    client: reqwest::Client,
    config: ModelConfig,
}

impl GeminiClient {
    /// Creates a new Gemini client from configuration.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ModelError::Connection {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Builds the endpoint URL for a `generateContent` call.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    /// Builds the JSON request body.
    ///
    /// The instruction is always the first part; when a file is supplied it
    /// follows as a `file_data` part the API dereferences itself.
    fn build_request_body(instruction: &str, file: Option<&FileRef>, schema: &Value) -> Value {
        let mut parts = vec![serde_json::json!({ "text": instruction })];
        if let Some(file) = file {
            parts.push(serde_json::json!({
                "file_data": {
                    "mime_type": file.mime_type,
                    "file_uri": file.uri,
                }
            }));
        }

        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": parts,
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
                "temperature": 0.0,
            },
        })
    }

    /// Extracts the structured JSON payload from a Gemini response body.
    ///
    /// With `responseMimeType: application/json` the structured output
    /// arrives as the concatenated text of the first candidate's parts.
    fn parse_response(body: &Value) -> Result<Value, ModelError> {
        let candidates = body["candidates"]
            .as_array()
            .ok_or_else(|| ModelError::ResponseParse {
                message: "missing 'candidates' array in response".into(),
            })?;

        let candidate = candidates.first().ok_or_else(|| ModelError::ResponseParse {
            message: "empty 'candidates' array in response".into(),
        })?;

        let parts = candidate["content"]["parts"]
            .as_array()
            .ok_or_else(|| ModelError::ResponseParse {
                message: "missing 'parts' array in candidate content".into(),
            })?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.is_empty() {
            return Err(ModelError::ResponseParse {
                message: "candidate contained no text parts".into(),
            });
        }

        serde_json::from_str(&text).map_err(|e| ModelError::ResponseParse {
            message: format!("candidate text is not valid JSON: {e}"),
        })
    }

    /// Maps an HTTP error status to the appropriate `ModelError`.
    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> ModelError {
        match status.as_u16() {
            401 | 403 => ModelError::AuthFailed {
                message: format!("HTTP {status} from Gemini API"),
            },
            _ => ModelError::ApiRequest {
                message: format!("HTTP {status} from Gemini API: {body_text}"),
            },
        }
    }

    /// Maps a reqwest transport error to the appropriate `ModelError`.
    fn map_transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if err.is_connect() {
            ModelError::Connection {
                message: err.to_string(),
            }
        } else {
            ModelError::ApiRequest {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for GeminiClient {
    async fn generate_structured(
        &self,
        instruction: &str,
        file: Option<&FileRef>,
        schema: &Value,
    ) -> Result<Value, ModelError> {
        let body = Self::build_request_body(instruction, file, schema);

        debug!(model = %self.config.model, has_file = file.is_some(), "issuing structured model call");
        let resp = self
            .client
            .post(self.endpoint_url())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body_text));
        }

        let body: Value = resp.json().await.map_err(|e| ModelError::ResponseParse {
            message: format!("response body is not JSON: {e}"),
        })?;

        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_api_key() {
        assert!(matches!(
            ModelConfig::new("  "),
            Err(ModelError::AuthFailed { .. })
        ));
    }

    #[test]
    fn test_request_body_includes_schema_and_file() {
        let schema = serde_json::json!({"type": "object"});
        let file = FileRef {
            uri: "https://blob.example.com/1-rfp.pdf".into(),
            mime_type: "application/pdf".into(),
        };
        let body = GeminiClient::build_request_body("Extract requirements.", Some(&file), &schema);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Extract requirements.");
        assert_eq!(
            body["contents"][0]["parts"][1]["file_data"]["file_uri"],
            "https://blob.example.com/1-rfp.pdf"
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_request_body_without_file_has_single_part() {
        let schema = serde_json::json!({"type": "object"});
        let body = GeminiClient::build_request_body("Compare bids.", None, &schema);
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_response_concatenates_text_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "{\"title\":"},
                        {"text": "\"Acme\"}"}
                    ]
                }
            }]
        });
        let value = GeminiClient::parse_response(&body).unwrap();
        assert_eq!(value["title"], "Acme");
    }

    #[test]
    fn test_parse_response_missing_candidates() {
        let body = serde_json::json!({"error": "nope"});
        assert!(matches!(
            GeminiClient::parse_response(&body),
            Err(ModelError::ResponseParse { .. })
        ));
    }

    #[test]
    fn test_parse_response_non_json_text() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{"text": "not json"}] }
            }]
        });
        assert!(matches!(
            GeminiClient::parse_response(&body),
            Err(ModelError::ResponseParse { .. })
        ));
    }

    #[test]
    fn test_map_http_error_auth() {
        let err = GeminiClient::map_http_error(reqwest::StatusCode::FORBIDDEN, "denied");
        assert!(matches!(err, ModelError::AuthFailed { .. }));
    }
}
