pub mod implementation;

use serde::{Deserialize, Serialize};

pub trait GenerateContent {
    fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<GenerateContentResponse>>
           + Send;

    /// Single-turn prompt, returning the first candidate's text.
    fn generate_text(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_request_shape() {
        // Arrange
        let request = GenerateContentRequest::from_prompt("Hola");

        // Act
        let json = serde_json::to_value(&request).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Hola" }] }]
            })
        );
    }

    #[test]
    fn test_text_joins_parts_of_first_candidate() {
        let body = r###"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "## Antes" }, { "text": " del show" }]
                    },
                    "finishReason": "STOP"
                },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }"###;

        let response: GenerateContentResponse =
            serde_json::from_str(body).unwrap();

        assert_eq!(response.text().as_deref(), Some("## Antes del show"));
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
    }

    #[test]
    fn test_blocked_response_has_no_text() {
        let body = r#"{ "candidates": [{ "finishReason": "SAFETY" }] }"#;

        let response: GenerateContentResponse =
            serde_json::from_str(body).unwrap();

        assert_eq!(response.text(), None);
        assert_eq!(
            serde_json::from_str::<GenerateContentResponse>("{}")
                .unwrap()
                .text(),
            None
        );
    }
}
