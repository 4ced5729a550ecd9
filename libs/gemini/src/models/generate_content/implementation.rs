use anyhow::{anyhow, Context};
use tracing::debug;

use crate::models::Models;

use super::{GenerateContent, GenerateContentRequest, GenerateContentResponse};

impl GenerateContent for Models {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let body = serde_json::to_string(&request)
            .context("failed to serialize request")?;
        let text = self.string_response(body, "generateContent").await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }

    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self
            .generate_content(GenerateContentRequest::from_prompt(prompt))
            .await?;

        debug!(
            task = "generate text",
            model = %self.model,
            candidates = response.candidates.len()
        );

        response
            .text()
            .ok_or_else(|| anyhow!("model returned no text"))
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    async fn fake_gemini(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{address}")
    }

    #[tokio::test]
    async fn test_generate_text() {
        // Arrange
        let handler = |Path(call): Path<String>,
                       headers: HeaderMap,
                       Json(body): Json<Value>| async move {
            assert_eq!(call, "gemini-test:generateContent");
            assert_eq!(headers["x-goog-api-key"], "secret");
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            let part = json!({ "text": format!("re: {prompt}") });
            Json(json!({
                "candidates": [{ "content": { "parts": [part] } }]
            }))
        };
        let router =
            Router::new().route("/v1beta/models/:call", post(handler));
        let base_url = fake_gemini(router).await;
        let models = Models::new(
            "secret",
            &base_url,
            "gemini-test",
            Duration::from_secs(5),
        )
        .unwrap();

        // Act
        let text = models.generate_text("hola").await.unwrap();

        // Assert
        assert_eq!(text, "re: hola");
    }

    #[tokio::test]
    async fn test_generate_text_surfaces_upstream_errors() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota") }),
        );
        let base_url = fake_gemini(router).await;
        let models = Models::new(
            "secret",
            &base_url,
            "gemini-test",
            Duration::from_secs(5),
        )
        .unwrap();

        let result = models.generate_text("hola").await;

        let error = result.unwrap_err().to_string();
        assert!(error.contains("429"), "{error}");
    }
}
