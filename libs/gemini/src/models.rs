use std::time::Duration;

use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};

pub mod generate_content;

#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    model: String,
    client: Client,
}

impl Models {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .context("api key is not a valid header value")?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        })
    }

    async fn string_response<R: Into<Body>>(
        &self,
        request: R,
        method: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:{}",
                self.base_url, self.model, method
            ))
            .body(request)
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}
