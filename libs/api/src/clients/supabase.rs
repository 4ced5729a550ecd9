use std::time::Duration;

use anyhow::{ensure, Context};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;

/// Row inserts through the PostgREST interface of a Supabase project.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    table: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        table: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(anon_key)
                .context("anon key is not a valid header value")?,
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", anon_key))
                .context("anon key is not a valid header value")?,
        );
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            client,
        })
    }

    pub async fn insert<T: Serialize>(&self, rows: &[T]) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/rest/v1/{}", self.base_url, self.table))
            .json(rows)
            .send()
            .await?;

        let status_code = response.status();
        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            response.text().await
        );

        Ok(())
    }
}
