use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::{with_fetch_context, with_parse_context};

/// HTTP client for JSON APIs with a fixed per-request timeout
#[derive(Clone)]
pub struct JsonClient {
    client: Client,
}

/// Error envelope returned by Google APIs on non-success responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    message: String,
}

impl JsonClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// GET `url` and decode the body as `T`. `label` names the endpoint in errors and logs
    /// so that the full URL (which may carry credentials) is never printed.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, label: &str) -> Result<T> {
        log::debug!("GET {}", label);
        let response = self.send_get_request(url, label).await?;
        let status = response.status();
        let body = with_fetch_context(response.text().await, label)?;

        if !status.is_success() {
            anyhow::bail!("{} returned {}: {}", label, status, Self::error_message(&body));
        }

        with_parse_context(serde_json::from_str(&body), label)
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str, label: &str) -> Result<reqwest::Response> {
        with_fetch_context(self.client.get(url).send().await, label)
    }

    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.code {
                Some(code) => format!("{} (code {})", envelope.error.message, code),
                None => envelope.error.message,
            },
            Err(_) => body.chars().take(200).collect(),
        }
    }
}
