use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{classify_response, HttpMethod, ProviderClient, ProviderResponse, API_KEY_HEADER};
use crate::config::ProviderConfig;
use crate::error::IntegrationError;

/// reqwest-backed client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpProviderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProviderClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IntegrationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IntegrationError::ProviderTransient(format!("client build failed: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "[PROVIDER] HTTP client initialised");
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build from config; `ProviderDisabled` when no usable key is set.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, IntegrationError> {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Self::new(&config.base_url, key, config.timeout()),
            _ => {
                warn!("[PROVIDER] No API key configured; provider integration disabled");
                Err(IntegrationError::ProviderDisabled)
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

fn transport_error(e: reqwest::Error) -> IntegrationError {
    if e.is_timeout() {
        IntegrationError::ProviderTransient(format!("request timed out: {e}"))
    } else {
        IntegrationError::ProviderTransient(format!("transport error: {e}"))
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, IntegrationError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, has_body = body.is_some(), "[PROVIDER] Sending request");

        let mut request = self
            .http
            .request(Self::method(method), &url)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = body {
            // `.json` also sets `Content-Type: application/json`.
            request = request.json(&body);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                warn!(%method, path, "[PROVIDER] Request cancelled by caller");
                return Err(IntegrationError::Cancelled);
            }
            sent = request.send() => sent.map_err(|e| {
                error!(%method, path, error = ?e, "[PROVIDER] Transport failure");
                transport_error(e)
            })?,
        };

        let status = response.status().as_u16();
        let raw = tokio::select! {
            _ = cancel.cancelled() => return Err(IntegrationError::Cancelled),
            text = response.text() => text.map_err(transport_error)?,
        };

        let result = classify_response(status, path, raw);
        match &result {
            Ok(_) => info!(%method, path, status, "[PROVIDER] Request succeeded"),
            Err(e) => error!(%method, path, status, error = %e, "[PROVIDER] Request failed"),
        }
        result
    }
}
