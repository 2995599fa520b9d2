//! # client: transport to the Provider
//!
//! [`ProviderClient`] is the single seam between the core and the network. It
//! takes an already-encoded JSON body and returns the status, the decoded JSON
//! and the raw text, classifying failures into the error taxonomy:
//!
//! | outcome                              | result                              |
//! |--------------------------------------|-------------------------------------|
//! | 2xx                                  | `Ok(ProviderResponse)`              |
//! | 404 on a path naming a provider id   | `ProviderNotFound`                  |
//! | other 4xx                            | `ProviderRejected { status, body }` |
//! | 5xx, connect error, timeout          | `ProviderTransient`                 |
//! | caller's token cancelled             | `Cancelled`                         |
//!
//! Implementations never retry; retrying is the sweeper's job.
//!
//! ## Implementations
//! - [`HttpProviderClient`]: reqwest, one pooled client per base URL.
//! - [`StubProviderClient`]: in-process, deterministic ids; used for mock mode.
//! - `MockProviderClient`: generated by mockall for tests.

mod http;
mod stub;

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::IntegrationError;

pub use http::HttpProviderClient;
pub use stub::StubProviderClient;

/// Header carrying the Provider API key on every request.
pub const API_KEY_HEADER: &str = "X-Eflow-API-Key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful (2xx) Provider reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    /// Parsed body; `Value::Null` for an empty body.
    pub body: Value,
    pub raw: String,
}

impl ProviderResponse {
    pub fn new(status: u16, body: Value) -> Self {
        let raw = body.to_string();
        Self { status, body, raw }
    }
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issue one request. `path` is relative to the configured base URL and
    /// starts with `/`.
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, IntegrationError>;
}

/// True when some segment of `path` is a numeric Provider id, e.g.
/// `/networks/advertisers/999` or `/networks/offers/20/tags`.
pub fn targets_provider_id(path: &str) -> bool {
    path.split('/')
        .any(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

/// Turn a status and raw body into the client contract's result.
pub fn classify_response(
    status: u16,
    path: &str,
    raw: String,
) -> Result<ProviderResponse, IntegrationError> {
    match status {
        200..=299 => {
            let body = if raw.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    IntegrationError::MalformedResponse(crate::error::WireError::Invalid(
                        e.to_string(),
                    ))
                })?
            };
            Ok(ProviderResponse { status, body, raw })
        }
        404 if targets_provider_id(path) => Err(IntegrationError::ProviderNotFound {
            path: path.to_string(),
        }),
        400..=499 => Err(IntegrationError::ProviderRejected { status, body: raw }),
        500..=599 => Err(IntegrationError::ProviderTransient(format!(
            "status {status}: {raw}"
        ))),
        _ => Err(IntegrationError::ProviderRejected { status, body: raw }),
    }
}
