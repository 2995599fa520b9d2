use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{HttpMethod, ProviderClient, ProviderResponse};
use crate::error::IntegrationError;

/// In-process stand-in for the Provider, selected by `provider.mock_mode`.
///
/// Creates get ids from a per-instance counter starting at `first_id`, so a
/// fresh stub always hands out the same sequence.
pub struct StubProviderClient {
    next_id: AtomicI64,
}

impl Default for StubProviderClient {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl StubProviderClient {
    pub fn new(first_id: i64) -> Self {
        Self {
            next_id: AtomicI64::new(first_id),
        }
    }

    fn allocate(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn create(&self, collection: &str, body: &Value) -> Option<Value> {
        let id = self.allocate();
        let name = body.get("name").cloned().unwrap_or(Value::Null);
        match collection {
            "advertisers" => Some(json!({
                "network_advertiser_id": id,
                "name": name,
                "account_status": body.get("account_status").cloned().unwrap_or(Value::Null),
            })),
            "affiliates" => Some(json!({
                "network_affiliate_id": id,
                "name": name,
                "account_status": body.get("account_status").cloned().unwrap_or(Value::Null),
            })),
            "offers" => Some(json!({
                "network_offer_id": id,
                "name": name,
                "offer_status": body.get("offer_status").cloned().unwrap_or(Value::Null),
                "network_advertiser_id": body.get("network_advertiser_id").cloned().unwrap_or(Value::Null),
            })),
            _ => None,
        }
    }

    fn fetch(collection: &str, id: i64) -> Option<Value> {
        match collection {
            "advertisers" => Some(json!({
                "network_advertiser_id": id,
                "name": format!("stub advertiser {id}"),
                "account_status": "active",
            })),
            "affiliates" => Some(json!({
                "network_affiliate_id": id,
                "name": format!("stub affiliate {id}"),
                "account_status": "active",
            })),
            "offers" => Some(json!({
                "network_offer_id": id,
                "name": format!("stub offer {id}"),
                "offer_status": "active",
            })),
            _ => None,
        }
    }

    fn tracking(body: &Value) -> Value {
        let affiliate = body.get("network_affiliate_id").cloned().unwrap_or(Value::Null);
        let offer = body.get("network_offer_id").cloned().unwrap_or(Value::Null);
        json!({
            "tracking_url": format!("https://stub.eflow.local/{affiliate}/{offer}"),
            "network_affiliate_id": affiliate,
            "network_offer_id": offer,
        })
    }
}

#[async_trait]
impl ProviderClient for StubProviderClient {
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, IntegrationError> {
        if cancel.is_cancelled() {
            return Err(IntegrationError::Cancelled);
        }
        info!(%method, path, "[PROVIDER][STUB] Answering in-process");

        let body = body.unwrap_or(Value::Null);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let reply = match (method, segments.as_slice()) {
            (HttpMethod::Post, ["networks", "tracking", "offers", "clicks"]) => {
                Some(Self::tracking(&body))
            }
            (HttpMethod::Post, ["networks", collection]) => self.create(collection, &body),
            (HttpMethod::Post, ["networks", _, _, "tags"]) => Some(json!({ "result": true })),
            (HttpMethod::Put, ["networks", _, _]) => Some(json!({ "result": true })),
            (HttpMethod::Get, ["networks", collection, id]) => id
                .parse::<i64>()
                .ok()
                .and_then(|id| Self::fetch(collection, id)),
            (HttpMethod::Post, ["advertisers", "reporting", "entity"]) => {
                Some(json!({ "table": [], "incomplete_results": false }))
            }
            (HttpMethod::Post, ["advertisers", "reporting", "conversions"]) => {
                Some(json!({ "conversions": [] }))
            }
            _ => None,
        };

        match reply {
            Some(value) => Ok(ProviderResponse::new(200, value)),
            None => Err(IntegrationError::ProviderRejected {
                status: 404,
                body: json!({ "error": format!("stub has no route for {method} {path}") })
                    .to_string(),
            }),
        }
    }
}
