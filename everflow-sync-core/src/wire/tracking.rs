//! `POST /networks/tracking/offers/clicks`.

use serde::{Deserialize, Serialize};

use super::WireBody;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingLinkRequest {
    pub network_affiliate_id: i64,
    pub network_offer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_offer_url_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_traffic_source_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypt_parameters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_redirect_link: Option<bool>,
}

impl TrackingLinkRequest {
    pub fn new(network_affiliate_id: i64, network_offer_id: i64) -> Self {
        Self {
            network_affiliate_id,
            network_offer_id,
            network_tracking_domain_id: None,
            network_offer_url_id: None,
            creative_id: None,
            network_traffic_source_id: None,
            source_id: None,
            sub1: None,
            sub2: None,
            sub3: None,
            sub4: None,
            sub5: None,
            is_encrypt_parameters: None,
            is_redirect_link: None,
        }
    }
}

impl WireBody for TrackingLinkRequest {
    const REQUIRED: &'static [&'static str] = &["network_affiliate_id", "network_offer_id"];
}

/// The Provider echoes the request fields next to the generated URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingLinkResponse {
    pub tracking_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_affiliate_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_offer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_offer_url_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_traffic_source_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypt_parameters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_redirect_link: Option<bool>,
}

impl TrackingLinkResponse {
    pub fn new(tracking_url: impl Into<String>) -> Self {
        Self {
            tracking_url: tracking_url.into(),
            network_affiliate_id: None,
            network_offer_id: None,
            network_tracking_domain_id: None,
            network_offer_url_id: None,
            creative_id: None,
            network_traffic_source_id: None,
            source_id: None,
            sub1: None,
            sub2: None,
            sub3: None,
            sub4: None,
            sub5: None,
            is_encrypt_parameters: None,
            is_redirect_link: None,
        }
    }
}

impl WireBody for TrackingLinkResponse {
    const REQUIRED: &'static [&'static str] = &["tracking_url"];
}
