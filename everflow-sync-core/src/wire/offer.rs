//! `/networks/offers` bodies. Locally these are campaigns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Nullable, WireBody};

/// One entry of `payout_revenue`. Exactly one entry per offer carries `is_default = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayoutRevenue {
    pub payout_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_percentage: Option<i32>,
    pub revenue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_percentage: Option<i32>,
    pub is_default: bool,
    pub is_allow_duplicate_conversion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_name: Option<String>,
}

impl PayoutRevenue {
    pub fn new(
        payout_type: impl Into<String>,
        revenue_type: impl Into<String>,
        is_default: bool,
        is_allow_duplicate_conversion: bool,
    ) -> Self {
        Self {
            payout_type: payout_type.into(),
            payout_amount: None,
            payout_percentage: None,
            revenue_type: revenue_type.into(),
            revenue_amount: None,
            revenue_percentage: None,
            is_default,
            is_allow_duplicate_conversion,
            entry_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferRequest {
    pub network_advertiser_id: i64,
    pub name: String,
    pub destination_url: String,
    pub offer_status: String,
    pub payout_revenue: Vec<PayoutRevenue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_view_through_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_through_destination_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_using_explicit_terms_and_conditions: Option<bool>,
    /// `YYYY-MM-DD`; explicit `null` removes an end date.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub date_live_until: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_use_secure_link: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_caps_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caps_timezone_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_conversion_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_conversion_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_conversion_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_conversion_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_click_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_click_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_click_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_click_cap: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl OfferRequest {
    pub fn new(
        network_advertiser_id: i64,
        name: impl Into<String>,
        destination_url: impl Into<String>,
        offer_status: impl Into<String>,
        payout_revenue: Vec<PayoutRevenue>,
    ) -> Self {
        Self {
            network_advertiser_id,
            name: name.into(),
            destination_url: destination_url.into(),
            offer_status: offer_status.into(),
            payout_revenue,
            network_tracking_domain_id: None,
            network_category_id: None,
            thumbnail_url: None,
            preview_url: None,
            server_side_url: None,
            is_view_through_enabled: None,
            view_through_destination_url: None,
            internal_notes: None,
            currency_id: None,
            conversion_method: None,
            session_definition: None,
            session_duration: None,
            attribution_method: None,
            email_attribution_method: None,
            redirect_mode: None,
            visibility: None,
            html_description: None,
            terms_and_conditions: None,
            is_using_explicit_terms_and_conditions: None,
            date_live_until: Nullable::Absent,
            is_use_secure_link: None,
            is_caps_enabled: None,
            caps_timezone_id: None,
            daily_conversion_cap: None,
            weekly_conversion_cap: None,
            monthly_conversion_cap: None,
            global_conversion_cap: None,
            daily_click_cap: None,
            weekly_click_cap: None,
            monthly_click_cap: None,
            global_click_cap: None,
            labels: None,
        }
    }
}

impl WireBody for OfferRequest {
    const REQUIRED: &'static [&'static str] = &[
        "network_advertiser_id",
        "name",
        "destination_url",
        "offer_status",
        "payout_revenue",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferResponse {
    pub network_offer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_advertiser_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_revenue: Option<Vec<PayoutRevenue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Value>,
}

impl OfferResponse {
    pub fn new(network_offer_id: i64) -> Self {
        Self {
            network_offer_id,
            name: None,
            offer_status: None,
            network_id: None,
            network_advertiser_id: None,
            destination_url: None,
            thumbnail_url: None,
            preview_url: None,
            internal_notes: None,
            currency_id: None,
            conversion_method: None,
            session_definition: None,
            session_duration: None,
            attribution_method: None,
            email_attribution_method: None,
            redirect_mode: None,
            visibility: None,
            html_description: None,
            network_tracking_domain_id: None,
            payout_revenue: None,
            time_created: None,
            time_saved: None,
            relationship: None,
        }
    }
}

impl WireBody for OfferResponse {
    const REQUIRED: &'static [&'static str] = &["network_offer_id"];
}
