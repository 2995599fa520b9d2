//! `/networks/affiliates` bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{AccountUser, ContactAddress};
use super::{Nullable, WireBody};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliateBillingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliatePayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paxum_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliateBilling {
    pub billing_frequency: String,
    pub payment_type: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tax_id: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AffiliateBillingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_amount_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_terms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<AffiliatePayment>,
}

impl AffiliateBilling {
    pub fn new(billing_frequency: impl Into<String>, payment_type: impl Into<String>) -> Self {
        Self {
            billing_frequency: billing_frequency.into(),
            payment_type: payment_type.into(),
            tax_id: Nullable::Absent,
            details: None,
            invoice_amount_threshold: None,
            default_payment_terms: None,
            payment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliateRequest {
    pub name: String,
    pub account_status: String,
    pub network_employee_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_media_cost_tracking_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub referrer_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_contact_address_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub network_affiliate_tier_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<ContactAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<AffiliateBilling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<AccountUser>>,
}

impl AffiliateRequest {
    pub fn new(
        name: impl Into<String>,
        account_status: impl Into<String>,
        network_employee_id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            account_status: account_status.into(),
            network_employee_id,
            default_currency_id: None,
            internal_notes: None,
            enable_media_cost_tracking_links: None,
            referrer_id: Nullable::Absent,
            is_contact_address_enabled: None,
            network_affiliate_tier_id: Nullable::Absent,
            contact_address: None,
            labels: None,
            billing: None,
            users: None,
        }
    }
}

impl WireBody for AffiliateRequest {
    const REQUIRED: &'static [&'static str] = &["name", "account_status", "network_employee_id"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliateResponse {
    pub network_affiliate_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_employee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_media_cost_tracking_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub referrer_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub network_affiliate_tier_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_contact_address_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Value>,
}

impl AffiliateResponse {
    pub fn new(network_affiliate_id: i64) -> Self {
        Self {
            network_affiliate_id,
            name: None,
            account_status: None,
            network_id: None,
            network_employee_id: None,
            default_currency_id: None,
            internal_notes: None,
            enable_media_cost_tracking_links: None,
            referrer_id: Nullable::Absent,
            network_affiliate_tier_id: Nullable::Absent,
            is_contact_address_enabled: None,
            time_created: None,
            time_saved: None,
            relationship: None,
        }
    }
}

impl WireBody for AffiliateResponse {
    const REQUIRED: &'static [&'static str] = &["network_affiliate_id"];
}
