//! `/networks/advertisers` bodies.
//!
//! The Provider uses the same body for `POST` and `PUT`, so [`AdvertiserRequest`]
//! serves both; the mapper simply leaves `users` unset on update.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{AccountUser, ContactAddress};
use super::{Nullable, WireBody};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExposedVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_url: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub1: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub3: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub4: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub5: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvertiserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_variables: Option<ExposedVariables>,
}

/// Invoice schedule. Which keys apply depends on `billing_frequency`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingScheduleDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month_one: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month_two: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_month: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvertiserBilling {
    pub billing_frequency: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tax_id: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_invoice_creation_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_amount_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub auto_invoice_start_date: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_invoice_is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_generation_days_delay: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_terms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BillingScheduleDetails>,
}

impl AdvertiserBilling {
    pub fn new(billing_frequency: impl Into<String>) -> Self {
        Self {
            billing_frequency: billing_frequency.into(),
            tax_id: Nullable::Absent,
            is_invoice_creation_auto: None,
            invoice_amount_threshold: None,
            auto_invoice_start_date: Nullable::Absent,
            default_invoice_is_hidden: None,
            invoice_generation_days_delay: None,
            default_payment_terms: None,
            details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvertiserRequest {
    pub name: String,
    pub account_status: String,
    pub network_employee_id: i64,
    pub default_currency_id: String,
    pub reporting_timezone_id: i32,
    pub attribution_method: String,
    pub email_attribution_method: String,
    pub attribution_priority: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sales_manager_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_contact_address_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id_macro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id_macro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expose_publisher_reporting_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<ContactAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<AccountUser>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<AdvertiserBilling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AdvertiserSettings>,
}

impl AdvertiserRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        account_status: impl Into<String>,
        network_employee_id: i64,
        default_currency_id: impl Into<String>,
        reporting_timezone_id: i32,
        attribution_method: impl Into<String>,
        email_attribution_method: impl Into<String>,
        attribution_priority: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_status: account_status.into(),
            network_employee_id,
            default_currency_id: default_currency_id.into(),
            reporting_timezone_id,
            attribution_method: attribution_method.into(),
            email_attribution_method: email_attribution_method.into(),
            attribution_priority: attribution_priority.into(),
            sales_manager_id: Nullable::Absent,
            internal_notes: None,
            address_id: None,
            is_contact_address_enabled: None,
            platform_name: None,
            platform_url: None,
            platform_username: None,
            accounting_contact_email: None,
            verification_token: None,
            offer_id_macro: None,
            affiliate_id_macro: None,
            is_expose_publisher_reporting_data: None,
            contact_address: None,
            labels: None,
            users: None,
            billing: None,
            settings: None,
        }
    }
}

impl WireBody for AdvertiserRequest {
    const REQUIRED: &'static [&'static str] = &[
        "name",
        "account_status",
        "network_employee_id",
        "default_currency_id",
        "reporting_timezone_id",
        "attribution_method",
        "email_attribution_method",
        "attribution_priority",
    ];
}

/// Advertiser as returned by create and get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvertiserResponse {
    pub network_advertiser_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_employee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sales_manager_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_timezone_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_attribution_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_contact_address_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id_macro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id_macro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expose_publisher_reporting_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<i64>,
    /// Labels, billing, settings and other expansions; kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Value>,
}

impl AdvertiserResponse {
    /// Only the id is guaranteed; everything else the Provider may leave out.
    pub fn new(network_advertiser_id: i64) -> Self {
        Self {
            network_advertiser_id,
            name: None,
            account_status: None,
            network_id: None,
            network_employee_id: None,
            sales_manager_id: Nullable::Absent,
            default_currency_id: None,
            reporting_timezone_id: None,
            attribution_method: None,
            email_attribution_method: None,
            attribution_priority: None,
            internal_notes: None,
            address_id: None,
            is_contact_address_enabled: None,
            platform_name: None,
            platform_url: None,
            platform_username: None,
            accounting_contact_email: None,
            verification_token: None,
            offer_id_macro: None,
            affiliate_id_macro: None,
            is_expose_publisher_reporting_data: None,
            time_created: None,
            time_saved: None,
            relationship: None,
        }
    }
}

impl WireBody for AdvertiserResponse {
    const REQUIRED: &'static [&'static str] = &["network_advertiser_id"];
}
