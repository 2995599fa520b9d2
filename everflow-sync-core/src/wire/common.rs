//! Sub-objects shared by advertiser and affiliate bodies.

use serde::{Deserialize, Serialize};

use super::Nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactAddress {
    pub address_1: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub address_2: Nullable<String>,
    pub city: String,
    pub region_code: String,
    pub country_code: String,
    pub zip_postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i32>,
}

impl ContactAddress {
    pub fn new(
        address_1: impl Into<String>,
        city: impl Into<String>,
        region_code: impl Into<String>,
        country_code: impl Into<String>,
        zip_postal_code: impl Into<String>,
    ) -> Self {
        Self {
            address_1: address_1.into(),
            address_2: Nullable::Absent,
            city: city.into(),
            region_code: region_code.into(),
            country_code: country_code.into(),
            zip_postal_code: zip_postal_code.into(),
            country_id: None,
        }
    }
}

/// A login user created alongside an advertiser or affiliate account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_password: Option<String>,
    pub language_id: i32,
    pub timezone_id: i32,
    pub currency_id: String,
}

impl AccountUser {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        account_status: impl Into<String>,
        language_id: i32,
        timezone_id: i32,
        currency_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            account_status: account_status.into(),
            initial_password: None,
            language_id,
            timezone_id,
            currency_id: currency_id.into(),
        }
    }
}
