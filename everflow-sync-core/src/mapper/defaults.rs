//! Values the mappers fill in when the local model leaves a Provider-required
//! field unset. A populated local field always overrides these.

pub const CURRENCY_ID: &str = "USD";
pub const REPORTING_TIMEZONE_ID: i32 = 80;
pub const NETWORK_EMPLOYEE_ID: i64 = 1;
pub const ATTRIBUTION_METHOD: &str = "last_touch";
pub const EMAIL_ATTRIBUTION_METHOD: &str = "last_affiliate_attribution";
pub const ATTRIBUTION_PRIORITY: &str = "click";
pub const SESSION_DEFINITION: &str = "cookie";
/// Hours.
pub const SESSION_DURATION: i32 = 24;
pub const VISIBILITY: &str = "public";
pub const CONVERSION_METHOD: &str = "server_postback";
pub const REDIRECT_MODE: &str = "standard";

pub const ADVERTISER_BILLING_FREQUENCY: &str = "manual";
pub const ADVERTISER_PAYMENT_TERMS: i32 = 0;

pub const AFFILIATE_BILLING_FREQUENCY: &str = "monthly";
pub const AFFILIATE_PAYMENT_TYPE: &str = "none";
pub const AFFILIATE_BILLING_DAY_OF_MONTH: i32 = 1;

pub const PAYOUT_TYPE: &str = "cpa";
pub const REVENUE_TYPE: &str = "rpa";

pub const USER_ACCOUNT_STATUS: &str = "active";
/// English.
pub const USER_LANGUAGE_ID: i32 = 1;

/// Mail domain for generated users when the entity has no contact email.
pub const FALLBACK_EMAIL_DOMAIN: &str = "everflow-test.com";

/// Provider country ids for the countries the platform onboards.
pub fn country_id(country_code: &str) -> Option<i32> {
    match country_code.to_ascii_uppercase().as_str() {
        "US" => Some(1),
        "CA" => Some(36),
        _ => None,
    }
}
