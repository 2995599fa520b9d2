//! # domain: local entities as the core sees them
//!
//! The surrounding platform owns these records; the core only reads them, and
//! the mappers merge a whitelisted subset of Provider fields back into copies
//! it returns to the caller. Fields the core does not look at are not modelled.
//!
//! ## Types
//! - [`EntityKind`]: which family of mapping/endpoint an operation targets.
//! - [`EntityStatus`]: the union of local status vocabularies. Advertisers and
//!   affiliates use active/pending/inactive/rejected, campaigns use
//!   active/paused/draft/archived.
//! - [`Advertiser`], [`Affiliate`], [`Campaign`] and the [`LocalEntity`] enum.
//! - [`MappingContext`]: caller-supplied correlation data injected into
//!   Provider labels and notes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Advertiser,
    Affiliate,
    Campaign,
    TrackingLink,
}

impl EntityKind {
    /// Kinds the sweeper reconciles, in dependency order (campaigns need advertisers).
    pub const SWEEPABLE: [EntityKind; 3] = [
        EntityKind::Advertiser,
        EntityKind::Affiliate,
        EntityKind::Campaign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Advertiser => "advertiser",
            EntityKind::Affiliate => "affiliate",
            EntityKind::Campaign => "campaign",
            EntityKind::TrackingLink => "tracking_link",
        }
    }

    /// Plural form used by the sweep report and the `--entities` flag.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Advertiser => "advertisers",
            EntityKind::Affiliate => "affiliates",
            EntityKind::Campaign => "campaigns",
            EntityKind::TrackingLink => "tracking_links",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advertiser" | "advertisers" => Ok(EntityKind::Advertiser),
            "affiliate" | "affiliates" | "partner" | "partners" => Ok(EntityKind::Affiliate),
            "campaign" | "campaigns" | "offer" | "offers" => Ok(EntityKind::Campaign),
            "tracking_link" | "tracking_links" => Ok(EntityKind::TrackingLink),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Pending,
    Inactive,
    Rejected,
    Paused,
    Draft,
    Archived,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "active",
            EntityStatus::Pending => "pending",
            EntityStatus::Inactive => "inactive",
            EntityStatus::Rejected => "rejected",
            EntityStatus::Paused => "paused",
            EntityStatus::Draft => "draft",
            EntityStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    /// ISO 3166 alpha-2 country code.
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingSchedule {
    #[serde(default)]
    pub day_of_week: Option<i32>,
    #[serde(default)]
    pub day_of_month: Option<i32>,
    #[serde(default)]
    pub day_of_month_one: Option<i32>,
    #[serde(default)]
    pub day_of_month_two: Option<i32>,
    #[serde(default)]
    pub starting_month: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingDetails {
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub is_invoice_creation_auto: Option<bool>,
    #[serde(default)]
    pub auto_invoice_start_date: Option<String>,
    #[serde(default)]
    pub default_invoice_is_hidden: Option<bool>,
    #[serde(default)]
    pub invoice_generation_days_delay: Option<i32>,
    #[serde(default)]
    pub default_payment_terms: Option<i32>,
    #[serde(default)]
    pub invoice_amount_threshold: Option<f64>,
    #[serde(default)]
    pub schedule: Option<BillingSchedule>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertiser {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub status: EntityStatus,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub billing_details: Option<BillingDetails>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub default_currency_id: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub platform_url: Option<String>,
    #[serde(default)]
    pub platform_username: Option<String>,
    #[serde(default)]
    pub accounting_contact_email: Option<String>,
    #[serde(default)]
    pub offer_id_macro: Option<String>,
    #[serde(default)]
    pub affiliate_id_macro: Option<String>,
    #[serde(default)]
    pub attribution_method: Option<String>,
    #[serde(default)]
    pub email_attribution_method: Option<String>,
    #[serde(default)]
    pub attribution_priority: Option<String>,
    #[serde(default)]
    pub reporting_timezone_id: Option<i32>,
    #[serde(default)]
    pub is_expose_publisher_reporting_data: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Advertiser {
    /// Minimal advertiser carrying only the identity fields.
    pub fn new(id: i64, organization_id: i64, name: impl Into<String>, status: EntityStatus) -> Self {
        Self {
            id,
            organization_id,
            name: name.into(),
            status,
            contact_email: None,
            billing_details: None,
            internal_notes: None,
            default_currency_id: None,
            platform_name: None,
            platform_url: None,
            platform_username: None,
            accounting_contact_email: None,
            offer_id_macro: None,
            affiliate_id_macro: None,
            attribution_method: None,
            email_attribution_method: None,
            attribution_priority: None,
            reporting_timezone_id: None,
            is_expose_publisher_reporting_data: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffiliateBilling {
    #[serde(default)]
    pub billing_frequency: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub day_of_month: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub routing_number: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_address: Option<String>,
    #[serde(default)]
    pub swift_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub paxum_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub status: EntityStatus,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub default_currency_id: Option<String>,
    #[serde(default)]
    pub network_employee_id: Option<i64>,
    #[serde(default)]
    pub referrer_id: Option<i64>,
    #[serde(default)]
    pub enable_media_cost_tracking_links: Option<bool>,
    #[serde(default)]
    pub network_affiliate_tier_id: Option<i64>,
    #[serde(default)]
    pub billing: Option<AffiliateBilling>,
    #[serde(default)]
    pub invoice_amount_threshold: Option<f64>,
    #[serde(default)]
    pub default_payment_terms: Option<i32>,
    #[serde(default)]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Affiliate {
    pub fn new(id: i64, organization_id: i64, name: impl Into<String>, status: EntityStatus) -> Self {
        Self {
            id,
            organization_id,
            name: name.into(),
            status,
            contact_email: None,
            internal_notes: None,
            default_currency_id: None,
            network_employee_id: None,
            referrer_id: None,
            enable_media_cost_tracking_links: None,
            network_affiliate_tier_id: None,
            billing: None,
            invoice_amount_threshold: None,
            default_payment_terms: None,
            payment_details: None,
            address: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignCaps {
    #[serde(default)]
    pub daily_conversion_cap: Option<i32>,
    #[serde(default)]
    pub weekly_conversion_cap: Option<i32>,
    #[serde(default)]
    pub monthly_conversion_cap: Option<i32>,
    #[serde(default)]
    pub global_conversion_cap: Option<i32>,
    #[serde(default)]
    pub daily_click_cap: Option<i32>,
    #[serde(default)]
    pub weekly_click_cap: Option<i32>,
    #[serde(default)]
    pub monthly_click_cap: Option<i32>,
    #[serde(default)]
    pub global_click_cap: Option<i32>,
    #[serde(default)]
    pub caps_timezone_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub organization_id: i64,
    pub advertiser_id: i64,
    pub name: String,
    pub status: EntityStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub server_side_url: Option<String>,
    #[serde(default)]
    pub is_view_through_enabled: Option<bool>,
    #[serde(default)]
    pub view_through_destination_url: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub conversion_method: Option<String>,
    #[serde(default)]
    pub session_definition: Option<String>,
    #[serde(default)]
    pub session_duration: Option<i32>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub redirect_mode: Option<String>,
    #[serde(default)]
    pub attribution_method: Option<String>,
    #[serde(default)]
    pub email_attribution_method: Option<String>,
    #[serde(default)]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default)]
    pub network_category_id: Option<i64>,
    #[serde(default)]
    pub caps: Option<CampaignCaps>,
    #[serde(default)]
    pub payout_type: Option<String>,
    #[serde(default)]
    pub payout_amount: Option<f64>,
    #[serde(default)]
    pub revenue_type: Option<String>,
    #[serde(default)]
    pub revenue_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn new(
        id: i64,
        organization_id: i64,
        advertiser_id: i64,
        name: impl Into<String>,
        status: EntityStatus,
    ) -> Self {
        Self {
            id,
            organization_id,
            advertiser_id,
            name: name.into(),
            status,
            description: None,
            destination_url: None,
            thumbnail_url: None,
            preview_url: None,
            server_side_url: None,
            is_view_through_enabled: None,
            view_through_destination_url: None,
            internal_notes: None,
            visibility: None,
            currency_id: None,
            conversion_method: None,
            session_definition: None,
            session_duration: None,
            terms_and_conditions: None,
            end_date: None,
            redirect_mode: None,
            attribution_method: None,
            email_attribution_method: None,
            network_tracking_domain_id: None,
            network_category_id: None,
            caps: None,
            payout_type: None,
            payout_amount: None,
            revenue_type: None,
            revenue_amount: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Any sweepable local entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocalEntity {
    Advertiser(Advertiser),
    Affiliate(Affiliate),
    Campaign(Campaign),
}

impl LocalEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            LocalEntity::Advertiser(_) => EntityKind::Advertiser,
            LocalEntity::Affiliate(_) => EntityKind::Affiliate,
            LocalEntity::Campaign(_) => EntityKind::Campaign,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            LocalEntity::Advertiser(a) => a.id,
            LocalEntity::Affiliate(a) => a.id,
            LocalEntity::Campaign(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LocalEntity::Advertiser(a) => &a.name,
            LocalEntity::Affiliate(a) => &a.name,
            LocalEntity::Campaign(c) => &c.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

/// Correlation data the mappers inject into Provider labels and notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingContext {
    #[serde(default)]
    pub organization: Option<Organization>,
    /// Subject of the acting user, recorded as `User ID: <sub>`.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Provider id of the campaign's advertiser. Resolved by the integration
    /// service from the advertiser mapping when not supplied.
    #[serde(default)]
    pub network_advertiser_id: Option<i64>,
}

impl MappingContext {
    pub fn with_organization(mut self, id: i64, name: impl Into<String>) -> Self {
        self.organization = Some(Organization {
            id,
            name: name.into(),
        });
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Caller input for tracking-link issuance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingLinkInput {
    pub affiliate_id: i64,
    pub campaign_id: i64,
    #[serde(default)]
    pub network_tracking_domain_id: Option<i64>,
    #[serde(default)]
    pub network_offer_url_id: Option<i64>,
    #[serde(default)]
    pub creative_id: Option<i64>,
    #[serde(default)]
    pub network_traffic_source_id: Option<i64>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub sub1: Option<String>,
    #[serde(default)]
    pub sub2: Option<String>,
    #[serde(default)]
    pub sub3: Option<String>,
    #[serde(default)]
    pub sub4: Option<String>,
    #[serde(default)]
    pub sub5: Option<String>,
    #[serde(default)]
    pub is_encrypt_parameters: Option<bool>,
    #[serde(default)]
    pub is_redirect_link: Option<bool>,
}

impl TrackingLinkInput {
    pub fn new(affiliate_id: i64, campaign_id: i64) -> Self {
        Self {
            affiliate_id,
            campaign_id,
            ..Default::default()
        }
    }
}
