//! Status vocabularies.
//!
//! Advertisers and affiliates share the Provider's account statuses 1:1.
//! Campaigns differ only in `draft`, which the Provider calls `pending`.
//! A local status outside a kind's vocabulary goes out as `pending`, and an
//! unknown Provider status comes back as `pending` (accounts) or `draft` (offers).

use crate::domain::EntityStatus;

pub fn to_account_status(status: EntityStatus) -> &'static str {
    match status {
        EntityStatus::Active => "active",
        EntityStatus::Pending => "pending",
        EntityStatus::Inactive => "inactive",
        EntityStatus::Rejected => "rejected",
        _ => "pending",
    }
}

pub fn from_account_status(status: &str) -> EntityStatus {
    match status {
        "active" => EntityStatus::Active,
        "inactive" => EntityStatus::Inactive,
        "rejected" => EntityStatus::Rejected,
        _ => EntityStatus::Pending,
    }
}

pub fn to_offer_status(status: EntityStatus) -> &'static str {
    match status {
        EntityStatus::Active => "active",
        EntityStatus::Paused => "paused",
        EntityStatus::Archived => "archived",
        _ => "pending",
    }
}

pub fn from_offer_status(status: &str) -> EntityStatus {
    match status {
        "active" => EntityStatus::Active,
        "paused" => EntityStatus::Paused,
        "archived" => EntityStatus::Archived,
        _ => EntityStatus::Draft,
    }
}
