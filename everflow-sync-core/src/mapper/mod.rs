//! # mapper: local entities ⇄ Provider wire bodies
//!
//! One [`EntityMapper`] per kind. Each has three pure operations:
//! - `to_create_request(local, ctx)`
//! - `to_update_request(local, ctx)`
//! - `merge_response(wire, local, origin)`
//!
//! Shared policy lives in sibling modules:
//! - [`defaults`]: every value filled in when the local field is unset,
//! - [`status`]: local ⇄ Provider status vocabularies,
//! - [`identity`]: unique user emails plus label and note injection.
//!
//! ## Merge rules
//! Only whitelisted fields flow back from the Provider. With
//! [`MergeOrigin::Write`] (after create/update) a local field that already holds a
//! value is kept, and so is the status. With [`MergeOrigin::Read`]
//! (`get_from_provider`) the Provider's value wins. Empty strings count as absent.

pub mod advertiser;
pub mod affiliate;
pub mod campaign;
pub mod defaults;
pub mod identity;
pub mod status;
pub mod tracking;

use crate::domain::{EntityKind, LocalEntity, MappingContext};
use crate::error::IntegrationError;
use crate::wire::WireBody;

pub use advertiser::AdvertiserMapper;
pub use affiliate::AffiliateMapper;
pub use campaign::CampaignMapper;

/// Which operation produced the response being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOrigin {
    /// Create or update: the caller supplied the local values in this operation.
    Write,
    /// Read-through: the Provider is the source of truth for whitelisted fields.
    Read,
}

pub trait EntityMapper: Send + Sync {
    type Local: Clone + Send + Sync;
    type Request: WireBody + Send + Sync;
    type Response: WireBody + Send + Sync;

    const KIND: EntityKind;
    /// Collection path, e.g. `/networks/advertisers`.
    const COLLECTION_PATH: &'static str;
    /// Response key holding the Provider id, e.g. `network_advertiser_id`.
    const ID_KEY: &'static str;

    fn local_id(local: &Self::Local) -> i64;

    fn provider_id(response: &Self::Response) -> String;

    /// Provider id from a raw reply that did not decode. A 2xx create still
    /// created the entity, so the id must not be lost.
    fn raw_provider_id(body: &serde_json::Value) -> Option<String> {
        match body.get(Self::ID_KEY)? {
            serde_json::Value::Number(n) => n.as_i64().map(|id| id.to_string()),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok().map(|id| id.to_string()),
            _ => None,
        }
    }

    fn from_entity(entity: LocalEntity) -> Option<Self::Local>;

    fn into_entity(local: Self::Local) -> LocalEntity;

    fn to_create_request(
        &self,
        local: &Self::Local,
        ctx: &MappingContext,
    ) -> Result<Self::Request, IntegrationError>;

    fn to_update_request(
        &self,
        local: &Self::Local,
        ctx: &MappingContext,
    ) -> Result<Self::Request, IntegrationError>;

    fn merge_response(
        &self,
        wire: &Self::Response,
        local: Self::Local,
        origin: MergeOrigin,
    ) -> Self::Local;
}

/// Copy a whitelisted optional value into `target` following the merge rules.
pub(crate) fn merge_field<T: Clone>(target: &mut Option<T>, incoming: Option<&T>, origin: MergeOrigin) {
    let Some(value) = incoming else {
        return;
    };
    match origin {
        MergeOrigin::Read => *target = Some(value.clone()),
        MergeOrigin::Write if target.is_none() => *target = Some(value.clone()),
        MergeOrigin::Write => {}
    }
}

/// [`merge_field`] for strings, ignoring empty Provider values.
pub(crate) fn merge_text(target: &mut Option<String>, incoming: Option<&String>, origin: MergeOrigin) {
    merge_field(target, incoming.filter(|s| !s.trim().is_empty()), origin);
}

/// Provider ids travel as strings in mappings and as integers on the wire.
pub fn parse_provider_id(kind: EntityKind, raw: &str) -> Result<i64, IntegrationError> {
    raw.trim().parse::<i64>().map_err(|_| {
        IntegrationError::MappingInvariantViolation(format!(
            "{kind} mapping holds non-numeric provider id {raw:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_merge_keeps_supplied_values() {
        let mut target = Some("caller".to_string());
        merge_text(&mut target, Some(&"provider".to_string()), MergeOrigin::Write);
        assert_eq!(target.as_deref(), Some("caller"));

        let mut empty: Option<String> = None;
        merge_text(&mut empty, Some(&"provider".to_string()), MergeOrigin::Write);
        assert_eq!(empty.as_deref(), Some("provider"));
    }

    #[test]
    fn read_merge_prefers_provider_but_ignores_blanks() {
        let mut target = Some("caller".to_string());
        merge_text(&mut target, Some(&"".to_string()), MergeOrigin::Read);
        assert_eq!(target.as_deref(), Some("caller"));
        merge_text(&mut target, Some(&"provider".to_string()), MergeOrigin::Read);
        assert_eq!(target.as_deref(), Some("provider"));
    }
}
