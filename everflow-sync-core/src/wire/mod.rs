//! # wire: Provider request and response bodies
//!
//! One submodule per Provider resource. Every body type:
//! - has a `new` constructor whose arguments are exactly the Provider's required fields,
//! - exposes optional fields as public `Option`/[`Nullable`] members that are omitted
//!   from the wire when unset,
//! - serialises with the Provider's snake_case keys and rejects unknown keys on decode
//!   (`deny_unknown_fields`), so schema drift surfaces as [`WireError::UnknownField`].
//!
//! Decoding goes through [`WireBody::decode`], which reports the first absent required
//! key as [`WireError::MissingRequiredField`] instead of zero-filling it.

pub mod advertiser;
pub mod affiliate;
pub mod common;
pub mod nullable;
pub mod offer;
pub mod reporting;
pub mod tracking;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WireError;

pub use nullable::Nullable;

/// A top-level Provider body.
pub trait WireBody: Serialize + DeserializeOwned {
    /// Keys the Provider marks as required, checked before deserialising.
    const REQUIRED: &'static [&'static str];

    fn encode(&self) -> Result<Value, WireError> {
        serde_json::to_value(self).map_err(|e| WireError::Invalid(e.to_string()))
    }

    fn decode(value: &Value) -> Result<Self, WireError> {
        let object = value.as_object().ok_or(WireError::NotAnObject)?;
        if let Some(missing) = Self::REQUIRED.iter().find(|key| !object.contains_key(**key)) {
            return Err(WireError::MissingRequiredField((*missing).to_string()));
        }
        serde_json::from_value(value.clone()).map_err(classify_serde_error)
    }

    fn decode_str(raw: &str) -> Result<Self, WireError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| WireError::Invalid(e.to_string()))?;
        Self::decode(&value)
    }
}

/// Maps serde's messages for nested bodies onto the typed variants.
pub(crate) fn classify_serde_error(err: serde_json::Error) -> WireError {
    let message = err.to_string();
    if let Some(field) = backticked_after(&message, "missing field `") {
        return WireError::MissingRequiredField(field);
    }
    if let Some(field) = backticked_after(&message, "unknown field `") {
        return WireError::UnknownField(field);
    }
    WireError::Invalid(message)
}

fn backticked_after(message: &str, marker: &str) -> Option<String> {
    let start = message.find(marker)? + marker.len();
    let rest = &message[start..];
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// Body of `POST /networks/{advertisers,offers}/{id}/tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagsRequest {
    pub tags: Vec<String>,
}

impl TagsRequest {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }
}

impl WireBody for TagsRequest {
    const REQUIRED: &'static [&'static str] = &["tags"];
}

/// `{ "result": bool }`, returned by updates and tag calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MutationResult {
    pub result: bool,
}

impl WireBody for MutationResult {
    const REQUIRED: &'static [&'static str] = &["result"];
}
