//! Error types shared by every layer of the core.
//!
//! Three enums, one per concern:
//! - [`WireError`]: a Provider body could not be decoded into a wire type.
//! - [`StoreError`]: the mapping store refused or failed an operation.
//! - [`IntegrationError`]: everything a caller of the integration service or
//!   the sweeper can observe. Wire and store errors convert into it with `?`.
//!
//! `IntegrationError::code()` gives a stable identifier for reports and logs.

use thiserror::Error;

use crate::domain::EntityKind;

/// Stable error codes, surfaced in sweep reports and structured logs.
pub mod code {
    pub const INVARIANT: &str = "MAPPING_INVARIANT_VIOLATION";
    pub const ALREADY_SYNCED: &str = "ALREADY_SYNCED";
    pub const CREATION_IN_FLIGHT: &str = "CREATION_IN_FLIGHT";
    pub const NOT_SYNCED: &str = "NOT_SYNCED";
    pub const PROVIDER_REJECTED: &str = "PROVIDER_REJECTED";
    pub const PROVIDER_TRANSIENT: &str = "PROVIDER_TRANSIENT";
    pub const PROVIDER_NOT_FOUND: &str = "PROVIDER_NOT_FOUND";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const CANCELLED: &str = "CANCELLED";
    pub const PROVIDER_DISABLED: &str = "PROVIDER_DISABLED";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const UPDATE_FAILED: &str = "UPDATE_FAILED";
    pub const ENTITY_NOT_FOUND: &str = "ENTITY_NOT_FOUND";
    pub const INVALID_ENTITY: &str = "INVALID_ENTITY";
    pub const STORE: &str = "STORE";
    pub const SERIALIZATION: &str = "SERIALIZATION";
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("missing required field `{0}`")]
    MissingRequiredField(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("invalid wire body: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mapping for {kind} {local_id} already exists")]
    AlreadyExists { kind: EntityKind, local_id: i64 },

    #[error("no mapping for {kind} {local_id}")]
    MappingNotFound { kind: EntityKind, local_id: i64 },

    #[error("mapping store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("mapping invariant violated: {0}")]
    MappingInvariantViolation(String),

    #[error("{kind} {local_id} is already synced; use the update path")]
    AlreadySynced { kind: EntityKind, local_id: i64 },

    #[error("{kind} {local_id} has a provider create in flight")]
    CreationInFlight { kind: EntityKind, local_id: i64 },

    #[error("{kind} {local_id} has not been synced to the provider")]
    NotSynced { kind: EntityKind, local_id: i64 },

    #[error("provider rejected request with status {status}: {body}")]
    ProviderRejected { status: u16, body: String },

    #[error("provider unavailable: {0}")]
    ProviderTransient(String),

    #[error("provider has no entity at {path}")]
    ProviderNotFound { path: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(#[from] WireError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("provider integration disabled: no API key configured")]
    ProviderDisabled,

    #[error("failed to create {kind} in provider: {cause}")]
    CreateFailed {
        kind: EntityKind,
        #[source]
        cause: Box<IntegrationError>,
    },

    #[error("failed to update {kind} in provider: {cause}")]
    UpdateFailed {
        kind: EntityKind,
        #[source]
        cause: Box<IntegrationError>,
    },

    #[error("{kind} {local_id} not found in local store")]
    EntityNotFound { kind: EntityKind, local_id: i64 },

    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntegrationError {
    pub fn code(&self) -> &'static str {
        match self {
            IntegrationError::MappingInvariantViolation(_) => code::INVARIANT,
            IntegrationError::AlreadySynced { .. } => code::ALREADY_SYNCED,
            IntegrationError::CreationInFlight { .. } => code::CREATION_IN_FLIGHT,
            IntegrationError::NotSynced { .. } => code::NOT_SYNCED,
            IntegrationError::ProviderRejected { .. } => code::PROVIDER_REJECTED,
            IntegrationError::ProviderTransient(_) => code::PROVIDER_TRANSIENT,
            IntegrationError::ProviderNotFound { .. } => code::PROVIDER_NOT_FOUND,
            IntegrationError::MalformedResponse(_) => code::MALFORMED_RESPONSE,
            IntegrationError::Cancelled => code::CANCELLED,
            IntegrationError::ProviderDisabled => code::PROVIDER_DISABLED,
            IntegrationError::CreateFailed { .. } => code::CREATE_FAILED,
            IntegrationError::UpdateFailed { .. } => code::UPDATE_FAILED,
            IntegrationError::EntityNotFound { .. } => code::ENTITY_NOT_FOUND,
            IntegrationError::InvalidEntity(_) => code::INVALID_ENTITY,
            IntegrationError::Store(_) => code::STORE,
            IntegrationError::Serialization(_) => code::SERIALIZATION,
        }
    }

    /// True when a later sweep may succeed without operator action.
    pub fn is_retryable(&self) -> bool {
        match self {
            IntegrationError::ProviderTransient(_)
            | IntegrationError::Cancelled
            | IntegrationError::CreationInFlight { .. } => true,
            IntegrationError::CreateFailed { cause, .. }
            | IntegrationError::UpdateFailed { cause, .. } => cause.is_retryable(),
            _ => false,
        }
    }

    /// The innermost provider-facing error, unwrapping create/update wrappers.
    pub fn root_cause(&self) -> &IntegrationError {
        match self {
            IntegrationError::CreateFailed { cause, .. }
            | IntegrationError::UpdateFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}
