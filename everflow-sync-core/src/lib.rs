#![doc = "everflow-sync-core: provider integration core for everflow-sync."]

//! This crate keeps local advertisers, affiliates and campaigns in step with
//! their counterparts in the Everflow affiliate network (the Provider).
//!
//! # Layers
//! - [`wire`]: Provider request and response bodies.
//! - [`client`]: transport, status classification and cancellation.
//! - [`mapper`]: local entity ⇄ wire translation, defaults and status vocabularies.
//! - [`store`]: the durable mapping between local and Provider ids.
//! - [`integration`]: per-entity create/update/get, tracking links and tags.
//! - [`sweep`]: bulk reconciliation with a JSON report.
//! - [`reporting`]: read-only Provider reports.
//!
//! # Usage
//! Build a [`config::CoreConfig`], pick a [`store::MappingStore`], and hand both
//! to [`integration::IntegrationService::from_config`].

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod integration;
pub mod mapper;
pub mod reporting;
pub mod store;
pub mod sweep;
pub mod wire;
