//! # everflow-sync CLI Interface (Module)
//!
//! Command parsing and orchestration for the `everflow-sync` binary. All
//! provider logic (wire types, mappers, mapping store, sweeper) lives in
//! `everflow-sync-core`; this module only turns flags and config into a
//! [`SweepOptions`], runs the sweep and writes the report.
//!
//! ## How To Use
//! - Command line: `everflow-sync sync --config sweep.yaml --dry-run`.
//! - Programmatic/integration use: call [`run`] with a constructed [`Cli`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use everflow_sync_core::config::SweepDefaults;
use everflow_sync_core::domain::EntityKind;
use everflow_sync_core::integration::IntegrationService;
use everflow_sync_core::store::FileMappingStore;
use everflow_sync_core::sweep::{sweep, write_report, SweepOptions, SweepOutput};
use tokio_util::sync::CancellationToken;

use crate::load_config::load_config;

/// CLI for everflow-sync: reconcile local entities with the Everflow network.
#[derive(Parser)]
#[clap(
    name = "everflow-sync",
    version,
    about = "Reconcile local advertisers, affiliates and campaigns with the Everflow network"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep unsynced, failed and pending mappings and print a JSON report
    Sync(SyncArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Path to the YAML config file
    #[clap(long)]
    pub config: PathBuf,

    /// Select and log candidates without calling the provider or touching mappings
    #[clap(long)]
    pub dry_run: bool,

    /// Kinds to sweep, comma separated (advertisers,affiliates,campaigns)
    #[clap(long, value_delimiter = ',')]
    pub entities: Vec<EntityKind>,

    /// Per-kind cap on candidates; defaults to sweep.default_max_entities
    #[clap(long)]
    pub max_entities: Option<usize>,

    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    pub include_pending: Option<bool>,

    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    pub include_failed: Option<bool>,

    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    pub include_unsynced: Option<bool>,

    /// Write the report here instead of stdout
    #[clap(long)]
    pub output: Option<PathBuf>,
}

impl SyncArgs {
    /// Flags win; anything unset falls back to the config's sweep defaults.
    pub fn sweep_options(&self, defaults: &SweepDefaults) -> Result<SweepOptions> {
        let entity_kinds = if self.entities.is_empty() {
            EntityKind::SWEEPABLE.to_vec()
        } else {
            if let Some(kind) = self
                .entities
                .iter()
                .find(|kind| !EntityKind::SWEEPABLE.contains(kind))
            {
                anyhow::bail!("{kind} cannot be swept");
            }
            self.entities.clone()
        };
        Ok(SweepOptions {
            dry_run: self.dry_run,
            entity_kinds,
            max_entities: self.max_entities.unwrap_or(defaults.default_max_entities),
            include_pending: self.include_pending.unwrap_or(defaults.default_include_pending),
            include_failed: self.include_failed.unwrap_or(defaults.default_include_failed),
            include_unsynced: self
                .include_unsynced
                .unwrap_or(defaults.default_include_unsynced),
            output: self
                .output
                .clone()
                .map(SweepOutput::File)
                .unwrap_or(SweepOutput::Stdout),
        })
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync(args) => run_sync(args).await,
    }
}

async fn run_sync(args: SyncArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let core = config.core();
    core.trace_loaded();
    let options = args.sweep_options(&core.sweep)?;

    let store = FileMappingStore::open(&config.store.path)
        .await
        .context("Mapping store unavailable")?;
    let service = IntegrationService::from_config(&core, Arc::new(store))
        .context("Failed to initialise provider integration")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received; cancelling in-flight provider call");
            on_interrupt.cancel();
        }
    });

    tracing::info!(command = "sync", dry_run = options.dry_run, "Starting sweep");
    let outcome = sweep(&service, &options, &cancel).await;
    interrupt.abort();

    let report = outcome.context("Sweep failed")?;
    write_report(&report, &options.output).context("Failed to write sweep report")?;
    tracing::info!(
        failed = report.total_failed(),
        duration = %report.duration,
        "Sweep report written"
    );
    Ok(())
}
