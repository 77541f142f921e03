//! Composition root for the snapshot run.

use std::sync::Arc;

use super::market::{build_pool_source, build_price_source};
use super::persistence::build_snapshot_store;
use super::provider::build_resolver;
use crate::adapter::outbound::http::HttpFetcher;
use crate::adapter::outbound::tool::ProcessToolRunner;
use crate::application::{ScenarioScorer, SnapshotService};
use crate::error::Result;
use crate::infrastructure::config::rules::ScenarioRules;
use crate::infrastructure::config::settings::Config;
use crate::port::{JsonFetcher, SnapshotStore, ToolRunner};

/// Outbound collaborators of a snapshot service.
pub struct Collaborators {
    pub fetcher: Arc<dyn JsonFetcher>,
    pub runner: Arc<dyn ToolRunner>,
    pub store: Arc<dyn SnapshotStore>,
}

impl Collaborators {
    /// Production collaborators: reqwest, child processes and local files.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(HttpFetcher::new(&config.network, config.retry.clone())?),
            runner: Arc::new(ProcessToolRunner),
            store: build_snapshot_store(config),
        })
    }
}

/// Wire a snapshot service from configuration and validated rules.
pub fn build_snapshot_service(
    config: &Config,
    rules: ScenarioRules,
    collaborators: Collaborators,
) -> SnapshotService {
    let Collaborators {
        fetcher,
        runner,
        store,
    } = collaborators;

    SnapshotService::new(
        build_price_source(config, Arc::clone(&fetcher)),
        build_pool_source(config, Arc::clone(&fetcher)),
        build_resolver(config, fetcher, runner),
        ScenarioScorer::new(rules),
        store,
    )
    .with_asset(config.token.symbol.clone())
    .with_rules_source(config.paths.rules.display().to_string())
}
