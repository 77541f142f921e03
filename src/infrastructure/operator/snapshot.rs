//! Snapshot operator implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::application::snapshot::concentration_flags;
use crate::application::RunOptions;
use crate::domain::PoolStats;
use crate::error::Result;
use crate::infrastructure::factory::market::build_pool_source;
use crate::infrastructure::factory::provider::build_resolver;
use crate::infrastructure::factory::service::{build_snapshot_service, Collaborators};
use crate::port::inbound::operator::snapshot::{
    ConcentrationReport, SnapshotOperator, SnapshotReport, SnapshotRequest,
};
use crate::port::ResolveInput;

use super::{entry::Operator, shared};

#[async_trait]
impl SnapshotOperator for Operator {
    async fn take_snapshot(&self, request: SnapshotRequest<'_>) -> Result<SnapshotReport> {
        let config = shared::settings(request.config_toml)?;
        // Rules are validated before any upstream request.
        let rules = shared::rules(request.rules)?;

        let collaborators = Collaborators::from_config(&config)?;
        let service = build_snapshot_service(&config, rules, collaborators)
            .with_rules_source(request.rules.location.clone());

        let report = service
            .run(
                Utc::now(),
                RunOptions {
                    dry_run: request.dry_run,
                },
            )
            .await?;

        Ok(SnapshotReport {
            snapshot: report.snapshot,
            breakdown: report.breakdown,
            snapshot_location: report.snapshot_path.map(|p| p.display().to_string()),
            timeseries_location: report.timeseries_path.map(|p| p.display().to_string()),
        })
    }

    /// Pool liquidity and FDV feed the proxy tiers; a failing pool source
    /// only weakens those tiers.
    async fn resolve_concentration(
        &self,
        config_toml: Option<&str>,
    ) -> Result<ConcentrationReport> {
        let config = shared::settings(config_toml)?;
        let Collaborators {
            fetcher, runner, ..
        } = Collaborators::from_config(&config)?;

        let pool = build_pool_source(&config, Arc::clone(&fetcher))
            .pool_stats()
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "Pool source unavailable");
                PoolStats::default()
            });

        let resolver = build_resolver(&config, fetcher, runner);
        let chain = resolver.sources().map(|s| s.to_string()).collect();
        let result = resolver
            .resolve(&ResolveInput {
                liquidity_usd: pool.liquidity_usd,
                fdv_usd: pool.fdv_usd,
            })
            .await;
        let risk_flags = concentration_flags(&result).into_vec();

        Ok(ConcentrationReport {
            token_address: config.token.address.to_string(),
            chain,
            result,
            risk_flags,
        })
    }
}
