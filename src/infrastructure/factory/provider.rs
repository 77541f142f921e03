//! Concentration provider and resolver factory.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::adapter::outbound::provider::{
    BirdeyeProvider, BitgetProvider, MoralisProvider, SolscanProvider,
};
use crate::application::ConcentrationResolver;
use crate::infrastructure::config::provider::AuthoritativeProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::{ConcentrationProvider, JsonFetcher, ToolRunner};

/// Build every enabled provider, highest tier first.
///
/// Providers without credentials are still built; they skip at run time
/// and record a `_not_configured` flag.
pub fn build_providers(
    config: &Config,
    fetcher: Arc<dyn JsonFetcher>,
    runner: Arc<dyn ToolRunner>,
) -> Vec<Arc<dyn ConcentrationProvider>> {
    let address = &config.token.address;
    let network = &config.network;
    let credentials = &config.credentials;
    let mut providers: Vec<Arc<dyn ConcentrationProvider>> = Vec::new();

    if config.bitget.enabled {
        providers.push(Arc::new(BitgetProvider::new(
            runner,
            &config.bitget,
            address.clone(),
        )));
    }

    for kind in &config.resolver.authoritative {
        let provider: Arc<dyn ConcentrationProvider> = match kind {
            AuthoritativeProvider::Solscan => Arc::new(SolscanProvider::new(
                Arc::clone(&fetcher),
                network.solscan_url.clone(),
                address.clone(),
                credentials.solscan.clone(),
            )),
            AuthoritativeProvider::Birdeye => Arc::new(BirdeyeProvider::new(
                Arc::clone(&fetcher),
                network.birdeye_url.clone(),
                address.clone(),
                credentials.birdeye.clone(),
            )),
        };
        providers.push(provider);
    }

    if config.resolver.trend_proxy {
        providers.push(Arc::new(MoralisProvider::new(
            fetcher,
            network.moralis_url.clone(),
            address.clone(),
            credentials.moralis.clone(),
        )));
    }

    debug!(
        providers = ?providers.iter().map(|p| p.source().as_str()).collect::<Vec<_>>(),
        "Concentration providers built"
    );
    providers
}

/// Build the resolver with the configured mode and deadline.
pub fn build_resolver(
    config: &Config,
    fetcher: Arc<dyn JsonFetcher>,
    runner: Arc<dyn ToolRunner>,
) -> ConcentrationResolver {
    ConcentrationResolver::new(build_providers(config, fetcher, runner))
        .concurrent(config.resolver.concurrent)
        .with_deadline(config.resolver.deadline_secs.map(Duration::from_secs))
}
