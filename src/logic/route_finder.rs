use super::path_generator::generate_paths;
use super::path_pricer::PathPricer;
use super::selector::choose_best_path;
use super::types::{PricedPath, SwapPath};
use crate::config::RoutingConfig;
use crate::data_sync::{PairWhitelist, PoolRegistry, SwapLinkSet, SwapRouter, collect_links};
use crate::errors::RouteError;
use alloy_primitives::{Address, U256};
use tokio::time::timeout;
use tracing::{info, warn};

/// BestPathFinder runs the whole best path query against injected capabilities:
///
/// 1. Link collection from the pool registry
/// 2. Candidate path generation (direct plus one intermediate token)
/// 3. Pricing through the router, dropping unsupported paths
/// 4. Selection of the greatest output
///
/// Nothing is cached between queries; every query reads the registry again.
pub struct BestPathFinder<R, Q> {
    registry: R,
    router: Q,
    config: RoutingConfig,
    whitelist: Option<PairWhitelist>,
    pricer: PathPricer,
}

impl<R: PoolRegistry, Q: SwapRouter> BestPathFinder<R, Q> {
    pub fn new(registry: R, router: Q, config: RoutingConfig) -> Self {
        let pricer = PathPricer::new(config.clone());
        Self { registry, router, config, whitelist: None, pricer }
    }

    pub fn with_whitelist(mut self, whitelist: Option<PairWhitelist>) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Read the registry; a registry timeout is reported as a transport error.
    pub async fn collect_links(&self) -> Result<SwapLinkSet, RouteError> {
        let registry_timeout = self.config.registry_timeout();
        match timeout(registry_timeout, collect_links(&self.registry, self.whitelist.as_ref())).await {
            Ok(links) => links,
            Err(_) => {
                warn!(?registry_timeout, "Pool registry read timed out");
                Err(RouteError::Transport(format!("pool registry did not answer within {registry_timeout:?}")))
            }
        }
    }

    /// Candidate paths in generation order, without pricing them.
    pub async fn candidate_paths(&self, source: Address, destination: Address) -> Result<Vec<SwapPath>, RouteError> {
        let links = self.collect_links().await?;
        Ok(generate_paths(source, destination, &links))
    }

    /// Every priceable candidate with its quote, in generation order.
    pub async fn quote_candidates(&self, source: Address, destination: Address, amount_in: U256) -> Result<Vec<PricedPath>, RouteError> {
        let paths = self.candidate_paths(source, destination).await?;
        let priced = self.pricer.price_paths(&self.router, amount_in, &paths).await?;

        info!(%source, %destination, %amount_in, candidates = paths.len(), priced = priced.len(), "Quoted candidate paths");
        Ok(priced)
    }

    /// The path giving the greatest output for `amount_in`.
    ///
    /// Fails with [`RouteError::NoFeasiblePath`] when no candidate could be priced and with
    /// [`RouteError::Transport`] when the registry or the router is unreachable.
    pub async fn find_best_path(&self, source: Address, destination: Address, amount_in: U256) -> Result<PricedPath, RouteError> {
        let priced = self.quote_candidates(source, destination, amount_in).await?;
        choose_best_path(source, destination, priced)
    }
}

/// Builder pattern for creating and configuring a BestPathFinder
pub struct BestPathFinderBuilder<R, Q> {
    registry: R,
    router: Q,
    config: RoutingConfig,
    whitelist: Option<PairWhitelist>,
}

impl<R: PoolRegistry, Q: SwapRouter> BestPathFinderBuilder<R, Q> {
    pub fn new(registry: R, router: Q) -> Self {
        Self { registry, router, config: RoutingConfig::default(), whitelist: None }
    }

    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_quote_timeout_secs(mut self, secs: u64) -> Self {
        self.config.quote_timeout_secs = secs;
        self
    }

    pub fn with_concurrent_pricing(mut self, enabled: bool) -> Self {
        self.config.concurrent_pricing = enabled;
        self
    }

    pub fn with_whitelist(mut self, whitelist: Option<PairWhitelist>) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn build(self) -> BestPathFinder<R, Q> {
        BestPathFinder::new(self.registry, self.router, self.config).with_whitelist(self.whitelist)
    }
}
