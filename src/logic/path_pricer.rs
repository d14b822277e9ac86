use super::types::{PricedPath, SwapPath};
use crate::config::RoutingConfig;
use crate::data_sync::SwapRouter;
use crate::errors::RouteError;
use alloy_primitives::U256;
use futures::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Quotes candidate paths through the router.
///
/// Paths the router rejects, and paths whose quote does not arrive within the timeout,
/// are dropped. Transport failures abort the whole pricing run.
#[derive(Debug, Clone)]
pub struct PathPricer {
    config: RoutingConfig,
}

impl PathPricer {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Price every path, keeping generation order in the result.
    pub async fn price_paths<Q: SwapRouter + ?Sized>(
        &self,
        router: &Q,
        amount_in: U256,
        paths: &[SwapPath],
    ) -> Result<Vec<PricedPath>, RouteError> {
        if !self.config.concurrent_pricing {
            return self.price_paths_sequential(router, amount_in, paths).await;
        }

        debug!(paths = paths.len(), max_in_flight = self.config.max_concurrent_quotes, "Pricing paths concurrently");

        // `buffered` yields in input order, so generation order survives
        let results: Vec<Result<Option<PricedPath>, RouteError>> = stream::iter(paths.iter().enumerate())
            .map(|(index, path)| self.price_path(router, amount_in, path, index))
            .buffered(self.config.max_concurrent_quotes.max(1))
            .collect()
            .await;

        collect_priced(results)
    }

    /// Sequential pricing (debugging and rate limited nodes)
    async fn price_paths_sequential<Q: SwapRouter + ?Sized>(
        &self,
        router: &Q,
        amount_in: U256,
        paths: &[SwapPath],
    ) -> Result<Vec<PricedPath>, RouteError> {
        debug!(paths = paths.len(), "Pricing paths sequentially");

        let mut results = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            results.push(self.price_path(router, amount_in, path, index).await);
        }

        collect_priced(results)
    }

    /// Price one path. `Ok(None)` means the path was dropped.
    pub async fn price_path<Q: SwapRouter + ?Sized>(
        &self,
        router: &Q,
        amount_in: U256,
        path: &SwapPath,
        generation_index: usize,
    ) -> Result<Option<PricedPath>, RouteError> {
        let quote_timeout = self.config.quote_timeout();
        let quote = match timeout(quote_timeout, router.get_amounts_out(amount_in, path.tokens())).await {
            Ok(quote) => quote,
            Err(_) => Err(RouteError::QuoteTimeout(quote_timeout)),
        };

        match quote {
            Ok(amounts) => match amounts.last().copied() {
                Some(amount_out) => {
                    debug!(%path, %amount_out, "Priced path");
                    Ok(Some(PricedPath::new(path.clone(), amount_in, amounts, amount_out, generation_index)))
                }
                None => {
                    debug!(%path, "Router returned no amounts, dropping path");
                    Ok(None)
                }
            },
            Err(RouteError::QuoteTimeout(elapsed)) => {
                warn!(%path, ?elapsed, "Quote timed out, dropping path");
                Ok(None)
            }
            Err(e) if e.is_droppable() => {
                debug!(%path, error = %e, "Unsupported path, dropping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn collect_priced(results: Vec<Result<Option<PricedPath>, RouteError>>) -> Result<Vec<PricedPath>, RouteError> {
    let mut priced = Vec::with_capacity(results.len());
    for result in results {
        if let Some(priced_path) = result? {
            priced.push(priced_path);
        }
    }
    Ok(priced)
}
