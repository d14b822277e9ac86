use super::registry::{PoolPair, PoolRegistry};
use super::router::SwapRouter;
use crate::errors::RouteError;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory pool registry.
#[derive(Clone, Debug, Default)]
pub struct MockPoolRegistry {
    pools: Vec<PoolPair>,
    failure: Option<String>,
}

impl MockPoolRegistry {
    pub fn new(pools: Vec<PoolPair>) -> Self {
        Self { pools, failure: None }
    }

    /// A registry that is never reachable.
    pub fn failing(reason: &str) -> Self {
        Self { pools: vec![], failure: Some(reason.to_string()) }
    }
}

#[async_trait]
impl PoolRegistry for MockPoolRegistry {
    async fn get_all_pools(&self) -> Result<Vec<PoolPair>, RouteError> {
        match &self.failure {
            Some(reason) => Err(RouteError::Transport(reason.clone())),
            None => Ok(self.pools.clone()),
        }
    }
}

/// Router with fixed quotes per path. Unknown paths are unsupported.
#[derive(Clone, Debug, Default)]
pub struct MockSwapRouter {
    quotes: HashMap<Vec<Address>, U256>,
    delays: HashMap<Vec<Address>, Duration>,
    transport_failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockSwapRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote `amount_out` as the final output of `path`, whatever the input.
    pub fn with_quote(mut self, path: Vec<Address>, amount_out: U256) -> Self {
        self.quotes.insert(path, amount_out);
        self
    }

    /// Delay the answer for `path`.
    pub fn with_delay(mut self, path: Vec<Address>, delay: Duration) -> Self {
        self.delays.insert(path, delay);
        self
    }

    /// Every quote fails with a transport error.
    pub fn with_transport_failure(mut self, reason: &str) -> Self {
        self.transport_failure = Some(reason.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SwapRouter for MockSwapRouter {
    async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(reason) = &self.transport_failure {
            return Err(RouteError::Transport(reason.clone()));
        }

        let amount_out = self
            .quotes
            .get(path)
            .copied()
            .ok_or_else(|| RouteError::UnsupportedPath("UniswapV2Library: pair does not exist".to_string()))?;

        // intermediate hops are not interesting to the callers, only the last amount is
        let mut amounts = vec![amount_in];
        amounts.extend(std::iter::repeat_n(amount_out, path.len().saturating_sub(1)));
        Ok(amounts)
    }
}
