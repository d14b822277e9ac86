use super::registry::{PoolPair, PoolRegistry};
use super::rpc::EthCallClient;
use crate::errors::RouteError;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use async_trait::async_trait;
use crate::utils::constants::DEFAULT_MAX_CONCURRENT_REGISTRY_READS;
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tracing::debug;

sol! {
    interface IUniswapV2Factory {
        function allPairsLength() external view returns (uint256);
        function allPairs(uint256 index) external view returns (address pair);
    }

    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
    }
}

/// Pool registry backed by a UniswapV2 factory: every pair it created is a pool.
///
/// At most `max_concurrent_reads` pairs are read at once. Each pair read issues
/// `allPairs(i)` and then `token0`/`token1` together, so the node sees at most twice
/// that many requests in flight.
#[derive(Debug, Clone)]
pub struct UniswapV2FactoryRegistry {
    client: Arc<EthCallClient>,
    factory: Address,
    max_concurrent_reads: usize,
}

impl UniswapV2FactoryRegistry {
    pub fn new(client: Arc<EthCallClient>, factory: Address) -> Self {
        Self { client, factory, max_concurrent_reads: DEFAULT_MAX_CONCURRENT_REGISTRY_READS }
    }

    pub fn with_max_concurrent_reads(mut self, max_concurrent_reads: usize) -> Self {
        self.max_concurrent_reads = max_concurrent_reads.max(1);
        self
    }

    pub fn factory_address(&self) -> Address {
        self.factory
    }

    pub fn max_concurrent_reads(&self) -> usize {
        self.max_concurrent_reads
    }

    async fn get_pool(&self, index: u64) -> Result<PoolPair, RouteError> {
        let pair = self
            .client
            .call(self.factory, &IUniswapV2Factory::allPairsCall { index: U256::from(index) })
            .await
            .map_err(|e| RouteError::Transport(format!("allPairs({index}): {e}")))?;

        let (token0, token1) = tokio::try_join!(
            self.client.call(pair, &IUniswapV2Pair::token0Call {}),
            self.client.call(pair, &IUniswapV2Pair::token1Call {}),
        )
        .map_err(|e| RouteError::Transport(format!("tokens of pair {pair}: {e}")))?;

        Ok(PoolPair::new(pair, token0, token1))
    }
}

#[async_trait]
impl PoolRegistry for UniswapV2FactoryRegistry {
    async fn get_all_pools(&self) -> Result<Vec<PoolPair>, RouteError> {
        let length = self
            .client
            .call(self.factory, &IUniswapV2Factory::allPairsLengthCall {})
            .await
            .map_err(|e| RouteError::Transport(format!("allPairsLength: {e}")))?;
        let length = u64::try_from(length).map_err(|_| RouteError::Transport(format!("pair count {length} out of range")))?;

        debug!(factory = %self.factory, pairs = length, max_concurrent_reads = self.max_concurrent_reads, "Reading factory pairs");

        stream::iter(0..length).map(|index| self.get_pool(index)).buffered(self.max_concurrent_reads).try_collect().await
    }
}
