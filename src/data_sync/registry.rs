use crate::errors::RouteError;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A registered trading pool and its two tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolPair {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
}

impl PoolPair {
    pub fn new(address: Address, token0: Address, token1: Address) -> Self {
        Self { address, token0, token1 }
    }

    pub fn get_tokens(&self) -> Vec<Address> {
        vec![self.token0, self.token1]
    }

    /// Both swap directions are available on a pair.
    pub fn get_swap_directions(&self) -> Vec<(Address, Address)> {
        vec![(self.token0, self.token1), (self.token1, self.token0)]
    }

    /// The token pair in ascending order, independent of how the pool stores it.
    pub fn sorted_tokens(&self) -> (Address, Address) {
        if self.token0 <= self.token1 { (self.token0, self.token1) } else { (self.token1, self.token0) }
    }
}

/// Source of every currently registered pool.
#[async_trait]
pub trait PoolRegistry: Send + Sync {
    async fn get_all_pools(&self) -> Result<Vec<PoolPair>, RouteError>;
}

#[async_trait]
impl<T: PoolRegistry + ?Sized> PoolRegistry for Arc<T> {
    async fn get_all_pools(&self) -> Result<Vec<PoolPair>, RouteError> {
        (**self).get_all_pools().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_directions() {
        let pool = PoolPair::new(Address::repeat_byte(9), Address::repeat_byte(2), Address::repeat_byte(1));

        assert_eq!(pool.get_tokens(), vec![Address::repeat_byte(2), Address::repeat_byte(1)]);
        assert_eq!(
            pool.get_swap_directions(),
            vec![(Address::repeat_byte(2), Address::repeat_byte(1)), (Address::repeat_byte(1), Address::repeat_byte(2))]
        );
        assert_eq!(pool.sorted_tokens(), (Address::repeat_byte(1), Address::repeat_byte(2)));
    }
}
