use super::rpc::{CallError, EthCallClient};
use crate::errors::RouteError;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use async_trait::async_trait;
use std::sync::Arc;

sol! {
    interface IUniswapV2Router02 {
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);
    }
}

/// Quoting side of a swap router.
#[async_trait]
pub trait SwapRouter: Send + Sync {
    /// Amounts received at every hop of `path` for `amount_in`; the last element is the total output.
    /// Fails with [`RouteError::UnsupportedPath`] when a hop has no pool or not enough liquidity.
    async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, RouteError>;
}

#[async_trait]
impl<T: SwapRouter + ?Sized> SwapRouter for Arc<T> {
    async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, RouteError> {
        (**self).get_amounts_out(amount_in, path).await
    }
}

/// Quotes through `UniswapV2Router02.getAmountsOut`.
#[derive(Debug, Clone)]
pub struct UniswapV2RouterQuoter {
    client: Arc<EthCallClient>,
    router: Address,
}

impl UniswapV2RouterQuoter {
    pub fn new(client: Arc<EthCallClient>, router: Address) -> Self {
        Self { client, router }
    }

    pub fn router_address(&self) -> Address {
        self.router
    }
}

#[async_trait]
impl SwapRouter for UniswapV2RouterQuoter {
    async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, RouteError> {
        let call = IUniswapV2Router02::getAmountsOutCall { amountIn: amount_in, path: path.to_vec() };

        self.client.call(self.router, &call).await.map_err(|e| match e {
            CallError::Reverted(reason) => RouteError::UnsupportedPath(reason),
            CallError::Transport(reason) => RouteError::Transport(reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::data_sync::local_node::{LocalNode, NodeReply};
    use crate::logic::{PathPricer, SwapPath};
    use alloy_sol_types::{SolCall, SolValue};
    use std::time::Duration;

    fn weth() -> Address {
        Address::repeat_byte(1)
    }
    fn bdx() -> Address {
        Address::repeat_byte(2)
    }
    fn bdeu() -> Address {
        Address::repeat_byte(3)
    }

    // Router with no direct WETH/BDX pool: two-token paths revert, longer paths gain 30 per hop.
    async fn router_node() -> LocalNode {
        LocalNode::start(Duration::ZERO, |_to, data| {
            let call = IUniswapV2Router02::getAmountsOutCall::abi_decode(data).unwrap();
            if call.path.len() == 2 {
                return NodeReply::Error {
                    code: 3,
                    message: "execution reverted: UniswapV2Library: INSUFFICIENT_LIQUIDITY".to_string(),
                };
            }
            let amounts: Vec<U256> = (0..call.path.len()).map(|hop| call.amountIn + U256::from(30 * hop)).collect();
            NodeReply::Data(amounts.abi_encode())
        })
        .await
    }

    #[tokio::test]
    async fn test_quote_decodes_amounts() {
        let node = router_node().await;
        let quoter = UniswapV2RouterQuoter::new(node.client(), Address::repeat_byte(0x7a));

        let amounts = quoter.get_amounts_out(U256::from(100), &[weth(), bdeu(), bdx()]).await.unwrap();
        assert_eq!(amounts, vec![U256::from(100), U256::from(130), U256::from(160)]);
    }

    #[tokio::test]
    async fn test_revert_is_unsupported_path() {
        let node = router_node().await;
        let quoter = UniswapV2RouterQuoter::new(node.client(), Address::repeat_byte(0x7a));

        let err = quoter.get_amounts_out(U256::from(100), &[weth(), bdx()]).await.unwrap_err();
        assert!(matches!(err, RouteError::UnsupportedPath(ref reason) if reason.contains("INSUFFICIENT_LIQUIDITY")), "{err:?}");
    }

    #[tokio::test]
    async fn test_node_failure_is_transport() {
        let node = LocalNode::start(Duration::ZERO, |_to, _data| NodeReply::Error {
            code: -32005,
            message: "rate limit exceeded".to_string(),
        })
        .await;
        let quoter = UniswapV2RouterQuoter::new(node.client(), Address::repeat_byte(0x7a));

        let err = quoter.get_amounts_out(U256::from(100), &[weth(), bdeu(), bdx()]).await.unwrap_err();
        assert!(matches!(err, RouteError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_pricer_drops_reverted_path() {
        let node = router_node().await;
        let quoter = UniswapV2RouterQuoter::new(node.client(), Address::repeat_byte(0x7a));
        let candidates = vec![SwapPath::direct(weth(), bdx()), SwapPath::via(weth(), bdeu(), bdx())];

        for concurrent_pricing in [false, true] {
            let pricer = PathPricer::new(RoutingConfig { concurrent_pricing, ..RoutingConfig::default() });
            let priced = pricer.price_paths(&quoter, U256::from(100), &candidates).await.unwrap();

            assert_eq!(priced.len(), 1);
            assert_eq!(priced[0].path, SwapPath::via(weth(), bdeu(), bdx()));
            assert_eq!(priced[0].amount_out, U256::from(160));
            assert_eq!(priced[0].generation_index, 1);
        }
    }

    #[test]
    fn test_get_amounts_out_selector() {
        assert_eq!(IUniswapV2Router02::getAmountsOutCall::SELECTOR, [0xd0, 0x6c, 0xa6, 0x1f]);
    }

    #[test]
    fn test_get_amounts_out_encoding() {
        let path = vec![Address::repeat_byte(1), Address::repeat_byte(3), Address::repeat_byte(2)];
        let call = IUniswapV2Router02::getAmountsOutCall { amountIn: U256::from(100), path: path.clone() };
        let encoded = call.abi_encode();

        // selector, amountIn, offset, length, 3 addresses
        assert_eq!(encoded.len(), 4 + 32 * 6);

        let decoded = IUniswapV2Router02::getAmountsOutCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.amountIn, U256::from(100));
        assert_eq!(decoded.path, path);
    }
}
