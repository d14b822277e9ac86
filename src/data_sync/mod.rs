/// Data Layer
///
/// Everything that reads external chain state:
/// - pool registry reads (UniswapV2 factory pairs)
/// - router quotes (`getAmountsOut`)
/// - turning pools into directed swap links
///
/// Nothing here writes to the chain.

pub mod factory;
pub mod links;
pub mod mock;
pub mod registry;
pub mod router;
pub mod rpc;

#[cfg(test)]
pub(crate) mod local_node;

pub use factory::UniswapV2FactoryRegistry;
pub use links::{PairWhitelist, SwapLink, SwapLinkSet, collect_links};
pub use mock::{MockPoolRegistry, MockSwapRouter};
pub use registry::{PoolPair, PoolRegistry};
pub use router::{SwapRouter, UniswapV2RouterQuoter};
pub use rpc::{CallError, EthCallClient};
