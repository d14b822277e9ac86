// Two-Layer Architecture
pub mod data_sync; // Data Layer: pool registry reads, router quotes, swap links
pub mod logic; // Logic Layer: path generation, pricing, best path selection

// Common utilities and types
pub mod config;
pub mod errors;
pub mod utils;

// Re-export key components from each layer
pub use config::{ContractsConfig, RouteFinderConfig, RoutingConfig, RpcConfig, TokenConfig};
pub use data_sync::{
    CallError, EthCallClient, MockPoolRegistry, MockSwapRouter, PairWhitelist, PoolPair, PoolRegistry, SwapLink, SwapLinkSet,
    SwapRouter, UniswapV2FactoryRegistry, UniswapV2RouterQuoter, collect_links,
};
pub use errors::RouteError;
pub use logic::{BestPathFinder, BestPathFinderBuilder, PathPricer, PricedPath, SwapPath, choose_best_path, generate_paths};
pub use utils::Token;
