use crate::data_sync::PairWhitelist;
use crate::utils::config_loader::{LoadConfigError, RouteConfigLoader, load_from_file};
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT_QUOTES, DEFAULT_MAX_CONCURRENT_REGISTRY_READS, DEFAULT_QUOTE_TIMEOUT_SECS,
    DEFAULT_REGISTRY_TIMEOUT_SECS, DEFAULT_RPC_HTTP_URL, MAX_TOKEN_DECIMALS,
};
use crate::utils::Token;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// JSON-RPC endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub rpc_http_url: String,
    pub http_timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { rpc_http_url: DEFAULT_RPC_HTTP_URL.to_string(), http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}

impl RpcConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Addresses of the deployed swap contracts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub swap_factory: Address,
    pub swap_router: Address,
}

/// Path pricing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Timeout of a single router quote; a timed out path is dropped
    pub quote_timeout_secs: u64,
    /// Timeout of the registry read; a timeout there fails the query
    pub registry_timeout_secs: u64,
    /// Price candidate paths concurrently
    pub concurrent_pricing: bool,
    /// Upper bound of in-flight quotes in concurrent mode
    pub max_concurrent_quotes: usize,
    /// Upper bound of factory pairs read at once
    pub max_concurrent_registry_reads: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            quote_timeout_secs: DEFAULT_QUOTE_TIMEOUT_SECS,
            registry_timeout_secs: DEFAULT_REGISTRY_TIMEOUT_SECS,
            concurrent_pricing: true,
            max_concurrent_quotes: DEFAULT_MAX_CONCURRENT_QUOTES,
            max_concurrent_registry_reads: DEFAULT_MAX_CONCURRENT_REGISTRY_READS,
        }
    }
}

impl RoutingConfig {
    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }
}

/// A named token, keyed by its symbol in the `[tokens]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: Address,
    pub decimals: Option<u8>,
}

impl TokenConfig {
    fn check_decimals(&self, symbol: &str) -> eyre::Result<()> {
        match self.decimals {
            Some(decimals) if decimals > MAX_TOKEN_DECIMALS => {
                Err(eyre::eyre!("tokens.{}.decimals is {}, at most {} is supported", symbol, decimals, MAX_TOKEN_DECIMALS))
            }
            _ => Ok(()),
        }
    }

    fn to_token(&self, symbol: &str) -> eyre::Result<Token> {
        self.check_decimals(symbol)?;
        Ok(Token::new_with_data(self.address, Some(symbol.to_string()), self.decimals))
    }
}

/// Top level configuration of the route finder.
///
/// ```toml
/// whitelist = [["WETH", "BDX"], ["BDEU", "BDX"]]
///
/// [rpc]
/// rpc_http_url = "${RPC_HTTP_URL}"
///
/// [contracts]
/// swap_factory = "0x..."
/// swap_router = "0x..."
///
/// [tokens]
/// WETH = { address = "0x..." }
/// WBTC = { address = "0x...", decimals = 8 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteFinderConfig {
    /// Pairs allowed to contribute links, by symbol or address. Empty means every pool.
    pub whitelist: Vec<[String; 2]>,
    pub rpc: RpcConfig,
    pub contracts: ContractsConfig,
    pub routing: RoutingConfig,
    pub tokens: BTreeMap<String, TokenConfig>,
}

#[async_trait]
impl RouteConfigLoader for RouteFinderConfig {
    type SectionType = RouteFinderConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        load_from_file(file_name).await
    }
}

impl RouteFinderConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> eyre::Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override values with environment variables when they are set
    pub fn apply_env(&mut self) -> eyre::Result<()> {
        if let Ok(rpc_http_url) = std::env::var("RPC_HTTP_URL") {
            self.rpc.rpc_http_url = rpc_http_url;
        }

        if let Ok(timeout_str) = std::env::var("HTTP_TIMEOUT_SECS") {
            self.rpc.http_timeout_secs = timeout_str.parse().map_err(|e| eyre::eyre!("Invalid HTTP_TIMEOUT_SECS: {}", e))?;
        }

        if let Ok(factory) = std::env::var("SWAP_FACTORY_ADDRESS") {
            self.contracts.swap_factory =
                Address::from_str(&factory).map_err(|e| eyre::eyre!("Invalid SWAP_FACTORY_ADDRESS: {}", e))?;
        }

        if let Ok(router) = std::env::var("SWAP_ROUTER_ADDRESS") {
            self.contracts.swap_router = Address::from_str(&router).map_err(|e| eyre::eyre!("Invalid SWAP_ROUTER_ADDRESS: {}", e))?;
        }

        if let Ok(timeout_str) = std::env::var("QUOTE_TIMEOUT_SECS") {
            self.routing.quote_timeout_secs = timeout_str.parse().map_err(|e| eyre::eyre!("Invalid QUOTE_TIMEOUT_SECS: {}", e))?;
        }

        if let Ok(timeout_str) = std::env::var("REGISTRY_TIMEOUT_SECS") {
            self.routing.registry_timeout_secs =
                timeout_str.parse().map_err(|e| eyre::eyre!("Invalid REGISTRY_TIMEOUT_SECS: {}", e))?;
        }

        if let Ok(concurrent_str) = std::env::var("CONCURRENT_PRICING") {
            self.routing.concurrent_pricing =
                concurrent_str.parse().map_err(|e| eyre::eyre!("Invalid CONCURRENT_PRICING: {}", e))?;
        }

        if let Ok(max_str) = std::env::var("MAX_CONCURRENT_QUOTES") {
            self.routing.max_concurrent_quotes = max_str.parse().map_err(|e| eyre::eyre!("Invalid MAX_CONCURRENT_QUOTES: {}", e))?;
        }

        if let Ok(max_str) = std::env::var("MAX_CONCURRENT_REGISTRY_READS") {
            self.routing.max_concurrent_registry_reads =
                max_str.parse().map_err(|e| eyre::eyre!("Invalid MAX_CONCURRENT_REGISTRY_READS: {}", e))?;
        }

        Ok(())
    }

    /// Check the values needed to talk to a live chain
    pub fn validate(&self) -> eyre::Result<()> {
        Url::parse(&self.rpc.rpc_http_url).map_err(|e| eyre::eyre!("Invalid rpc_http_url {}: {}", self.rpc.rpc_http_url, e))?;

        if self.contracts.swap_factory.is_zero() {
            return Err(eyre::eyre!("contracts.swap_factory is not set"));
        }
        if self.contracts.swap_router.is_zero() {
            return Err(eyre::eyre!("contracts.swap_router is not set"));
        }
        if self.routing.quote_timeout_secs == 0 {
            return Err(eyre::eyre!("routing.quote_timeout_secs must be at least 1"));
        }
        if self.routing.registry_timeout_secs == 0 {
            return Err(eyre::eyre!("routing.registry_timeout_secs must be at least 1"));
        }
        if self.routing.max_concurrent_quotes == 0 {
            return Err(eyre::eyre!("routing.max_concurrent_quotes must be at least 1"));
        }
        if self.routing.max_concurrent_registry_reads == 0 {
            return Err(eyre::eyre!("routing.max_concurrent_registry_reads must be at least 1"));
        }
        for (symbol, token) in &self.tokens {
            token.check_decimals(symbol)?;
        }

        Ok(())
    }

    /// Resolve a token by configured symbol (case-insensitive) or by address.
    pub fn resolve_token(&self, symbol_or_address: &str) -> eyre::Result<Token> {
        if let Ok(address) = Address::from_str(symbol_or_address) {
            return match self.tokens.iter().find(|(_, token)| token.address == address) {
                Some((symbol, token)) => token.to_token(symbol),
                None => Ok(Token::new(address)),
            };
        }

        let (symbol, token) = self
            .tokens
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(symbol_or_address))
            .ok_or_else(|| eyre::eyre!("Unknown token {}, add it to the [tokens] section", symbol_or_address))?;
        token.to_token(symbol)
    }

    /// Every configured token, for labelling paths.
    pub fn known_tokens(&self) -> Vec<Token> {
        self.tokens
            .iter()
            .map(|(symbol, token)| Token::new_with_data(token.address, Some(symbol.clone()), token.decimals))
            .collect()
    }

    /// The configured pair whitelist, or `None` when every pool is accepted.
    pub fn pair_whitelist(&self) -> eyre::Result<Option<PairWhitelist>> {
        if self.whitelist.is_empty() {
            return Ok(None);
        }

        let mut whitelist = PairWhitelist::new();
        for [token_a, token_b] in &self.whitelist {
            whitelist.insert(self.resolve_token(token_a)?.get_address(), self.resolve_token(token_b)?.get_address());
        }
        Ok(Some(whitelist))
    }
}
