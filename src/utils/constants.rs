pub const DEFAULT_DECIMALS: u8 = 18;

// Paths are [source, destination] or [source, mid, destination]
pub const MAX_PATH_TOKENS: usize = 3;

pub const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENT_QUOTES: usize = 8;
pub const DEFAULT_MAX_CONCURRENT_REGISTRY_READS: usize = 8;

// 10^77 is the largest power of ten that fits in a uint256
pub const MAX_TOKEN_DECIMALS: u8 = 77;

pub const DEFAULT_RPC_HTTP_URL: &str = "http://127.0.0.1:8545";
