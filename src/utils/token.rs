use crate::utils::constants::{DEFAULT_DECIMALS, MAX_TOKEN_DECIMALS};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Token metadata used to name path hops and scale amounts. Identity is the address only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    decimals: u8,
    symbol: Option<String>,
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.get_address()
    }
}

impl Eq for Token {}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.get_address())
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{symbol}"),
            None => write!(f, "{:#}", self.address),
        }
    }
}

impl Token {
    pub fn new(address: Address) -> Token {
        Token { address, decimals: DEFAULT_DECIMALS, symbol: None }
    }

    pub fn new_with_data(address: Address, symbol: Option<String>, decimals: Option<u8>) -> Token {
        Token { address, symbol, decimals: decimals.unwrap_or(DEFAULT_DECIMALS) }
    }

    // For testing purposes
    pub fn repeat_byte(byte: u8) -> Token {
        Token::new(Address::repeat_byte(byte))
    }

    pub fn get_symbol(&self) -> String {
        self.symbol.clone().unwrap_or(self.address.to_string())
    }

    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    pub fn get_exp(&self) -> U256 {
        U256::from(10).pow(U256::from(self.decimals))
    }

    pub fn get_address(&self) -> Address {
        self.address
    }

    /// Lossy conversion for logs and reports.
    pub fn to_float(&self, value: U256) -> f64 {
        if self.decimals == 0 {
            return u128::try_from(value).map(|v| v as f64).unwrap_or(f64::MAX);
        }
        let (div, rem) = value.div_rem(self.get_exp());
        match (u128::try_from(div), u128::try_from(rem), u128::try_from(self.get_exp())) {
            (Ok(div), Ok(rem), Ok(exp)) => div as f64 + rem as f64 / exp as f64,
            _ => f64::MAX,
        }
    }

    /// Parses a decimal string such as `"0.0001"` into base units of this token.
    pub fn parse_amount(&self, value: &str) -> eyre::Result<U256> {
        if self.decimals > MAX_TOKEN_DECIMALS {
            return Err(eyre::eyre!("{} decimals do not fit in uint256", self.decimals));
        }
        let value = value.trim();
        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(eyre::eyre!("empty amount"));
        }
        if fraction.len() > self.decimals as usize {
            return Err(eyre::eyre!("amount {} has more than {} decimals", value, self.decimals));
        }

        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10).map_err(|e| eyre::eyre!("invalid amount {}: {}", value, e))?
        };
        let fraction = if fraction.is_empty() {
            U256::ZERO
        } else {
            let scale = U256::from(10).pow(U256::from(self.decimals as usize - fraction.len()));
            U256::from_str_radix(fraction, 10).map_err(|e| eyre::eyre!("invalid amount {}: {}", value, e))? * scale
        };

        whole
            .checked_mul(self.get_exp())
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(|| eyre::eyre!("amount {} overflows uint256", value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serialize() {
        let bdx = Token::new_with_data(Address::repeat_byte(0x11), Some("BDX".to_string()), Some(18));

        let serialized = serde_json::to_string(&bdx).unwrap();
        assert_eq!(serialized, "{\"address\":\"0x1111111111111111111111111111111111111111\",\"decimals\":18,\"symbol\":\"BDX\"}");
    }

    #[test]
    fn test_identity_is_address() {
        let a = Token::new_with_data(Address::repeat_byte(1), Some("WETH".to_string()), Some(18));
        let b = Token::new_with_data(Address::repeat_byte(1), None, Some(8));
        assert_eq!(a, b);
        assert_ne!(a, Token::repeat_byte(2));
    }

    #[test]
    fn test_parse_amount() {
        let weth = Token::repeat_byte(1);
        assert_eq!(weth.parse_amount("1").unwrap(), U256::from(10).pow(U256::from(18)));
        assert_eq!(weth.parse_amount("0.0001").unwrap(), U256::from(100_000_000_000_000u64));
        assert_eq!(weth.parse_amount(".5").unwrap(), U256::from(500_000_000_000_000_000u64));

        let wbtc = Token::new_with_data(Address::repeat_byte(2), Some("WBTC".to_string()), Some(8));
        assert_eq!(wbtc.parse_amount("1.5").unwrap(), U256::from(150_000_000u64));
        assert!(wbtc.parse_amount("0.000000001").is_err());
        assert!(wbtc.parse_amount("abc").is_err());
        assert!(wbtc.parse_amount("").is_err());

        let huge = Token::new_with_data(Address::repeat_byte(3), None, Some(78));
        assert!(huge.parse_amount("1").is_err());
    }

    #[test]
    fn test_to_float() {
        let weth = Token::repeat_byte(1);
        let amount = weth.parse_amount("130.25").unwrap();
        assert!((weth.to_float(amount) - 130.25).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let bdeu = Token::new_with_data(Address::repeat_byte(3), Some("BDEU".to_string()), None);
        assert_eq!(bdeu.to_string(), "BDEU");
        assert_eq!(bdeu.get_decimals(), 18);
    }
}
