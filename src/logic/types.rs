use crate::data_sync::SwapLink;
use crate::utils::Token;
use alloy_primitives::{Address, U256};
use std::collections::HashMap;
use std::fmt::Display;

/// An ordered token route, e.g. token0 -> token1 -> token2.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwapPath {
    tokens: Vec<Address>,
}

impl Display for SwapPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwapPath(tokens={:?})", self.tokens.iter().map(|t| format!("{t:#}")).collect::<Vec<String>>())
    }
}

impl SwapPath {
    /// Create a one hop path
    pub fn direct(from: Address, to: Address) -> Self {
        Self { tokens: vec![from, to] }
    }

    /// Create a two hop path through `mid`
    pub fn via(from: Address, mid: Address, to: Address) -> Self {
        Self { tokens: vec![from, mid, to] }
    }

    pub fn tokens(&self) -> &[Address] {
        &self.tokens
    }

    pub fn tokens_count(&self) -> usize {
        self.tokens.len()
    }

    /// The hop count of the swap path
    pub fn len(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_direct(&self) -> bool {
        self.tokens.len() == 2
    }

    pub fn source(&self) -> Option<Address> {
        self.tokens.first().copied()
    }

    pub fn destination(&self) -> Option<Address> {
        self.tokens.last().copied()
    }

    /// Directed links the path swaps through.
    pub fn hops(&self) -> impl Iterator<Item = SwapLink> + '_ {
        self.tokens.windows(2).map(|pair| SwapLink::new(pair[0], pair[1]))
    }

    /// Render the path with token symbols where they are known, e.g. `WETH -> BDEU -> BDX`.
    pub fn describe(&self, known_tokens: &HashMap<Address, Token>) -> String {
        self.tokens
            .iter()
            .map(|address| match known_tokens.get(address) {
                Some(token) => token.to_string(),
                None => format!("{address:#}"),
            })
            .collect::<Vec<String>>()
            .join(" -> ")
    }
}

/// A candidate path with the router's quote for a fixed input amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricedPath {
    pub path: SwapPath,
    pub amount_in: U256,
    /// Amount received at every hop as reported by the router
    pub amounts: Vec<U256>,
    /// Last element of `amounts`
    pub amount_out: U256,
    /// Position of the path in generation order; lower wins ties
    pub generation_index: usize,
}

impl PricedPath {
    pub fn new(path: SwapPath, amount_in: U256, amounts: Vec<U256>, amount_out: U256, generation_index: usize) -> Self {
        Self { path, amount_in, amounts, amount_out, generation_index }
    }

    /// Whether this quote should replace `other` as the best one.
    pub fn beats(&self, other: &PricedPath) -> bool {
        self.amount_out > other.amount_out || (self.amount_out == other.amount_out && self.generation_index < other.generation_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_swap_path() {
        let path = SwapPath::via(Address::repeat_byte(1), Address::repeat_byte(3), Address::repeat_byte(2));

        assert!(!path.is_empty());
        assert!(!path.is_direct());
        assert_eq!(path.tokens_count(), 3);
        assert_eq!(path.len(), 2);
        assert_eq!(path.source(), Some(Address::repeat_byte(1)));
        assert_eq!(path.destination(), Some(Address::repeat_byte(2)));
        assert_eq!(
            path.hops().collect::<Vec<_>>(),
            vec![
                SwapLink::new(Address::repeat_byte(1), Address::repeat_byte(3)),
                SwapLink::new(Address::repeat_byte(3), Address::repeat_byte(2))
            ]
        );
    }

    #[test]
    fn test_direct_swap_path() {
        let path = SwapPath::direct(Address::repeat_byte(1), Address::repeat_byte(2));

        assert!(path.is_direct());
        assert_eq!(path.len(), 1);
        assert_eq!(path.hops().count(), 1);
    }

    #[test]
    fn test_describe() {
        let weth = Token::new_with_data(Address::repeat_byte(1), Some("WETH".to_string()), None);
        let bdx = Token::new_with_data(Address::repeat_byte(2), Some("BDX".to_string()), None);
        let known: HashMap<Address, Token> = [weth, bdx].into_iter().map(|t| (t.get_address(), t)).collect();

        let path = SwapPath::via(Address::repeat_byte(1), Address::repeat_byte(3), Address::repeat_byte(2));
        let description = path.describe(&known);

        assert!(description.starts_with("WETH -> 0x"));
        assert!(description.ends_with(" -> BDX"));
    }

    #[test]
    fn test_beats() {
        let direct = PricedPath::new(
            SwapPath::direct(Address::repeat_byte(1), Address::repeat_byte(2)),
            U256::from(1),
            vec![U256::from(1), U256::from(100)],
            U256::from(100),
            0,
        );
        let mut indirect = PricedPath::new(
            SwapPath::via(Address::repeat_byte(1), Address::repeat_byte(3), Address::repeat_byte(2)),
            U256::from(1),
            vec![U256::from(1), U256::from(100), U256::from(100)],
            U256::from(100),
            1,
        );

        assert!(direct.beats(&indirect));
        assert!(!indirect.beats(&direct));

        indirect.amount_out = U256::from(101);
        assert!(indirect.beats(&direct));
    }
}
