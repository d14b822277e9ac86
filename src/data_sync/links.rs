use super::registry::{PoolPair, PoolRegistry};
use crate::errors::RouteError;
use alloy_primitives::Address;
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, info};

/// A directed swap link: a pool exists that trades `from` into `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapLink {
    pub from: Address,
    pub to: Address,
}

impl SwapLink {
    pub fn new(from: Address, to: Address) -> Self {
        Self { from, to }
    }
}

impl Display for SwapLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}->{:#}", self.from, self.to)
    }
}

/// Directed links without duplicates, iterated in first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct SwapLinkSet {
    links: Vec<SwapLink>,
    index: HashSet<SwapLink>,
}

impl SwapLinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from pools, emitting both directions for every accepted pool.
    pub fn from_pools(pools: &[PoolPair], whitelist: Option<&PairWhitelist>) -> Self {
        let mut set = Self::new();
        for pool in pools {
            if let Some(whitelist) = whitelist {
                if !whitelist.contains(pool.token0, pool.token1) {
                    debug!(pool = %pool.address, "Skipping pool outside of the pair whitelist");
                    continue;
                }
            }
            for (from, to) in pool.get_swap_directions() {
                set.insert(SwapLink::new(from, to));
            }
        }
        set
    }

    /// Returns false if the link was already present.
    pub fn insert(&mut self, link: SwapLink) -> bool {
        if !self.index.insert(link) {
            return false;
        }
        self.links.push(link);
        true
    }

    pub fn contains(&self, from: Address, to: Address) -> bool {
        self.index.contains(&SwapLink::new(from, to))
    }

    pub fn links_from(&self, from: Address) -> impl Iterator<Item = &SwapLink> {
        self.links.iter().filter(move |link| link.from == from)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwapLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Unordered token pairs allowed to contribute links. An empty whitelist accepts everything.
#[derive(Clone, Debug, Default)]
pub struct PairWhitelist {
    pairs: HashSet<(Address, Address)>,
}

impl PairWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token_a: Address, token_b: Address) {
        self.pairs.insert(Self::sorted(token_a, token_b));
    }

    pub fn contains(&self, token_a: Address, token_b: Address) -> bool {
        self.pairs.is_empty() || self.pairs.contains(&Self::sorted(token_a, token_b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn sorted(token_a: Address, token_b: Address) -> (Address, Address) {
        if token_a <= token_b { (token_a, token_b) } else { (token_b, token_a) }
    }
}

impl FromIterator<(Address, Address)> for PairWhitelist {
    fn from_iter<I: IntoIterator<Item = (Address, Address)>>(iter: I) -> Self {
        let mut whitelist = PairWhitelist::new();
        for (token_a, token_b) in iter {
            whitelist.insert(token_a, token_b);
        }
        whitelist
    }
}

/// Reads every pool from the registry and turns it into directed links. No retries.
pub async fn collect_links<R: PoolRegistry + ?Sized>(
    registry: &R,
    whitelist: Option<&PairWhitelist>,
) -> Result<SwapLinkSet, RouteError> {
    let pools = registry.get_all_pools().await?;
    let links = SwapLinkSet::from_pools(&pools, whitelist);
    info!(pools = pools.len(), links = links.len(), "Collected swap links");
    Ok(links)
}
