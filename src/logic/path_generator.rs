use super::types::SwapPath;
use crate::data_sync::SwapLinkSet;
use alloy_primitives::Address;
use tracing::debug;

/// Enumerate the candidate paths from `source` to `destination`.
///
/// The direct path always comes first, even without a backing link: the router decides
/// whether it is priceable. It is followed by one `[source, mid, destination]` path for
/// every `mid` with links `source -> mid` and `mid -> destination`, in link-set order.
/// Paths never have more than three tokens.
pub fn generate_paths(source: Address, destination: Address, links: &SwapLinkSet) -> Vec<SwapPath> {
    if source == destination {
        debug!(%source, "Source and destination are the same token, no path to generate");
        return Vec::new();
    }

    let mut paths = vec![SwapPath::direct(source, destination)];

    for first_hop in links.links_from(source) {
        let mid = first_hop.to;
        if mid == destination || mid == source {
            continue;
        }
        if links.contains(mid, destination) {
            paths.push(SwapPath::via(source, mid, destination));
        }
    }

    debug!(%source, %destination, candidates = paths.len(), "Generated candidate paths");
    paths
}
