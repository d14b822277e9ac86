use super::types::PricedPath;
use crate::errors::RouteError;
use alloy_primitives::Address;
use tracing::info;

/// Pick the path with the greatest output amount.
///
/// On equal output the path generated first wins, so the direct path beats any indirect
/// path quoting the same amount. The result does not depend on the order of `priced_paths`.
pub fn choose_best_path(source: Address, destination: Address, priced_paths: Vec<PricedPath>) -> Result<PricedPath, RouteError> {
    let candidates = priced_paths.len();
    let mut best: Option<PricedPath> = None;

    for candidate in priced_paths {
        if best.as_ref().is_none_or(|current| candidate.beats(current)) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(RouteError::NoFeasiblePath { from: source, to: destination })?;
    info!(path = %best.path, amount_out = %best.amount_out, candidates, "Selected best path");
    Ok(best)
}
