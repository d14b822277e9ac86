use alloy_primitives::Address;
use std::time::Duration;

/// Errors raised while collecting links, quoting paths or selecting the best path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    // Router rejected the path: missing pool on a hop or not enough liquidity
    #[error("unsupported path: {0}")]
    UnsupportedPath(String),
    #[error("quote timed out after {0:?}")]
    QuoteTimeout(Duration),
    #[error("no feasible path from {from} to {to}")]
    NoFeasiblePath { from: Address, to: Address },

    // Registry or router could not be reached
    #[error("transport error: {0}")]
    Transport(String),
}

impl RouteError {
    /// Errors that only disqualify a single candidate path.
    pub fn is_droppable(&self) -> bool {
        matches!(self, RouteError::UnsupportedPath(_) | RouteError::QuoteTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_droppable_errors() {
        assert!(RouteError::UnsupportedPath("no pair".to_string()).is_droppable());
        assert!(RouteError::QuoteTimeout(Duration::from_secs(1)).is_droppable());
        assert!(!RouteError::Transport("connection refused".to_string()).is_droppable());
        assert!(!RouteError::NoFeasiblePath { from: Address::ZERO, to: Address::ZERO }.is_droppable());
    }

    #[test]
    fn test_display() {
        let err = RouteError::NoFeasiblePath { from: Address::repeat_byte(1), to: Address::repeat_byte(2) };
        assert!(err.to_string().starts_with("no feasible path from 0x0101"));
    }
}
