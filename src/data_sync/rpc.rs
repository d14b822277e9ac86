use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// Failure of a single `eth_call`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// The node executed the call and the contract reverted.
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Minimal JSON-RPC client for read-only contract calls.
#[derive(Debug)]
pub struct EthCallClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl EthCallClient {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, CallError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CallError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_http_client(rpc_url, http_client))
    }

    /// Uses a preconfigured HTTP client, e.g. one with custom proxy or TLS settings.
    pub fn with_http_client(rpc_url: String, http_client: reqwest::Client) -> Self {
        Self { http_client, rpc_url, request_id: AtomicU64::new(1) }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Encodes `call`, executes it against `to` at the latest block and decodes the return value.
    pub async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return, CallError> {
        let response = self.eth_call(to, call.abi_encode().into()).await?;

        C::abi_decode_returns(&response).map_err(|e| CallError::Transport(format!("failed to decode {}: {}", C::SIGNATURE, e)))
    }

    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, CallError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request_body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                {
                    "to": format!("{:#x}", to),
                    "data": format!("{:#x}", data)
                },
                "latest"
            ],
            "id": id
        });
        trace!(%to, id, "eth_call");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let response_json: Value = response.json().await.map_err(|e| CallError::Transport(e.to_string()))?;

        parse_call_response(&response_json)
    }
}

/// Extracts the returned bytes from a JSON-RPC response, classifying node errors.
pub fn parse_call_response(response: &Value) -> Result<Bytes, CallError> {
    if let Some(error) = response.get("error") {
        return Err(classify_rpc_error(error));
    }

    let result = response
        .get("result")
        .and_then(|r| r.as_str())
        .ok_or_else(|| CallError::Transport("missing result in RPC response".to_string()))?;

    let bytes = hex::decode(result.trim_start_matches("0x")).map_err(|e| CallError::Transport(format!("invalid hex result: {e}")))?;
    Ok(bytes.into())
}

// Code 3 is the standard revert code; hardhat and ganache report reverts as -32603/-32000 with a message.
fn classify_rpc_error(error: &Value) -> CallError {
    let code = error.get("code").and_then(|c| c.as_i64());
    let message = error.get("message").and_then(|m| m.as_str()).unwrap_or_default().to_string();

    if code == Some(3) || message.to_lowercase().contains("revert") {
        CallError::Reverted(message)
    } else {
        CallError::Transport(format!("RPC error {}: {}", code.unwrap_or_default(), message))
    }
}
