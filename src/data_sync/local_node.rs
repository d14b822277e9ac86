//! In-process JSON-RPC node answering `eth_call` over HTTP/1.1, for adapter tests.

use super::rpc::EthCallClient;
use alloy_primitives::Address;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) enum NodeReply {
    /// ABI encoded return data
    Data(Vec<u8>),
    Error { code: i64, message: String },
}

type CallHandler = Arc<dyn Fn(Address, &[u8]) -> NodeReply + Send + Sync>;

#[derive(Clone)]
struct NodeState {
    handler: CallHandler,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
}

pub(crate) struct LocalNode {
    url: String,
    state: NodeState,
}

impl LocalNode {
    /// Starts a node that answers every `eth_call` with `handler(to, calldata)` after `delay`.
    pub(crate) async fn start<F>(delay: Duration, handler: F) -> LocalNode
    where
        F: Fn(Address, &[u8]) -> NodeReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let state = NodeState {
            handler: Arc::new(handler),
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(AtomicUsize::new(0)),
        };

        let accept_state = state.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve_connection(stream, accept_state.clone()));
            }
        });

        LocalNode { url, state }
    }

    pub(crate) fn client(&self) -> Arc<EthCallClient> {
        let http_client = reqwest::Client::builder().no_proxy().timeout(Duration::from_secs(10)).build().unwrap();
        Arc::new(EthCallClient::with_http_client(self.url.clone(), http_client))
    }

    /// Highest number of requests the node was processing at the same time.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

async fn serve_connection(mut stream: TcpStream, state: NodeState) {
    let mut buffer = Vec::new();
    loop {
        let Some((body_start, body_len)) = read_request(&mut stream, &mut buffer).await else {
            return;
        };
        let request: Value = serde_json::from_slice(&buffer[body_start..body_start + body_len]).unwrap();
        buffer.drain(..body_start + body_len);

        state.requests.fetch_add(1, Ordering::SeqCst);
        let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        state.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(state.delay).await;

        let params = &request["params"][0];
        let to: Address = params["to"].as_str().unwrap().parse().unwrap();
        let data = hex::decode(params["data"].as_str().unwrap().trim_start_matches("0x")).unwrap();
        let reply = match (state.handler)(to, &data) {
            NodeReply::Data(data) => json!({"jsonrpc": "2.0", "id": request["id"], "result": format!("0x{}", hex::encode(data))}),
            NodeReply::Error { code, message } => {
                json!({"jsonrpc": "2.0", "id": request["id"], "error": {"code": code, "message": message}})
            }
        };
        state.in_flight.fetch_sub(1, Ordering::SeqCst);

        let payload = reply.to_string();
        let response =
            format!("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}", payload.len(), payload);
        if stream.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

// Returns the body offset and length once a whole request is buffered, None when the peer closed.
async fn read_request(stream: &mut TcpStream, buffer: &mut Vec<u8>) -> Option<(usize, usize)> {
    loop {
        if let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|len| len.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + body_len {
                return Some((header_end + 4, body_len));
            }
        }

        let mut chunk = [0u8; 4096];
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
    }
}
