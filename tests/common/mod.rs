#![allow(dead_code)]

use moodeng_ticker::config::ApiConfig;
use moodeng_ticker::display::{DisplayUpdate, DisplaySurface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TOKEN: &str = "ED5nyyWEzpPPiWimP8vYm7sD7TD3LAt3Q3gRTWHzPJBY";

pub const LIVE_BODY: &str = r#"{
    "schemaVersion": "1.0.0",
    "pairs": [
        {
            "chainId": "solana",
            "dexId": "raydium",
            "priceUsd": "0.1523",
            "priceChange": { "m5": "0.1", "h1": "-0.2", "h6": "1.3", "h24": "-3.25" },
            "fdv": 152300000,
            "marketCap": 150000000,
            "volume": { "h24": 8100000.5, "h6": 2000000 }
        },
        {
            "chainId": "solana",
            "priceUsd": "9.99",
            "priceChange": { "h24": "80" },
            "fdv": 1,
            "volume": { "h24": 1 }
        }
    ]
}"#;

pub const ZERO_PAIR_BODY: &str = r#"{
    "pairs": [
        {
            "priceUsd": "0",
            "priceChange": { "h24": "0" },
            "fdv": "0",
            "volume": { "h24": "0" }
        }
    ]
}"#;

pub const EMPTY_BODY: &str = r#"{ "schemaVersion": "1.0.0", "pairs": null }"#;

/// One canned HTTP response.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: &str) -> Self {
        Self { status: 200, body: body.to_string() }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: "{}".to_string() }
    }
}

/// Minimal HTTP/1.1 server replaying `responses` in order; the last one
/// repeats. Returns the base URL and a hit counter.
pub async fn serve(responses: Vec<CannedResponse>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let index = counter.fetch_add(1, Ordering::SeqCst);
            let response = responses
                .get(index)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or_else(|| CannedResponse::status(500));

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let reply = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.body.len(),
                response.body
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), hits)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        token_address: TOKEN.to_string(),
        timeout_secs: 5,
    }
}

/// Display surface that records everything written to it.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub updates: Mutex<Vec<DisplayUpdate>>,
    pub statuses: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    pub loading: Mutex<Vec<bool>>,
}

impl RecordingDisplay {
    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.lock().unwrap().last().copied().unwrap_or(false)
    }
}

impl DisplaySurface for RecordingDisplay {
    fn show(&self, update: &DisplayUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }

    fn set_status(&self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }

    fn set_loading(&self, loading: bool) {
        self.loading.lock().unwrap().push(loading);
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
