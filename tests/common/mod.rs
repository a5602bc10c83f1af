//! Shared helpers for integration tests: a canned measurement source and a
//! minimal in-process HTTP server standing in for the IFTTT service

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use speed_watcher::collectors::{MeasurementSource, SpeedTestError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// speedtest-cli output measuring 150 Mbps down, 25 Mbps up and 80 ms latency
pub const SLOW_LATENCY_OUTPUT: &str = r#"{
    "download": 157286400.0,
    "upload": 26214400.0,
    "ping": 80.0,
    "server": {"id": "1234", "sponsor": "Example ISP", "name": "Auckland", "country": "New Zealand", "latency": 80.0}
}"#;

/// speedtest-cli output measuring 94.19 Mbps down, 22.37 Mbps up and 23.46 ms latency
pub const HEALTHY_OUTPUT: &str = r#"{
    "download": 98765432.1,
    "upload": 23456789.0,
    "ping": 23.456,
    "server": {"id": "1234", "latency": 23.456}
}"#;

/// Server id passed to the last measurement, `None` until one runs
pub type RequestedServer = Arc<Mutex<Option<Option<String>>>>;

/// Returns fixed output and remembers which server was requested
pub struct CannedSource {
    output: String,
    requested_server: RequestedServer,
}

impl CannedSource {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
            requested_server: Arc::new(Mutex::new(None)),
        }
    }

    /// Handle that stays readable after the source moves into a runner
    pub fn requested_server(&self) -> RequestedServer {
        Arc::clone(&self.requested_server)
    }
}

#[async_trait]
impl MeasurementSource for CannedSource {
    async fn measure(&self, server_id: Option<&str>) -> Result<String, SpeedTestError> {
        *self.requested_server.lock().unwrap() = Some(server_id.map(str::to_string));
        Ok(self.output.clone())
    }
}

/// A request received by [`WebhookStub`]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Value,
}

/// Answers every request with a fixed status code, or never answers at all
pub struct WebhookStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl WebhookStub {
    /// Responds to every request with `status`
    pub async fn start(status: u16) -> Self {
        Self::spawn(Some(status)).await
    }

    /// Accepts connections and reads requests but never responds
    pub async fn silent() -> Self {
        Self::spawn(None).await
    }

    async fn spawn(status: Option<u16>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let captured = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let captured = Arc::clone(&captured);
                tokio::spawn(async move {
                    handle_connection(stream, status, captured).await;
                });
            }
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for WebhookStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on, so connections are refused
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn handle_connection(
    mut stream: TcpStream,
    status: Option<u16>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.to_string());
            }
        }
    }

    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let body = serde_json::from_slice(&buf[header_end..header_end + content_length])
        .unwrap_or(Value::Null);
    requests.lock().unwrap().push(CapturedRequest {
        method,
        path,
        content_type,
        body,
    });

    match status {
        Some(code) => {
            let response = format!(
                "HTTP/1.1 {code} Stub\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
        None => tokio::time::sleep(Duration::from_secs(60)).await,
    }
}
