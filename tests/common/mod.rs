//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use warehouse_console::ConsoleConfig;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Every request the backend has received, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a programmable JSON backend. `f` receives the request path and
/// returns status and body.
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F) -> RequestLog
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let requests = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let path = request.path.clone();
                        requests.lock().unwrap().push(request);

                        let (status, body) = f(path).await;
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    log
}

/// Status line text for `status`. Codes without a known reason phrase get a
/// generic one so the client still sees the real code.
fn status_line(status: u16) -> String {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    };
    format!("{} {}", status, reason)
}

/// Backend that answers every path with the same status and body.
#[allow(dead_code)]
pub async fn start_mock_backend(addr: SocketAddr, status: u16, body: &'static str) -> RequestLog {
    start_programmable_backend(addr, move |_| async move { (status, body.to_string()) }).await
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Config pointed at `addr` with short backoff so tests stay fast.
#[allow(dead_code)]
pub fn test_config(addr: SocketAddr) -> ConsoleConfig {
    let mut config = ConsoleConfig::default();
    config.api.base_url = format!("http://{}", addr);
    config.api.no_proxy = true;
    config.retries.backoff_base_ms = 50;
    config.retries.timeout_ms = 5_000;
    config.chat.timeout_ms = 5_000;
    config.dashboard.group_timeout_ms = 5_000;
    config
}

/// Paths received so far.
#[allow(dead_code)]
pub fn paths(log: &RequestLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|r| r.path.clone()).collect()
}
