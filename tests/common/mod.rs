//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request as seen on the wire: method and raw (undecoded) path.
pub type Seen = Arc<Mutex<Vec<(String, String)>>>;

/// Start a programmable mock site on an ephemeral port.
///
/// `files` maps decoded paths to (status, body). Unknown paths answer 404.
/// HEAD requests get the status and headers only.
#[allow(dead_code)]
pub async fn start_mock_site(files: HashMap<String, (u16, String)>) -> (SocketAddr, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let files = Arc::new(files);
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let files = files.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let Some((method, raw_path)) = read_request_line(&mut socket).await else {
                            return;
                        };
                        log.lock().push((method.clone(), raw_path.clone()));

                        let (status, body) = files
                            .get(&decode(&raw_path))
                            .cloned()
                            .unwrap_or((404, String::new()));
                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let payload = if method == "HEAD" { "" } else { body.as_str() };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            payload
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

    (addr, seen)
}

/// Build a file map from (path, body) pairs, all served with 200.
#[allow(dead_code)]
pub fn files(entries: &[(&str, &str)]) -> HashMap<String, (u16, String)> {
    entries
        .iter()
        .map(|(path, body)| (path.to_string(), (200, body.to_string())))
        .collect()
}

async fn read_request_line(socket: &mut tokio::net::TcpStream) -> Option<(String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let mut parts = head.lines().next()?.split_whitespace();
    Some((parts.next()?.to_string(), parts.next()?.to_string()))
}

fn decode(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}
