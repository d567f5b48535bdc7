//! One-shot HTTP server for provider round trips.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Raw request text captured by [`serve_once`].
pub type Captured = Arc<Mutex<String>>;

/// Serve one response and capture the raw request. Returns the base URL.
pub async fn serve_once(status_line: &str, content_type: &str, body: &str) -> (String, Captured) {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) => panic!("listener should bind: {err}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(err) => panic!("listener should expose local addr: {err}"),
    };

    let captured: Captured = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&captured);
    let status_line = status_line.to_owned();
    let content_type = content_type.to_owned();
    let body = body.to_owned();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut raw = Vec::new();
            let mut buf = [0_u8; 4096];
            // Read until the declared body has arrived.
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some((head, rest)) = text.split_once("\r\n\r\n") {
                    let declared = head
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if rest.len() >= declared {
                        break;
                    }
                }
            }
            if let Ok(mut guard) = sink.lock() {
                *guard = String::from_utf8_lossy(&raw).into_owned();
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    (format!("http://{addr}"), captured)
}

/// Snapshot of the captured request.
pub fn request_text(captured: &Captured) -> String {
    captured.lock().map(|g| g.clone()).unwrap_or_default()
}
