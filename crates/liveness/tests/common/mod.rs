//! Fake upstream servers for probe and pass tests

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Read until the end of the request head or until the peer closes
async fn read_request_head(stream: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    request
}

/// Upstream answering every request with `status`, returns its base URL
pub async fn upstream(status: u16, reason: &'static str) -> String {
    upstream_with_headers(status, reason, Vec::new()).await
}

pub async fn upstream_with_headers(
    status: u16,
    reason: &'static str,
    headers: Vec<(&'static str, String)>,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut extra = String::new();
    for (name, value) in &headers {
        extra.push_str(&format!("{name}: {value}\r\n"));
    }
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-length: 0\r\nconnection: close\r\n{extra}\r\n"
    );

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let response = response.clone();
            tokio::spawn(async move {
                read_request_head(&mut stream).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Upstream answering every request with a 200 JSON `body`.
///
/// The receiver carries the request head of the first request.
pub async fn json_upstream(body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (head_tx, head_rx) = oneshot::channel();
    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    );

    tokio::spawn(async move {
        let mut head_tx = Some(head_tx);
        while let Ok((mut stream, _)) = listener.accept().await {
            let head = String::from_utf8_lossy(&read_request_head(&mut stream).await).into_owned();
            if let Some(tx) = head_tx.take() {
                let _ = tx.send(head);
            }
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), head_rx)
}

/// Upstream that accepts one connection and never answers.
///
/// The receiver resolves once the client has closed that connection, and
/// carries the request head that was received.
pub async fn silent_upstream() -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let head = String::from_utf8_lossy(&read_request_head(&mut stream).await).into_owned();

        let mut buf = [0u8; 256];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        let _ = closed_tx.send(head);
    });

    (format!("http://{addr}"), closed_rx)
}

/// Address nothing listens on
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
