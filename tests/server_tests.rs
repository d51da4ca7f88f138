//! Socket-level test: a real listener, a raw HTTP/1.1 request, and a
//! graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use crm_contacts::contacts::{ContactLookupService, ContactStore};
use crm_contacts::{ApiDocs, Cors, Server, api};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let service = ContactLookupService::new(Arc::new(ContactStore::seeded()));
    let app = api::app(service, ApiDocs::bundled(), Cors::permissive());

    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();
    assert_ne!(addr.port(), 0);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(app, async move {
        let _ = stop_rx.await;
    }));

    let found = raw_get(addr, "/api/contacts/by-email?email=JOHN.DOE@EXAMPLE.COM").await;
    assert!(found.starts_with("HTTP/1.1 200"), "{found}");
    assert!(found.to_ascii_lowercase().contains("access-control-allow-origin: *"));
    assert!(found.contains(r#""firstName":"John""#));

    let missing = raw_get(addr, "/api/contacts/by-email?email=missing@example.com").await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");
    assert!(missing.contains("Contact not found"));

    stop_tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let service = ContactLookupService::new(Arc::new(ContactStore::seeded()));
    let app = api::app(service, ApiDocs::bundled(), Cors::permissive());

    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(app, async move {
        let _ = stop_rx.await;
    }));

    // The declared length is refused before any body byte is sent.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = "POST /api/contacts HTTP/1.1\r\nHost: localhost\r\n\
                   Content-Type: application/json\r\nContent-Length: 52428800\r\n\
                   Connection: close\r\n\r\n";
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut buf))
        .await
        .expect("server should answer without waiting for the body")
        .unwrap();
    let response = String::from_utf8(buf).unwrap();
    assert!(response.starts_with("HTTP/1.1 413"), "{response}");
    assert!(response.contains(r#"{"error":"Payload too large"}"#));

    stop_tx.send(()).unwrap();
    timeout(Duration::from_secs(5), handle).await.unwrap().unwrap().unwrap();
}
