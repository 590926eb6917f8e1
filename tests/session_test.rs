//! Integration tests for extraction sessions over TCP.

#![cfg(feature = "async")]

use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;

use cfptext::{Error, ExtractionSession, Record, SessionConfig};

/// Mock extraction service accepting a single connection.
struct MockService {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl MockService {
    async fn accept(listener: TcpListener) -> Self {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    async fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await.unwrap() == 0 {
            return None;
        }
        Some(line)
    }

    async fn next_request(&mut self) -> Option<Value> {
        let line = self.next_line().await?;
        Some(serde_json::from_str(&line).unwrap())
    }

    async fn send(&mut self, frame: Value) {
        let mut line = frame.to_string();
        line.push('\n');
        self.send_raw(line.as_bytes()).await;
    }

    async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.unwrap();
        self.writer.flush().await.unwrap();
    }
}

async fn bind() -> (TcpListener, SessionConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    (listener, SessionConfig::new().with_address(address))
}

#[tokio::test]
async fn test_round_trip() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        let request = service.next_request().await.unwrap();
        assert_eq!(request["event"], "extractCrawlData");
        assert_eq!(request["data"], "Deadline | Jan 1\n");

        let pairs = r#"[["deadlineName","Papers"],["deadline","Jan 1"]]"#;
        service.send(json!({ "id": request["id"], "data": pairs })).await;
        assert!(service.next_request().await.is_none());
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    let groups = session.extract_records("Deadline | Jan 1\n").await.unwrap();
    assert_eq!(groups.get("deadline").unwrap(), &[Record::new("Papers", "Jan 1")]);
    session.close().await.unwrap();

    server.await.unwrap();
}

#[tokio::test]
async fn test_array_payload_accepted() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        let request = service.next_request().await.unwrap();
        service
            .send(json!({ "id": request["id"], "data": [["start", "May 1"]] }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    let pairs = session.request_pairs("text").await.unwrap();
    assert_eq!(pairs, vec![("start".to_string(), "May 1".to_string())]);

    server.await.unwrap();
}

#[tokio::test]
async fn test_stale_responses_are_skipped() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        let request = service.next_request().await.unwrap();
        service.send(json!({ "id": 999, "data": "[[\"aName\",\"stale\"]]" })).await;
        service
            .send(json!({ "id": request["id"], "data": "[[\"aName\",\"fresh\"]]" }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    let groups = session.extract_records("text").await.unwrap();
    assert_eq!(groups.get("a").unwrap(), &[Record::named("fresh")]);

    server.await.unwrap();
}

#[tokio::test]
async fn test_timeout_then_late_answer_is_discarded() {
    let (listener, config) = bind().await;
    let config = config.with_timeout(Duration::from_millis(400));

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;

        let first = service.next_request().await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        service.send(json!({ "id": first["id"], "data": "[[\"a\",\"late\"]]" })).await;

        let second = service.next_request().await.unwrap();
        assert_ne!(first["id"], second["id"]);
        service
            .send(json!({ "id": second["id"], "data": "[[\"a\",\"on time\"]]" }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();

    let err = session.request_pairs("first").await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(400)));

    let pairs = session.request_pairs("second").await.unwrap();
    assert_eq!(pairs, vec![("a".to_string(), "on time".to_string())]);
    assert_eq!(session.request_count(), 2);

    server.await.unwrap();
}

#[tokio::test]
async fn test_timeout_mid_response_line() {
    let (listener, config) = bind().await;
    let config = config.with_timeout(Duration::from_millis(500));

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;

        let first = service.next_request().await.unwrap();
        let mut late = json!({ "id": first["id"], "data": "[[\"a\",\"late\"]]" }).to_string();
        late.push('\n');
        let (head, tail) = late.as_bytes().split_at(10);
        service.send_raw(head).await;
        tokio::time::sleep(Duration::from_millis(700)).await;
        service.send_raw(tail).await;

        let second = service.next_request().await.unwrap();
        service
            .send(json!({ "id": second["id"], "data": "[[\"a\",\"on time\"]]" }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();

    let first = session.request_pairs("first").await;
    assert!(matches!(first, Err(Error::Timeout(_))));

    // The rest of the late line completes the held bytes and is skipped.
    let second = session.request_pairs("second").await.unwrap();
    assert_eq!(second, vec![("a".to_string(), "on time".to_string())]);

    server.await.unwrap();
}

#[tokio::test]
async fn test_timeout_mid_request_write() {
    let (listener, config) = bind().await;
    let config = config.with_timeout(Duration::from_secs(1));

    // Larger than the loopback socket buffers, so the write stalls.
    let big = "x".repeat(16 * 1024 * 1024);
    let expected_len = big.len();

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let first = service.next_line().await.unwrap();
        assert!(first.starts_with(r#"{"id":1,"#));
        assert!(first.ends_with("\"}\n"));
        assert!(first.len() > expected_len);
        service.send(json!({ "id": 1, "data": "[[\"a\",\"late\"]]" })).await;

        let second = service.next_request().await.unwrap();
        assert_eq!(second["id"], 2);
        assert_eq!(second["data"], "small");
        service
            .send(json!({ "id": 2, "data": "[[\"a\",\"on time\"]]" }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();

    let first = session.request_pairs(&big).await;
    assert!(matches!(first, Err(Error::Timeout(_))));

    // The unsent tail goes out first, so both requests arrive as whole lines.
    let second = session.request_pairs("small").await.unwrap();
    assert_eq!(second, vec![("a".to_string(), "on time".to_string())]);

    server.await.unwrap();
}

#[tokio::test]
async fn test_service_error_frame() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        let request = service.next_request().await.unwrap();
        service
            .send(json!({ "id": request["id"], "error": "model not loaded" }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    let result = session.extract_records("text").await;
    assert!(matches!(result, Err(Error::Service(m)) if m == "model not loaded"));

    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        let request = service.next_request().await.unwrap();
        service
            .send(json!({ "id": request["id"], "data": "Sorry, I could not find any dates." }))
            .await;
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    assert!(matches!(
        session.extract_records("text").await,
        Err(Error::InvalidResponse(_))
    ));

    server.await.unwrap();
}

#[tokio::test]
async fn test_disconnect_before_answer() {
    let (listener, config) = bind().await;

    let server = tokio::spawn(async move {
        let mut service = MockService::accept(listener).await;
        service.next_request().await.unwrap();
        drop(service);
    });

    let mut session = ExtractionSession::open(config).await.unwrap();
    assert!(matches!(
        session.request_pairs("text").await,
        Err(Error::Disconnected)
    ));

    server.await.unwrap();
}

#[tokio::test]
async fn test_open_fails_without_service() {
    let (listener, config) = bind().await;
    drop(listener);

    assert!(matches!(
        ExtractionSession::open(config).await,
        Err(Error::Io(_))
    ));
}
