use jutzo::client::error::FetchError;
use jutzo::client::services::fetch_service::FetchService;
use jutzo::common::models::BlogEntry;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry_json() -> serde_json::Value {
    json!({
        "id": "1f4bba93-d06d-4c74-b905-53f19fc5550d",
        "publicationDate": "2018-09-04T00:00:00Z",
        "title": "Becoming an architect",
        "teaser": "career path",
        "body": [{ "ordinal": 0, "text": "hello" }]
    })
}

/// Port nothing listens on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/v1/blog/newest", port)
}

#[tokio::test]
async fn success_delivers_payload_and_no_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/blog/entry/1f4bba93-d06d-4c74-b905-53f19fc5550d"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_json()))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v1/blog/entry/1f4bba93-d06d-4c74-b905-53f19fc5550d", server.uri());
    let entry: BlogEntry = FetchService::new().fetch_json(&url).await.unwrap();
    assert_eq!(entry.title, "Becoming an architect");
    assert_eq!(entry.body.len(), 1);
}

#[tokio::test]
async fn non_success_status_becomes_status_text_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Blog id 42 not found" })))
        .mount(&server)
        .await;

    let err = FetchService::new()
        .fetch_json::<BlogEntry>(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Not Found");
    assert_eq!(err.server_message(), Some("Blog id 42 not found"));
}

#[tokio::test]
async fn error_without_json_body_still_carries_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let err = FetchService::new().fetch_data(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { body: None, .. }));
    assert_eq!(err.message(), "Service Unavailable");
}

#[tokio::test]
async fn transport_failure_is_wrapped() {
    let err = FetchService::new().fetch_data(&closed_port_url()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = FetchService::new().fetch_json::<BlogEntry>(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn fetch_data_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let bytes = FetchService::new().fetch_data(&format!("{}/v1/ping", server.uri())).await.unwrap();
    assert_eq!(bytes, b"pong".to_vec());
}

#[tokio::test]
async fn callback_runs_once_with_exactly_one_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut calls = 0;
    let mut outcome: Option<Result<serde_json::Value, FetchError>> = None;
    FetchService::new()
        .fetch_json_with(&server.uri(), |result| {
            calls += 1;
            outcome = Some(result);
        })
        .await;

    assert_eq!(calls, 1);
    let err = outcome.unwrap().unwrap_err();
    assert_eq!(err.message(), "Internal Server Error");

    let mut data = None;
    FetchService::new().fetch_data_with(&closed_port_url(), |result| data = Some(result)).await;
    assert!(matches!(data, Some(Err(FetchError::Transport(_)))));
}

/// Answers every connection with `status_line` and a small JSON error body.
async fn raw_status_server(status_line: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let body = r#"{"error":"gone"}"#;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn custom_reason_phrase_is_the_error_message() {
    let url = raw_status_server("404 Entry Missing").await;

    let err = FetchService::new().fetch_data(&url).await.unwrap_err();
    assert_eq!(err.message(), "Entry Missing");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    assert_eq!(err.server_message(), Some("gone"));
}

#[tokio::test]
async fn unregistered_code_keeps_its_phrase() {
    let url = raw_status_server("499 Client Closed").await;

    let err = FetchService::new().fetch_json::<BlogEntry>(&url).await.unwrap_err();
    assert_eq!(err.message(), "Client Closed");
}
