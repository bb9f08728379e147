use std::sync::{Arc, Mutex};

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use speakeval::infrastructure::transcription::{HttpTransport, TransportConfig, TransportError};

async fn start_mock_server(
    status: u16,
    body: &'static str,
) -> (String, Arc<Mutex<Option<String>>>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let auth_header = Arc::new(Mutex::new(None));

    let handler = {
        let recorded = Arc::clone(&auth_header);
        move |headers: HeaderMap| {
            let recorded = Arc::clone(&recorded);
            async move {
                *recorded.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                (axum::http::StatusCode::from_u16(status).unwrap(), body)
            }
        }
    };

    let app = Router::new().route("/ping", get(handler.clone()).post(handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), auth_header, shutdown_tx)
}

fn transport() -> HttpTransport {
    HttpTransport::new(&TransportConfig::default()).unwrap()
}

#[tokio::test]
async fn given_success_response_when_getting_then_returns_body_and_sends_key() {
    let (base_url, auth_header, shutdown_tx) = start_mock_server(200, r#"{"ok":true}"#).await;

    let response = transport()
        .get(&format!("{}/ping", base_url), "test-key")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    let parsed: serde_json::Value = response.json().unwrap();
    assert_eq!(parsed["ok"], true);
    assert_eq!(auth_header.lock().unwrap().as_deref(), Some("test-key"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_getting_then_carries_status_and_body() {
    let (base_url, _auth, shutdown_tx) = start_mock_server(500, "backend exploded").await;

    let result = transport()
        .get(&format!("{}/ping", base_url), "test-key")
        .await;

    match result {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_json_body_when_posting_then_round_trips() {
    let (base_url, _auth, shutdown_tx) = start_mock_server(200, r#"{"id":"t-1"}"#).await;

    let response = transport()
        .post_json(
            &format!("{}/ping", base_url),
            "test-key",
            &serde_json::json!({ "audio_url": "https://cdn.test/abc" }),
        )
        .await
        .unwrap();

    let parsed: serde_json::Value = response.json().unwrap();
    assert_eq!(parsed["id"], "t-1");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_host_when_getting_then_reports_network_failure() {
    // Bind and release a port so nothing is listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = transport()
        .get(&format!("http://{}/ping", addr), "test-key")
        .await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}
