//! Resilient fetch client against a real HTTP backend.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use warehouse_console::http::{ApiRequest, X_REQUEST_ID};
use warehouse_console::resilience::{FetchError, FetchOptions, FetchOutcome, ResilientClient};

mod common;

fn client_for(addr: SocketAddr) -> ResilientClient {
    ResilientClient::http(&common::test_config(addr).api).unwrap()
}

#[tokio::test]
async fn test_overview_recovers_after_two_server_errors() {
    let addr: SocketAddr = "127.0.0.1:28301".parse().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let log = common::start_programmable_backend(addr, move |_| {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                (500, r#"{"detail":"boom"}"#.to_string())
            } else {
                (200, r#"{"inventory":{"total_products":42}}"#.to_string())
            }
        }
    })
    .await;

    let start = Instant::now();
    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/dashboard/overview"),
            FetchOptions::new().backoff_base_ms(50),
        )
        .await;

    assert_eq!(
        outcome,
        FetchOutcome::Success {
            payload: json!({"inventory": {"total_products": 42}})
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // 50 ms then 100 ms of backoff.
    assert!(start.elapsed() >= Duration::from_millis(150));
    assert_eq!(
        common::paths(&log),
        vec!["/api/dashboard/overview"; 3]
    );
}

#[tokio::test]
async fn test_always_unavailable_exhausts_attempts() {
    let addr: SocketAddr = "127.0.0.1:28302".parse().unwrap();
    let log = common::start_mock_backend(addr, 503, r#"{"detail":"down"}"#).await;

    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/dashboard/overview"),
            FetchOptions::new().backoff_base_ms(20),
        )
        .await;

    assert_eq!(
        outcome,
        FetchOutcome::Failure {
            reason: FetchError::RetryExhausted {
                attempts: 3,
                last: Box::new(FetchError::HttpStatus { status: 503 }),
            }
        }
    );
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unreachable_backend_uses_fallback() {
    // Nothing listens on this port.
    let addr: SocketAddr = "127.0.0.1:28303".parse().unwrap();
    let fallback = json!({"alerts": []});

    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/dashboard/inventory-alerts"),
            FetchOptions::new()
                .max_attempts(2)
                .backoff_base_ms(10)
                .with_fallback(fallback.clone()),
        )
        .await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.payload(), Some(&fallback));
    assert!(matches!(
        outcome.reason(),
        Some(FetchError::RetryExhausted { attempts: 2, .. })
    ));
}

#[tokio::test]
async fn test_slow_backend_hits_deadline() {
    let addr: SocketAddr = "127.0.0.1:28304".parse().unwrap();
    let log = common::start_programmable_backend(addr, |_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "{}".to_string())
    })
    .await;

    let start = Instant::now();
    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/inventory/summary"),
            FetchOptions::new().timeout_ms(300),
        )
        .await;

    assert_eq!(
        outcome,
        FetchOutcome::Failure {
            reason: FetchError::TimeoutExceeded { timeout_ms: 300 }
        }
    );
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_request_carries_id_and_json_accept() {
    let addr: SocketAddr = "127.0.0.1:28305".parse().unwrap();
    let log = common::start_mock_backend(addr, 200, r#"{"items":[]}"#).await;

    let request = ApiRequest::get("/api/inventory/summary");
    let outcome = client_for(addr)
        .fetch_with_retry(&request, FetchOptions::new())
        .await;
    assert!(outcome.is_success());

    let recorded = log.lock().unwrap()[0].clone();
    assert_eq!(recorded.method, "GET");
    assert_eq!(recorded.header(X_REQUEST_ID), Some(request.request_id.to_string().as_str()));
    assert_eq!(recorded.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_non_json_body_is_a_failed_attempt() {
    let addr: SocketAddr = "127.0.0.1:28306".parse().unwrap();
    common::start_mock_backend(addr, 200, "<html>maintenance</html>").await;

    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/outbound/orders"),
            FetchOptions::new().max_attempts(1),
        )
        .await;

    assert!(matches!(
        outcome.reason(),
        Some(FetchError::RetryExhausted { last, .. }) if matches!(**last, FetchError::Decode(_))
    ));
}

#[tokio::test]
async fn test_uncommon_status_is_reported_as_sent() {
    let addr: SocketAddr = "127.0.0.1:28307".parse().unwrap();
    let log = common::start_mock_backend(addr, 429, r#"{"detail":"slow down"}"#).await;

    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/inbound/shipments"),
            FetchOptions::new().max_attempts(2).backoff_base_ms(10),
        )
        .await;

    assert_eq!(outcome.label(), "failure");
    assert_eq!(outcome.reason().and_then(FetchError::status), Some(429));
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_without_reason_phrase_is_not_success() {
    let addr: SocketAddr = "127.0.0.1:28308".parse().unwrap();
    common::start_mock_backend(addr, 599, r#"{"detail":"odd"}"#).await;

    let outcome = client_for(addr)
        .fetch_with_retry(
            &ApiRequest::get("/api/inbound/shipments"),
            FetchOptions::new().max_attempts(1),
        )
        .await;

    assert_eq!(outcome.reason().and_then(FetchError::status), Some(599));
}
