//! Streaming integration tests for oanda-rs.
//!
//! A wiremock server plays the streaming host: each mock returns a whole
//! newline-delimited body, and the server closing the body ends the stream.
//!
//! Run with: cargo test --test streaming_tests

#![cfg(feature = "streaming")]

use std::sync::Once;
use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oanda_rs::prelude::*;

static INIT: Once = Once::new();

const ACCOUNT: &str = "101-004-1234567-001";

const HEARTBEAT: &str = r#"{"type":"HEARTBEAT","time":"2024-03-01T12:00:00.000000000Z"}"#;
const PRICE: &str = r#"{"type":"PRICE","time":"2024-03-01T12:00:00.500000000Z","bids":[{"price":"1.10000","liquidity":10000000}],"asks":[{"price":"1.10020","liquidity":10000000}],"closeoutBid":"1.09985","closeoutAsk":"1.10035","status":"tradeable","tradeable":true,"instrument":"EUR_USD"}"#;

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Start a mock server serving both REST and streaming paths
async fn setup() -> (MockServer, OandaClient) {
    init_logging();
    let server = MockServer::start().await;
    let client = OandaClient::new(
        Credentials::new(ACCOUNT, "test-token"),
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_stream_url(server.uri()),
    )
    .expect("client");
    (server, client)
}

fn stream_body(lines: &[&str]) -> String {
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

// =============================================================================
// Pricing Stream Tests
// =============================================================================

#[tokio::test]
async fn test_price_stream_request_and_delivery() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .and(query_param("instruments", "EUR_USD,USD_JPY"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept-Datetime-Format", "RFC3339"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(stream_body(&[HEARTBEAT, PRICE, HEARTBEAT])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut updates = Vec::new();
    let mut session = client.streaming();
    let result = session
        .stream_prices(&["EUR_USD", "USD_JPY"], &cancel, |update: PriceUpdate| {
            updates.push(update);
            Ok(())
        })
        .await;

    assert!(result.is_ok(), "stream failed: {result:?}");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].instrument, "EUR_USD");
    assert_eq!(updates[0].time, "2024-03-01T12:00:00.500000000Z");
    assert_eq!(updates[0].best_bid(), Some(dec!(1.10000)));
    assert_eq!(updates[0].closeout_ask, Some(dec!(1.10035)));
}

#[tokio::test]
async fn test_price_stream_server_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[
            HEARTBEAT,
            r#"{"errorMessage":"Invalid value specified for 'instruments'"}"#,
            PRICE,
        ])))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut calls = 0;
    let mut session = client.streaming();
    let result = session
        .stream_prices(&["EUR_USD"], &cancel, |_: PriceUpdate| {
            calls += 1;
            Ok(())
        })
        .await;

    match result {
        Err(Error::StreamServer(message)) => {
            assert_eq!(message, "Invalid value specified for 'instruments'")
        }
        other => panic!("expected StreamServer, got {other:?}"),
    }
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_price_stream_rejected_on_connect() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errorMessage": "Invalid value specified for 'instruments'"
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut session = client.streaming();
    let result = session
        .stream_prices(&["NOT_AN_INSTRUMENT"], &cancel, |_: PriceUpdate| Ok(()))
        .await;

    match result {
        Err(Error::Api { status, message, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid value specified for 'instruments'");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_price_stream_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorMessage": "Insufficient authorization to perform request."
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut session = client.streaming();
    let result = session
        .stream_prices(&["EUR_USD"], &cancel, |_: PriceUpdate| Ok(()))
        .await;

    assert!(matches!(result, Err(Error::Unauthorized(_))));
}

#[tokio::test]
async fn test_price_stream_requires_instruments() {
    let (server, client) = setup().await;

    let empty: [&str; 0] = [];
    let cancel = CancellationToken::new();
    let mut session = client.streaming();
    let result = session
        .stream_prices(&empty, &cancel, |_: PriceUpdate| Ok(()))
        .await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_handler_error_ends_stream() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(stream_body(&[PRICE, PRICE, PRICE])),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut calls = 0;
    let mut session = client.streaming();
    let result = session
        .stream_prices(&["EUR_USD"], &cancel, |_: PriceUpdate| {
            calls += 1;
            Err("strategy halted".into())
        })
        .await;

    assert!(matches!(result, Err(Error::Handler(ref e)) if e.to_string() == "strategy halted"));
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_cancel_while_connecting() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(stream_body(&[PRICE]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let mut calls = 0;
    let mut session = client.streaming();
    let result = timeout(
        Duration::from_secs(5),
        session.stream_prices(&["EUR_USD"], &cancel, |_: PriceUpdate| {
            calls += 1;
            Ok(())
        }),
    )
    .await
    .expect("cancellation was not observed");

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_session_is_reusable_after_stream_ends() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[PRICE])))
        .expect(2)
        .mount(&server)
        .await;

    let instruments = [InstrumentName::new("EUR_USD")];
    let cancel = CancellationToken::new();
    let mut total = 0;
    let mut session = client.streaming();
    for _ in 0..2 {
        session
            .stream_prices(&instruments, &cancel, |_: PriceUpdate| {
                total += 1;
                Ok(())
            })
            .await
            .unwrap();
    }
    assert_eq!(total, 2);
}

// =============================================================================
// Transaction Stream Tests
// =============================================================================

#[tokio::test]
async fn test_transaction_stream_delivery() {
    let (server, client) = setup().await;

    let fill = r#"{"type":"ORDER_FILL","time":"2024-03-01T12:00:01.000000000Z","id":"11","accountID":"101-004-1234567-001","batchID":"10","orderID":"10","units":"100"}"#;
    let heartbeat = r#"{"type":"HEARTBEAT","lastTransactionID":"11","time":"2024-03-01T12:00:05.000000000Z"}"#;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/transactions/stream")))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[fill, heartbeat])))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut updates = Vec::new();
    let mut session = client.streaming();
    session
        .stream_transactions(&cancel, |update: TransactionUpdate| {
            updates.push(update);
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].kind, "ORDER_FILL");
    assert_eq!(updates[0].id.as_deref(), Some("11"));
    assert_eq!(updates[0].batch_id.as_deref(), Some("10"));
    assert_eq!(updates[0].extra.get("orderID"), Some(&json!("10")));
    assert_eq!(updates[0].extra.get("units"), Some(&json!("100")));
}

#[tokio::test]
async fn test_transaction_stream_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/transactions/stream")))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[
            r#"{"errorMessage":"Account is locked"}"#,
        ])))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut session = client.streaming();
    let result = session
        .stream_transactions(&cancel, |_: TransactionUpdate| Ok(()))
        .await;

    assert!(matches!(result, Err(Error::StreamServer(ref m)) if m == "Account is locked"));
    assert!(result.unwrap_err().is_server_error());
}

#[tokio::test]
async fn test_price_and_transaction_streams_concurrently() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[PRICE, PRICE])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ACCOUNT}/transactions/stream")))
        .respond_with(ResponseTemplate::new(200).set_body_string(stream_body(&[
            r#"{"type":"CREATE","time":"2024-03-01T12:00:00Z","id":"1"}"#,
        ])))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut prices = client.streaming();
    let mut transactions = client.streaming();
    let mut price_count = 0;
    let mut txn_count = 0;

    let (a, b) = tokio::join!(
        prices.stream_prices(&["EUR_USD"], &cancel, |_: PriceUpdate| {
            price_count += 1;
            Ok(())
        }),
        transactions.stream_transactions(&cancel, |_: TransactionUpdate| {
            txn_count += 1;
            Ok(())
        }),
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(price_count, 2);
    assert_eq!(txn_count, 1);
}
