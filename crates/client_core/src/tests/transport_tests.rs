use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use reqwest::Method;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use crate::{
    mock_services::spawn_router,
    transport::{decode_body, endpoint},
    ClientError, HttpTransport, Transport,
};

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Json(json!({ "content_type": content_type, "body": body }))
}

async fn header_probe(headers: HeaderMap) -> Json<Value> {
    Json(json!({ "has_content_type": headers.contains_key(CONTENT_TYPE) }))
}

async fn spawn_probe_service() -> Url {
    let app = Router::new()
        .route("/json", get(|| async { Json(json!({ "balance": 12.5 })) }))
        .route("/empty", get(|| async { StatusCode::OK }))
        .route("/plain", get(|| async { "OK" }))
        .route(
            "/rejected",
            post(|| async { (StatusCode::PAYMENT_REQUIRED, "insufficient funds") }),
        )
        .route("/echo", post(echo))
        .route("/headers", get(header_probe));
    spawn_router(app).await.expect("spawn probe service")
}

fn at(base: &Url, path: &str) -> Url {
    base.join(path).expect("url")
}

#[tokio::test]
async fn returns_parsed_json_on_success() {
    let base = spawn_probe_service().await;
    let value = HttpTransport::new()
        .execute(Method::GET, at(&base, "/json"), None)
        .await
        .expect("json response");
    assert_eq!(value, json!({ "balance": 12.5 }));
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let base = spawn_probe_service().await;
    let value = HttpTransport::new()
        .execute(Method::GET, at(&base, "/empty"), None)
        .await
        .expect("empty response");
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    let base = spawn_probe_service().await;
    let err = HttpTransport::new()
        .execute(Method::GET, at(&base, "/plain"), None)
        .await
        .expect_err("plain text is not json");
    assert!(matches!(err, ClientError::Decode(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn non_success_status_carries_raw_body() {
    let base = spawn_probe_service().await;
    let err = HttpTransport::new()
        .execute(
            Method::POST,
            at(&base, "/rejected"),
            Some(json!({ "amount": 10.0 })),
        )
        .await
        .expect_err("402 must fail");
    assert_eq!(err.to_string(), "insufficient funds");
    assert_eq!(err.status(), Some(402));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn json_body_is_sent_with_content_type() {
    let base = spawn_probe_service().await;
    let value = HttpTransport::new()
        .execute(
            Method::POST,
            at(&base, "/echo"),
            Some(json!({ "user_id": "u1" })),
        )
        .await
        .expect("echo");
    assert_eq!(value["body"], json!({ "user_id": "u1" }));
    assert_eq!(value["content_type"], json!("application/json"));
}

#[tokio::test]
async fn bodyless_request_has_no_content_type() {
    let base = spawn_probe_service().await;
    let value = HttpTransport::new()
        .execute(Method::GET, at(&base, "/headers"), None)
        .await
        .expect("probe");
    assert_eq!(value["has_content_type"], json!(false));
}

#[tokio::test]
async fn unreachable_service_is_a_request_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/orders")).expect("url");
    let err = HttpTransport::new()
        .execute(Method::GET, url, None)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ClientError::Request(_)), "unexpected error: {err:?}");
    assert_eq!(err.status(), None);
}

#[test]
fn blank_bodies_decode_to_null() {
    assert_eq!(decode_body("").expect("empty"), Value::Null);
    assert_eq!(decode_body(" \n").expect("whitespace"), Value::Null);
    assert!(matches!(decode_body("nope"), Err(ClientError::Decode(_))));
}

#[test]
fn endpoint_encodes_path_segments() {
    let base = Url::parse("http://localhost:8081").expect("url");
    let url = endpoint(&base, &["accounts", "user 1/x", "balance"]).expect("endpoint");
    assert_eq!(url.as_str(), "http://localhost:8081/accounts/user%201%2Fx/balance");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let with_slash = Url::parse("http://shop.test/api/").expect("url");
    let without_slash = Url::parse("http://shop.test/api").expect("url");
    assert_eq!(
        endpoint(&with_slash, &["orders"]).expect("endpoint").as_str(),
        "http://shop.test/api/orders"
    );
    assert_eq!(
        endpoint(&without_slash, &["orders"]).expect("endpoint").as_str(),
        "http://shop.test/api/orders"
    );
}

#[test]
fn endpoint_rejects_cannot_be_a_base_urls() {
    let base = Url::parse("mailto:shop@example.com").expect("url");
    assert!(matches!(
        endpoint(&base, &["orders"]),
        Err(ClientError::Request(_))
    ));
}
