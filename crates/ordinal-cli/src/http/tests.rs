//! Tests for the HTTP transport.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use ordinal_core::AppBuilder;
use ordinal_core::domain::{Actor, CollectionKey, ContentItem, ItemId};
use ordinal_core::impls::{CapabilityTable, InMemoryCatalog, InMemoryRankRepository};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::OrderServer;

const EDITOR: &str = "editor-token";
const GUEST: &str = "guest-token";

struct Harness {
    router: axum::Router,
    ranks: Arc<InMemoryRankRepository>,
    catalog: Arc<InMemoryCatalog>,
}

/// `event` holds 1, 2, 3. The editor may reorder it; the guest may not.
async fn harness() -> Harness {
    let event = CollectionKey::new("event").unwrap();
    let catalog = Arc::new(InMemoryCatalog::new());
    for (id, title) in [(1, "Opening night"), (2, "Gala"), (3, "Picnic")] {
        catalog.insert(&event, ContentItem::new(id, title)).await;
    }
    let ranks = Arc::new(InMemoryRankRepository::new());

    let app = AppBuilder::new()
        .with_authorizer(Arc::new(
            CapabilityTable::new().grant(Actor::new("editor"), event),
        ))
        .with_content_index(catalog.clone())
        .with_rank_repository(ranks.clone())
        .build()
        .unwrap();

    let sessions = HashMap::from([
        (EDITOR.to_string(), Actor::new("editor")),
        (GUEST.to_string(), Actor::new("guest")),
    ]);

    Harness {
        router: OrderServer::new(Arc::new(app), sessions).into_router(),
        ranks,
        catalog,
    }
}

async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let response = router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn order_of(snapshot: &Value) -> Vec<Value> {
    snapshot["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["item"].clone())
        .collect()
}

#[tokio::test]
async fn reorder_returns_summary_and_persists() {
    let h = harness().await;

    let (status, body) = send(&h.router, "POST", "/order/event", Some(EDITOR), "[3, 1, 2]").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], 3);
    assert_eq!(body["skipped"], json!([]));
    assert!(body["revision"].is_string());

    let (status, snapshot) = send(&h.router, "GET", "/order/event", Some(EDITOR), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order_of(&snapshot), vec![json!(3), json!(1), json!(2)]);
    assert_eq!(snapshot["entries"][0]["rank"], 0);
}

#[tokio::test]
async fn stale_ids_are_reported_as_skipped() {
    let h = harness().await;

    let (status, body) = send(&h.router, "POST", "/order/event", Some(EDITOR), "[1, 2, \"gone\"]").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], 2);
    assert_eq!(body["skipped"], json!(["gone"]));
}

#[rstest]
#[case::no_session(None, "[3, 2, 1]", "unauthenticated")]
#[case::unknown_token(Some("nope"), "[3, 2, 1]", "unauthenticated")]
#[case::lacks_capability(Some(GUEST), "[3, 2, 1]", "forbidden")]
#[case::lacks_capability_with_bad_body(Some(GUEST), "not json", "forbidden")]
#[case::lacks_capability_with_empty_body(Some(GUEST), "[]", "forbidden")]
#[tokio::test]
async fn unauthorized_requests_get_403(
    #[case] token: Option<&str>,
    #[case] body: &str,
    #[case] code: &str,
) {
    let h = harness().await;
    send(&h.router, "POST", "/order/event", Some(EDITOR), "[1, 2, 3]").await;

    let (status, error) = send(&h.router, "POST", "/order/event", token, body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], code);

    let (_, snapshot) = send(&h.router, "GET", "/order/event", Some(EDITOR), "").await;
    assert_eq!(order_of(&snapshot), vec![json!(1), json!(2), json!(3)]);
}

#[rstest]
#[case::empty("[]", "invalid_input")]
#[case::duplicate("[1, 1]", "invalid_input")]
#[case::not_json("1, 2", "malformed_body")]
#[case::not_an_array("{\"ids\": [1]}", "malformed_body")]
#[tokio::test]
async fn bad_bodies_get_400(#[case] body: &str, #[case] code: &str) {
    let h = harness().await;

    let (status, error) = send(&h.router, "POST", "/order/event", Some(EDITOR), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], code);
}

#[tokio::test]
async fn store_failure_gets_500_and_keeps_order() {
    let h = harness().await;
    send(&h.router, "POST", "/order/event", Some(EDITOR), "[1, 2, 3]").await;
    h.ranks.fail_writes_after(1).await;

    let (status, error) = send(&h.router, "POST", "/order/event", Some(EDITOR), "[3, 2, 1]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"], "store_failure");

    let (_, snapshot) = send(&h.router, "GET", "/order/event", Some(EDITOR), "").await;
    assert_eq!(order_of(&snapshot), vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn listing_puts_unranked_items_last() {
    let h = harness().await;
    send(&h.router, "POST", "/order/event", Some(EDITOR), "[3, 2]").await;

    let (status, body) = send(&h.router, "GET", "/items/event", Some(GUEST), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"], "event");
    let items = body["items"].as_array().unwrap();
    let ids: Vec<_> = items.iter().map(|item| item["id"].clone()).collect();
    assert_eq!(ids, vec![json!(3), json!(2), json!(1)]);
    assert_eq!(items[0]["title"], "Picnic");
    assert_eq!(items[2]["rank"], Value::Null);
}

#[tokio::test]
async fn listing_accepts_filters() {
    let h = harness().await;

    let (status, body) = send(&h.router, "GET", "/items/event?search=gala", Some(EDITOR), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn reconcile_and_reset_round_out_the_surface() {
    let h = harness().await;
    send(&h.router, "POST", "/order/event", Some(EDITOR), "[3, 1, 2]").await;
    h.catalog
        .remove(&CollectionKey::new("event").unwrap(), &ItemId::Int(1))
        .await;

    let (status, body) = send(&h.router, "POST", "/order/event/reconcile", Some(EDITOR), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kept"], 2);
    assert_eq!(body["removed"], json!([1]));

    let (status, body) = send(&h.router, "DELETE", "/order/event", Some(EDITOR), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], true);

    let (_, snapshot) = send(&h.router, "GET", "/order/event", Some(EDITOR), "").await;
    assert_eq!(snapshot["entries"], json!([]));
    assert_eq!(snapshot["revision"], Value::Null);
}

#[tokio::test]
async fn health_needs_no_session() {
    let h = harness().await;
    let response = h
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
