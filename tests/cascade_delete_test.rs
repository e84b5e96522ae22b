//! Integration tests for deleting a parent together with its children

mod common;

use common::{product_body, raffle_body, FailingStore};
use serde_json::Value;
use std::sync::Arc;
use tombola::adapters::database::{KeyValueStore, ScanFilter};
use tombola::adapters::memory::MemoryStore;
use tombola::api::handler::{HEADER_CASCADE_STATUS, HEADER_CHILDREN_REMOVED, HEADER_PAGES_FAILED};
use tombola::api::{Method, Request, RequestHandler};
use tombola::config::TombolaConfig;
use tombola::core::CascadeDeleter;
use tombola::domain::{ParentId, ParentKind, TombolaError, PARENT_REF_FIELD};

async fn create(handler: &RequestHandler, body: String) -> String {
    let response = handler.handle(Request::new(Method::Post).with_body(body)).await;
    assert_eq!(response.status_code, 200);
    let children: Vec<Value> = serde_json::from_str(&response.body).unwrap();
    children[0][PARENT_REF_FIELD].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_delete_removes_only_own_children() {
    let memory = Arc::new(MemoryStore::new());
    let handler = RequestHandler::new(memory.clone(), &TombolaConfig::default(), ParentKind::Raffle);

    let doomed = create(&handler, raffle_body(4, 60)).await;
    let kept = create(&handler, raffle_body(4, 40)).await;
    assert_eq!(memory.len("raffle_tickets").await, 100);

    let response = handler
        .handle(Request::new(Method::Delete).with_path_id(doomed.as_str()))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, format!("\"Raffle deleted {doomed}\""));
    assert_eq!(response.header(HEADER_CASCADE_STATUS), Some("complete"));
    assert_eq!(response.header(HEADER_CHILDREN_REMOVED), Some("60"));
    assert_eq!(response.header(HEADER_PAGES_FAILED), Some("0"));

    let remaining = memory.scan("raffle_tickets", None).await.unwrap();
    assert_eq!(remaining.len(), 40);
    assert!(remaining.iter().all(|c| c[PARENT_REF_FIELD] == kept.as_str()));

    let get = handler
        .handle(Request::new(Method::Get).with_path_id(doomed.as_str()))
        .await;
    assert_eq!(get.body, "null");
    assert_eq!(memory.len("raffles").await, 1);
}

#[tokio::test]
async fn test_delete_via_query_id() {
    let memory = Arc::new(MemoryStore::new());
    let handler = RequestHandler::new(memory.clone(), &TombolaConfig::default(), ParentKind::Product);

    let id = create(&handler, product_body(3, 12)).await;
    let response = handler
        .handle(Request::new(Method::Delete).with_query("_id", id.as_str()))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, format!("\"Product deleted {id}\""));
    assert!(memory.is_empty("products").await);
    assert!(memory.is_empty("product_variations").await);
}

#[tokio::test]
async fn test_second_delete_is_not_found() {
    let memory = Arc::new(MemoryStore::new());
    let handler = RequestHandler::new(memory, &TombolaConfig::default(), ParentKind::Raffle);

    let id = create(&handler, raffle_body(3, 5)).await;
    let first = handler
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(first.status_code, 200);

    let second = handler
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(second.status_code, 404);
}

#[tokio::test]
async fn test_failed_delete_page_reports_partial_cascade() {
    let memory = Arc::new(MemoryStore::new());
    let config = TombolaConfig::default();
    let creator = RequestHandler::new(memory.clone(), &config, ParentKind::Raffle);
    let id = create(&creator, raffle_body(5, 70)).await;

    // 70 children at 25 per page: pages of 25, 25, 20; the second fails
    let store = Arc::new(FailingStore::new(memory.clone()).failing_deletes(&[2]));
    let handler = RequestHandler::new(store, &config, ParentKind::Raffle);

    let response = handler
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.header(HEADER_CASCADE_STATUS), Some("partial"));
    assert_eq!(response.header(HEADER_CHILDREN_REMOVED), Some("45"));
    assert_eq!(response.header(HEADER_PAGES_FAILED), Some("1"));

    // The parent is gone; the failed page's children remain
    assert!(memory.is_empty("raffles").await);
    let filter = ScanFilter::equals(PARENT_REF_FIELD, id.as_str());
    let orphans = memory.scan("raffle_tickets", Some(&filter)).await.unwrap();
    assert_eq!(orphans.len(), 25);
}

#[tokio::test]
async fn test_cascade_deleter_nothing_to_delete() {
    let memory = Arc::new(MemoryStore::new());
    let deleter = CascadeDeleter::new(memory, &TombolaConfig::default(), ParentKind::Product);

    let err = deleter
        .delete_parent_and_children(&ParentId::new("nope").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, TombolaError::NotFound(_)));
}

#[tokio::test]
async fn test_retry_after_partial_cascade_removes_leftovers() {
    let memory = Arc::new(MemoryStore::new());
    let config = TombolaConfig::default();
    let healthy = RequestHandler::new(memory.clone(), &config, ParentKind::Raffle);
    let id = create(&healthy, raffle_body(5, 70)).await;

    let store = Arc::new(FailingStore::new(memory.clone()).failing_deletes(&[2]));
    let flaky = RequestHandler::new(store, &config, ParentKind::Raffle);
    let first = flaky
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(first.header(HEADER_CASCADE_STATUS), Some("partial"));

    // The parent is already gone; the retry still sweeps its children
    let retry = healthy
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(retry.status_code, 200);
    assert_eq!(retry.header(HEADER_CASCADE_STATUS), Some("complete"));
    assert_eq!(retry.header(HEADER_CHILDREN_REMOVED), Some("25"));

    let filter = ScanFilter::equals(PARENT_REF_FIELD, id.as_str());
    let orphans = memory.scan("raffle_tickets", Some(&filter)).await.unwrap();
    assert!(orphans.is_empty());

    // Nothing left at all: now it is not found
    let third = healthy
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(third.status_code, 404);
}

#[tokio::test]
async fn test_scan_failure_still_deletes_parent() {
    let memory = Arc::new(MemoryStore::new());
    let config = TombolaConfig::default();
    let creator = RequestHandler::new(memory.clone(), &config, ParentKind::Product);
    let id = create(&creator, product_body(3, 10)).await;

    let store = Arc::new(FailingStore::new(memory.clone()).failing_scans());
    let handler = RequestHandler::new(store, &config, ParentKind::Product);

    let response = handler
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.header(HEADER_CASCADE_STATUS), Some("partial"));
    assert_eq!(response.header(HEADER_CHILDREN_REMOVED), Some("0"));

    assert!(memory.is_empty("products").await);
    assert_eq!(memory.len("product_variations").await, 10);
}

#[tokio::test]
async fn test_failed_parent_delete_is_bad_request() {
    let memory = Arc::new(MemoryStore::new());
    let config = TombolaConfig::default();
    let creator = RequestHandler::new(memory.clone(), &config, ParentKind::Raffle);
    let id = create(&creator, raffle_body(3, 10)).await;

    let store = Arc::new(FailingStore::new(memory.clone()).failing_item_deletes());
    let handler = RequestHandler::new(store, &config, ParentKind::Raffle);

    let response = handler
        .handle(Request::new(Method::Delete).with_path_id(id.as_str()))
        .await;
    assert_eq!(response.status_code, 400);
    assert!(serde_json::from_str::<Value>(&response.body).unwrap()["message"].is_string());

    // Children went first; the parent survives for a retry
    assert!(memory.is_empty("raffle_tickets").await);
    assert_eq!(memory.len("raffles").await, 1);
}

#[tokio::test]
async fn test_cascade_deleter_sweeps_children_of_missing_parent() {
    let memory = Arc::new(MemoryStore::new());
    let config = TombolaConfig::default();
    let handler = RequestHandler::new(memory.clone(), &config, ParentKind::Raffle);
    let id = create(&handler, raffle_body(3, 12)).await;
    memory.delete_item("raffles", &id).await.unwrap();

    let deleter = CascadeDeleter::new(memory.clone(), &config, ParentKind::Raffle);
    let report = deleter
        .delete_parent_and_children(&ParentId::new(id.as_str()).unwrap())
        .await
        .unwrap();
    assert!(!report.parent_found);
    assert_eq!(report.children_removed, 12);
    assert!(memory.is_empty("raffle_tickets").await);
}
