mod common;

use common::{failing_guard, successful_guard, Harness};
use easefetch::mock::MockReply;
use easefetch::{predicate, FetchResult, FetchState, ImmediateFetch};
use serde_json::{json, Value};

fn controller(harness: &Harness, guard: fn(&Value) -> bool) -> ImmediateFetch<Value> {
    ImmediateFetch::new(
        "test-url",
        harness.transport(),
        predicate(guard),
        harness.logger(),
    )
}

#[tokio::test]
async fn test_pending_before_first_cycle_completes() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "Resolved Data" })));
    let immediate = controller(&harness, successful_guard);

    assert_eq!(immediate.result(), FetchResult::pending());
}

#[tokio::test]
async fn test_fulfilled_after_mount() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "Resolved Data" })));
    let immediate = controller(&harness, successful_guard);

    let result = immediate.settled().await;

    assert_eq!(
        result,
        FetchResult::fulfilled(json!({ "data": "Resolved Data" }))
    );
    assert_eq!(harness.transport.request_count(), 1);
    assert!(harness.logger.entries().is_empty());
}

#[tokio::test]
async fn test_rejected_when_transport_fails() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::reject("Rejected Promise"));
    let immediate = controller(&harness, successful_guard);

    let result = immediate.settled().await;

    let expected = "Fetch failed for request test-url with reason: Rejected Promise";
    assert_eq!(result, FetchResult::rejected(expected));
    assert_eq!(harness.logger.errors(), vec![expected.to_string()]);
}

#[tokio::test]
async fn test_rejected_when_body_is_not_json() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::text("Resolved Promise"));
    let immediate = controller(&harness, successful_guard);

    let result = immediate.settled().await;

    assert_eq!(result.state, FetchState::Rejected);
    assert_eq!(harness.logger.errors().len(), 1);
}

#[tokio::test]
async fn test_rejected_when_guard_fails() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "Resolved Data" })));
    let immediate = controller(&harness, failing_guard);

    let result = immediate.settled().await;

    let expected = "Could not decode result for request test-url";
    assert_eq!(result, FetchResult::rejected(expected));
    assert_eq!(harness.logger.errors(), vec![expected.to_string()]);
}

#[tokio::test]
async fn test_retry_while_pending_is_refreshing_without_value() {
    let harness = Harness::new();
    let immediate = controller(&harness, successful_guard);

    immediate.retry();

    assert_eq!(immediate.result(), FetchResult::refreshing(None));
}

#[tokio::test]
async fn test_retry_keeps_value_while_refreshing() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "first" })));
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "second" })));
    let immediate = controller(&harness, successful_guard);
    immediate.settled().await;

    let (current, retry) = immediate.pair();
    assert_eq!(current.state, FetchState::Fulfilled);

    let cycle = retry();
    assert_eq!(
        immediate.result(),
        FetchResult::refreshing(Some(json!({ "data": "first" })))
    );

    cycle.await.unwrap();
    assert_eq!(
        immediate.result(),
        FetchResult::fulfilled(json!({ "data": "second" }))
    );
    assert_eq!(harness.transport.request_count(), 2);
}

#[tokio::test]
async fn test_changing_url_fires_again() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "first" })));
    harness
        .transport
        .expect("other-url", MockReply::json(json!({ "data": "other" })));
    let mut immediate = controller(&harness, successful_guard);
    immediate.settled().await;

    assert!(immediate.set_url("test-url").is_none());

    let cycle = immediate.set_url("other-url").unwrap();
    // No intermediate write: the previous result stays until the new one lands.
    assert_eq!(
        immediate.result(),
        FetchResult::fulfilled(json!({ "data": "first" }))
    );

    cycle.await.unwrap();
    assert_eq!(immediate.url(), "other-url");
    assert_eq!(
        immediate.result(),
        FetchResult::fulfilled(json!({ "data": "other" }))
    );
    let urls: Vec<String> = harness
        .transport
        .requests()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert_eq!(urls, vec!["test-url", "other-url"]);
}

#[tokio::test]
async fn test_changing_validator_fires_again() {
    let harness = Harness::new();
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "x" })));
    harness
        .transport
        .expect("test-url", MockReply::json(json!({ "data": "x" })));
    let mut immediate = controller(&harness, failing_guard);
    assert_eq!(immediate.settled().await.state, FetchState::Rejected);

    immediate
        .set_validator(predicate(successful_guard))
        .await
        .unwrap();

    assert_eq!(immediate.result().state, FetchState::Fulfilled);
    assert_eq!(harness.transport.request_count(), 2);
}
