use crate::{FetchResult, FetchState, FetchStreamExt, StateStore};
use futures::stream::{self, StreamExt};
use std::time::Duration;

#[tokio::test]
async fn test_stop_if_includes_matching_item() {
    let items: Vec<i32> = stream::iter(0..10).stop_if(|n| *n == 3).collect().await;
    assert_eq!(items, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_stop_if_passes_through_short_streams() {
    let items: Vec<i32> = stream::iter(0..3).stop_if(|n| *n > 10).collect().await;
    assert_eq!(items, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_until_settled_on_plain_stream() {
    let results = vec![
        FetchResult::pending(),
        FetchResult::refreshing(Some(1)),
        FetchResult::rejected("boom"),
        FetchResult::fulfilled(2),
    ];
    let seen: Vec<FetchState> = stream::iter(results)
        .until_settled()
        .map(|result| result.state)
        .collect()
        .await;
    assert_eq!(
        seen,
        vec![
            FetchState::Pending,
            FetchState::Refreshing,
            FetchState::Rejected
        ]
    );
}

#[tokio::test]
async fn test_until_settled_on_store() {
    let store = StateStore::new(FetchResult::<String>::pending());

    let writer = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.set(FetchResult::fulfilled("done".to_string()));
    });

    let seen: Vec<FetchResult<String>> = store.to_stream().until_settled().collect().await;
    assert_eq!(
        seen,
        vec![
            FetchResult::pending(),
            FetchResult::fulfilled("done".to_string())
        ]
    );
}
