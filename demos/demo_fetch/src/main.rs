use crate::tracing_setup::tracing_init;
use easefetch::{
    predicate, typed, DataFetch, DataPost, FetchResult, FetchStreamExt, HttpTransport,
    HttpTransportConfig, ImmediateFetch, Logger, TracingLogger, Transport, Validator,
};
use futures::StreamExt;
use futures_signals::signal::SignalExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod tracing_setup;

#[derive(Debug, Clone, Deserialize)]
struct Slideshow {
    slideshow: SlideshowInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct SlideshowInfo {
    title: String,
    author: String,
}

#[derive(Debug, Clone, Serialize)]
struct Greeting {
    name: String,
}

fn describe<T: std::fmt::Debug>(result: &FetchResult<T>) -> String {
    result.fold(
        "not started".to_string(),
        "pending".to_string(),
        "refreshing".to_string(),
        |value| format!("fulfilled: {value:?}"),
        |reason| format!("rejected: {}", reason.unwrap_or("unknown")),
        "unknown state".to_string(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_init()?;

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org".to_string());
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_config(
        HttpTransportConfig::default().with_timeout(Duration::from_secs(10)),
    )?);
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

    info!("==========================================");
    warn!("A. immediate fetch, then retry");

    let immediate: ImmediateFetch<Slideshow> = ImmediateFetch::new(
        format!("{base}/json"),
        transport.clone(),
        typed::<Slideshow>().check(|show| !show.slideshow.title.is_empty()),
        logger.clone(),
    );
    let settled = immediate.settled().await;
    if let Some(show) = settled.value_ref() {
        info!(
            "  Main thread | '{}' by {}",
            show.slideshow.title, show.slideshow.author
        );
    }

    let (_, retry) = immediate.pair();
    let cycle = retry();
    info!("  Main thread | after retry: {}", describe(&immediate.result()));
    cycle.await?;
    info!("  Main thread | retried: {}", describe(&immediate.result()));

    info!("==========================================");
    warn!("B. on-demand fetch of a failing endpoint");

    let data_fetch: DataFetch<Value> =
        DataFetch::new(transport.clone(), predicate(Value::is_object), logger.clone());
    data_fetch.fetch(format!("{base}/status/503"));
    let mut states = data_fetch.store().to_stream().until_settled();
    while let Some(result) = states.next().await {
        info!("  Main thread | show state: {}", describe(&result));
    }

    info!("==========================================");
    warn!("C. post with a body guard");

    let data_post: DataPost<Greeting, Value> = DataPost::new(
        format!("{base}/post"),
        transport,
        |greeting: &Greeting| !greeting.name.is_empty(),
        predicate(Value::is_object),
        logger,
    );

    data_post.post(Greeting {
        name: String::new(),
    });
    info!("  Main thread | empty name: {}", describe(&data_post.result()));

    data_post.post(Greeting {
        name: "easefetch".to_string(),
    });
    data_post
        .signal()
        .stop_if(|result| result.is_complete())
        .for_each(|result| async move {
            info!("  Main thread | show state: {}", describe(&result));
        })
        .await;

    info!("==========================================");
    info!("  Main thread | Finish");
    Ok(())
}
