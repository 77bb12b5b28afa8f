use crate::executor::settle;
use crate::{
    execute_post_fetch, BodyGuard, FetchError, FetchResult, FetchState, Logger, StateStore,
    Transport, Validator,
};
use futures_signals::signal::MutableSignalCloned;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// On-demand POST of a JSON body to a fixed url.
///
/// Each body passes through the body guard before anything else happens; a
/// refused body rejects the result without touching the network.
pub struct DataPost<B, T>
where
    B: Serialize + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    url: String,
    store: StateStore<FetchResult<T>>,
    transport: Arc<dyn Transport>,
    body_guard: Arc<dyn BodyGuard<B>>,
    result_validator: Arc<dyn Validator<T>>,
    logger: Arc<dyn Logger>,
}

impl<B, T> DataPost<B, T>
where
    B: Serialize + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<G, V>(
        url: impl Into<String>,
        transport: Arc<dyn Transport>,
        body_guard: G,
        result_validator: V,
        logger: Arc<dyn Logger>,
    ) -> Self
    where
        G: BodyGuard<B> + 'static,
        V: Validator<T> + 'static,
    {
        DataPost {
            url: url.into(),
            store: StateStore::new(FetchResult::not_started()),
            transport,
            body_guard: Arc::new(body_guard),
            result_validator: Arc::new(result_validator),
            logger,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn result(&self) -> FetchResult<T> {
        self.store.get_state()
    }

    pub fn store(&self) -> &StateStore<FetchResult<T>> {
        &self.store
    }

    pub fn signal(&self) -> MutableSignalCloned<FetchResult<T>> {
        self.store.to_signal()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_body_guard<G>(&mut self, body_guard: G)
    where
        G: BodyGuard<B> + 'static,
    {
        self.body_guard = Arc::new(body_guard);
    }

    pub fn set_validator<V>(&mut self, result_validator: V)
    where
        V: Validator<T> + 'static,
    {
        self.result_validator = Arc::new(result_validator);
    }

    /// Posts `body`, or rejects straight away when the body guard refuses it.
    ///
    /// Returns the handle of the spawned cycle, `None` when nothing was sent.
    pub fn post(&self, body: B) -> Option<JoinHandle<()>> {
        if !self.body_guard.accepts(&body) {
            let error = FetchError::Encoding {
                url: self.url.clone(),
                body: describe_body(&body),
            };
            self.store.set(settle(Err(error), self.logger.as_ref()));
            return None;
        }

        self.store.set(FetchResult::pending());

        let url = self.url.clone();
        let store = self.store.clone();
        let transport = self.transport.clone();
        let result_validator = self.result_validator.clone();
        let logger = self.logger.clone();
        Some(tokio::spawn(async move {
            execute_post_fetch(
                transport.as_ref(),
                &url,
                &body,
                |result| store.set(result),
                result_validator.as_ref(),
                logger.as_ref(),
            )
            .await;
        }))
    }

    /// The current result together with a trigger bound to this controller.
    pub fn pair(&self) -> (FetchResult<T>, impl Fn(B) -> Option<JoinHandle<()>> + '_) {
        (self.result(), move |body: B| self.post(body))
    }

    /// Waits until the current cycle reaches a terminal state.
    ///
    /// Resolves immediately with the `NotStarted` result when nothing has
    /// been triggered yet.
    pub async fn settled(&self) -> FetchResult<T> {
        self.store
            .await_state(|result| result.is_complete() || result.state == FetchState::NotStarted)
            .await
    }
}

// Unserializable bodies still need a description in the rejection reason.
fn describe_body<B: Serialize>(body: &B) -> String {
    serde_json::to_string(body).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
