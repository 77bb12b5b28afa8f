use crate::{execute_fetch, FetchResult, Logger, StateStore, Transport, Validator};
use futures_signals::signal::MutableSignalCloned;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// GET that starts as soon as the controller is built.
///
/// The result starts out `Pending`. Changing the url or the validator fires a
/// new cycle; [`ImmediateFetch::retry`] does the same for the current url,
/// moving the result to `Refreshing` first.
pub struct ImmediateFetch<T: Clone + Send + Sync + 'static> {
    url: String,
    store: StateStore<FetchResult<T>>,
    transport: Arc<dyn Transport>,
    validator: Arc<dyn Validator<T>>,
    logger: Arc<dyn Logger>,
}

impl<T: Clone + Send + Sync + 'static> ImmediateFetch<T> {
    /// Builds the controller and fires the first cycle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<V>(
        url: impl Into<String>,
        transport: Arc<dyn Transport>,
        validator: V,
        logger: Arc<dyn Logger>,
    ) -> Self
    where
        V: Validator<T> + 'static,
    {
        let controller = ImmediateFetch {
            url: url.into(),
            store: StateStore::new(FetchResult::pending()),
            transport,
            validator: Arc::new(validator),
            logger,
        };
        controller.fire();
        controller
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

    /// Points the controller at another url and fetches it.
    ///
    /// Returns `None` when `url` is the current one.
    pub fn set_url(&mut self, url: impl Into<String>) -> Option<JoinHandle<()>> {
        let url = url.into();
        if url == self.url {
            return None;
        }
        self.url = url;
        Some(self.fire())
    }

    /// Swaps the validator and fetches again with it.
    pub fn set_validator<V>(&mut self, validator: V) -> JoinHandle<()>
    where
        V: Validator<T> + 'static,
    {
        self.validator = Arc::new(validator);
        self.fire()
    }

    /// Refetches the current url, keeping the current value while refreshing.
    pub fn retry(&self) -> JoinHandle<()> {
        self.store.set_state(|previous| previous.clone().into_refreshing());
        self.fire()
    }

    /// The current result together with the retry trigger.
    pub fn pair(&self) -> (FetchResult<T>, impl Fn() -> JoinHandle<()> + '_) {
        (self.result(), move || self.retry())
    }

    /// Waits until the current cycle reaches a terminal state.
    pub async fn settled(&self) -> FetchResult<T> {
        self.store.await_state(FetchResult::is_complete).await
    }

    fn fire(&self) -> JoinHandle<()> {
        let url = self.url.clone();
        let store = self.store.clone();
        let transport = self.transport.clone();
        let validator = self.validator.clone();
        let logger = self.logger.clone();
        tokio::spawn(async move {
            execute_fetch(
                transport.as_ref(),
                &url,
                |result| store.set(result),
                validator.as_ref(),
                logger.as_ref(),
            )
            .await;
        })
    }
}
