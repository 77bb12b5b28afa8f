use crate::{execute_fetch, FetchResult, FetchState, Logger, StateStore, Transport, Validator};
use futures_signals::signal::MutableSignalCloned;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// On-demand GET: nothing happens until [`DataFetch::fetch`] is called.
///
/// The first trigger moves the result to `Pending`; later triggers move it to
/// `Refreshing`, keeping the previous value visible until the new cycle ends.
pub struct DataFetch<T: Clone + Send + Sync + 'static> {
    store: StateStore<FetchResult<T>>,
    transport: Arc<dyn Transport>,
    validator: Arc<dyn Validator<T>>,
    logger: Arc<dyn Logger>,
}

impl<T: Clone + Send + Sync + 'static> DataFetch<T> {
    pub fn new<V>(transport: Arc<dyn Transport>, validator: V, logger: Arc<dyn Logger>) -> Self
    where
        V: Validator<T> + 'static,
    {
        DataFetch {
            store: StateStore::new(FetchResult::not_started()),
            transport,
            validator: Arc::new(validator),
            logger,
        }
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

    /// Swaps the validator used by every later trigger.
    pub fn set_validator<V>(&mut self, validator: V)
    where
        V: Validator<T> + 'static,
    {
        self.validator = Arc::new(validator);
    }

    /// Starts a GET cycle against `url`.
    ///
    /// Must be called from within a tokio runtime. Overlapping cycles are not
    /// serialized; whichever finishes last writes the final result.
    pub fn fetch(&self, url: impl Into<String>) -> JoinHandle<()> {
        let url = url.into();
        self.store.set_state(|previous| match previous.state {
            FetchState::NotStarted => FetchResult::pending(),
            _ => previous.clone().into_refreshing(),
        });

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

    /// The current result together with a trigger bound to this controller.
    pub fn pair(&self) -> (FetchResult<T>, impl Fn(&str) -> JoinHandle<()> + '_) {
        (self.result(), move |url: &str| self.fetch(url))
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
