use crate::State;
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};

/// Owned cell holding one piece of state, with change notification through
/// `futures-signals`.
///
/// Writes are applied immediately; every subscriber of [`to_signal`] or
/// [`to_stream`] observes the latest value. Clones share the same cell.
///
/// [`to_signal`]: StateStore::to_signal
/// [`to_stream`]: StateStore::to_stream
#[derive(Debug)]
pub struct StateStore<S: State> {
    state: Mutable<S>,
}

impl<S: State> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        StateStore {
            state: self.state.clone(),
        }
    }
}

impl<S: State> StateStore<S> {
    pub fn new(initial_state: S) -> Self {
        StateStore {
            state: Mutable::new(initial_state),
        }
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<S>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<S> {
        self.state.signal_cloned()
    }

    /// Replaces the state.
    pub fn set(&self, new_state: S) {
        self.state.set(new_state);
    }

    /// Derives the next state from the current one.
    pub fn set_state<F>(&self, reducer: F)
    where
        F: FnOnce(&S) -> S,
    {
        let mut state = self.state.lock_mut();
        let new_state = reducer(&state);
        *state = new_state;
    }

    pub fn with_state<F, R>(&self, action: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        action(&self.state.lock_ref())
    }

    pub fn get_state(&self) -> S {
        self.state.get_cloned()
    }

    /// Resolves with the first state, current one included, matching `predicate`.
    pub async fn await_state<P>(&self, mut predicate: P) -> S
    where
        P: FnMut(&S) -> bool,
    {
        let mut matched = None;
        self.to_signal()
            .stop_if(|state| predicate(state))
            .for_each(|state| {
                matched = Some(state);
                async {}
            })
            .await;
        matched.unwrap_or_else(|| self.get_state())
    }
}
