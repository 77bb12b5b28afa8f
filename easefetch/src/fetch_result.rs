use crate::{FetchError, State};
use std::fmt::{Display, Formatter};

/// Lifecycle state of a [`FetchResult`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum FetchState {
    #[default]
    NotStarted,
    Pending,
    Refreshing,
    Fulfilled,
    Rejected,
}

impl FetchState {
    /// Returns true for `Fulfilled` and `Rejected`, the states a cycle ends in.
    pub fn is_terminal(self) -> bool {
        matches!(self, FetchState::Fulfilled | FetchState::Rejected)
    }

    /// Returns true while a request is outstanding (`Pending` or `Refreshing`).
    pub fn is_in_flight(self) -> bool {
        matches!(self, FetchState::Pending | FetchState::Refreshing)
    }
}

impl Display for FetchState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FetchState::NotStarted => "NotStarted",
            FetchState::Pending => "Pending",
            FetchState::Refreshing => "Refreshing",
            FetchState::Fulfilled => "Fulfilled",
            FetchState::Rejected => "Rejected",
        };
        f.write_str(name)
    }
}

/// The observable outcome of a fetch cycle.
///
/// `value` is set only for `Fulfilled` results, with one exception:
/// a `Refreshing` result may still carry the value of the previous cycle.
/// `reason` is set only for `Rejected` results.
///
/// The fields are public so that the "Fulfilled without a value" case stays
/// representable; the constructors below never produce it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchResult<T> {
    pub value: Option<T>,
    pub state: FetchState,
    pub reason: Option<String>,
}

impl<T: Clone + Send + Sync + 'static> State for FetchResult<T> {}

impl<T> FetchResult<T> {
    /// No cycle has been triggered yet.
    pub fn not_started() -> Self {
        FetchResult {
            value: None,
            state: FetchState::NotStarted,
            reason: None,
        }
    }

    /// First cycle in flight, no value yet.
    pub fn pending() -> Self {
        FetchResult {
            value: None,
            state: FetchState::Pending,
            reason: None,
        }
    }

    /// A later cycle in flight, optionally still showing the previous value.
    pub fn refreshing(stale: Option<T>) -> Self {
        FetchResult {
            value: stale,
            state: FetchState::Refreshing,
            reason: None,
        }
    }

    /// Cycle succeeded with `value`.
    pub fn fulfilled(value: T) -> Self {
        FetchResult {
            value: Some(value),
            state: FetchState::Fulfilled,
            reason: None,
        }
    }

    /// Cycle failed; `reason` is the human-readable failure description.
    pub fn rejected(reason: impl Into<String>) -> Self {
        FetchResult {
            value: None,
            state: FetchState::Rejected,
            reason: Some(reason.into()),
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Returns true if the result is `Fulfilled` or `Rejected`.
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if the result is `Pending` or `Refreshing`.
    pub fn is_loading(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Returns true if a new cycle is worth triggering: nothing has been
    /// fetched yet, or the last cycle failed.
    pub fn should_load(&self) -> bool {
        matches!(self.state, FetchState::NotStarted | FetchState::Rejected)
    }

    /// Returns true if the result is `Fulfilled`.
    pub fn is_fulfilled(&self) -> bool {
        self.state == FetchState::Fulfilled
    }

    /// Returns true if the result is `Rejected`.
    pub fn is_rejected(&self) -> bool {
        self.state == FetchState::Rejected
    }

    /// Borrows the value, if any.
    pub fn value_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Takes the value, if any.
    pub fn value(self) -> Option<T> {
        self.value
    }

    /// Returns the rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Starts a new cycle on top of this one: the state becomes `Refreshing`,
    /// the current value (if any) is kept and the reason is dropped.
    pub fn into_refreshing(self) -> Self {
        FetchResult::refreshing(self.value)
    }

    /// Maps the value, keeping state and reason.
    pub fn map<U, F>(self, f: F) -> FetchResult<U>
    where
        F: FnOnce(T) -> U,
    {
        FetchResult {
            value: self.value.map(f),
            state: self.state,
            reason: self.reason,
        }
    }
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        FetchResult::not_started()
    }
}

impl<T> From<FetchError> for FetchResult<T> {
    fn from(error: FetchError) -> Self {
        FetchResult::rejected(error.to_string())
    }
}

impl<T> From<Result<T, FetchError>> for FetchResult<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchResult::fulfilled(value),
            Err(error) => error.into(),
        }
    }
}
