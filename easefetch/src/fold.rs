use crate::{FetchResult, FetchState};

/// Reason handed to the rejected arm when a `Fulfilled` result has no value.
pub const NULL_VALUE_REASON: &str = "Value is null";

impl<T> FetchResult<T> {
    /// Collapses the result into a single value, one arm per state.
    ///
    /// A `Fulfilled` result without a value is routed to `rejected` with
    /// [`NULL_VALUE_REASON`]. `other` covers states added in later versions of
    /// [`FetchState`].
    pub fn fold<R, F, E>(
        &self,
        not_started: R,
        pending: R,
        refreshing: R,
        fulfilled: F,
        rejected: E,
        other: R,
    ) -> R
    where
        F: FnOnce(&T) -> R,
        E: FnOnce(Option<&str>) -> R,
    {
        match self.state {
            FetchState::NotStarted => not_started,
            FetchState::Pending => pending,
            FetchState::Refreshing => refreshing,
            FetchState::Fulfilled => match &self.value {
                Some(value) => fulfilled(value),
                None => rejected(Some(NULL_VALUE_REASON)),
            },
            FetchState::Rejected => rejected(self.reason.as_deref()),
            #[allow(unreachable_patterns)]
            _ => other,
        }
    }
}
