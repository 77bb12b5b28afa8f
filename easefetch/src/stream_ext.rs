use crate::FetchResult;
use futures_core::stream::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Stream adapters for observing fetch results.
pub trait FetchStreamExt: Stream {
    /// Yields items until (and including) the first one matching `test`.
    fn stop_if<F>(self, test: F) -> StopIf<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        StopIf {
            inner: self,
            test,
            done: false,
        }
    }

    /// Yields results until the first terminal one, which is yielded too.
    ///
    /// ```
    /// use easefetch::{FetchResult, FetchStreamExt, StateStore};
    ///
    /// async fn last_result(store: StateStore<FetchResult<String>>) {
    ///     let _settling = store.to_stream().until_settled();
    /// }
    /// ```
    fn until_settled<T>(self) -> StopIf<Self, fn(&FetchResult<T>) -> bool>
    where
        Self: Stream<Item = FetchResult<T>> + Sized,
    {
        self.stop_if(FetchResult::is_complete as fn(&FetchResult<T>) -> bool)
    }
}

impl<T: ?Sized> FetchStreamExt for T where T: Stream {}

/// Stream returned by [`FetchStreamExt::stop_if`].
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct StopIf<S, F> {
    #[pin]
    inner: S,
    test: F,
    done: bool,
}

impl<S, F> Stream for StopIf<S, F>
where
    S: Stream,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let next = ready!(this.inner.poll_next(cx));
        *this.done = next.as_ref().map_or(true, |item| (this.test)(item));
        Poll::Ready(next)
    }
}
