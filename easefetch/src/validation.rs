use crate::{FetchError, FetchResult, TransportResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Decides whether a decoded JSON payload has the shape of `T`.
///
/// Returning `None` rejects the payload.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, value: Value) -> Option<T>;

    /// Adds a predicate over the already validated value.
    fn check<F>(self, predicate: F) -> Checked<Self, F>
    where
        Self: Sized,
        F: Fn(&T) -> bool + Send + Sync,
    {
        Checked {
            inner: self,
            predicate,
        }
    }
}

/// Accepts the raw JSON value when the predicate holds.
#[derive(Debug, Clone)]
pub struct Predicate<F>(F);

pub fn predicate<F>(f: F) -> Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    Predicate(f)
}

impl<F> Validator<Value> for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn validate(&self, value: Value) -> Option<Value> {
        (self.0)(&value).then_some(value)
    }
}

/// Accepts any payload that deserializes into `T`.
#[derive(Debug)]
pub struct Typed<T>(PhantomData<fn() -> T>);

pub fn typed<T: DeserializeOwned>() -> Typed<T> {
    Typed(PhantomData)
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Typed(PhantomData)
    }
}

impl<T: DeserializeOwned> Validator<T> for Typed<T> {
    fn validate(&self, value: Value) -> Option<T> {
        serde_json::from_value(value).ok()
    }
}

/// Wraps a plain function as a validator.
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(Value) -> Option<T> + Send + Sync,
{
    FromFn(f)
}

impl<T, F> Validator<T> for FromFn<F>
where
    F: Fn(Value) -> Option<T> + Send + Sync,
{
    fn validate(&self, value: Value) -> Option<T> {
        (self.0)(value)
    }
}

#[derive(Debug, Clone)]
pub struct Checked<V, F> {
    inner: V,
    predicate: F,
}

impl<T, V, F> Validator<T> for Checked<V, F>
where
    V: Validator<T>,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn validate(&self, value: Value) -> Option<T> {
        self.inner
            .validate(value)
            .filter(|validated| (self.predicate)(validated))
    }
}

/// Checks a request body before it is sent.
pub trait BodyGuard<B>: Send + Sync {
    fn accepts(&self, body: &B) -> bool;
}

impl<B, F> BodyGuard<B> for F
where
    F: Fn(&B) -> bool + Send + Sync,
{
    fn accepts(&self, body: &B) -> bool {
        self(body)
    }
}

/// Classifies a response: HTTP status first, then JSON decoding, then the validator.
pub(crate) fn decode_response<T>(
    response: &TransportResponse,
    validator: &dyn Validator<T>,
    url: &str,
) -> Result<T, FetchError> {
    if !response.ok() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: response.status,
            status_text: response.status_text.clone(),
        });
    }

    let payload = response.json().map_err(|e| FetchError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    validator
        .validate(payload)
        .ok_or_else(|| FetchError::Validation {
            url: url.to_string(),
        })
}

/// Turns a response into a terminal [`FetchResult`].
pub fn validate_response<T>(
    response: &TransportResponse,
    validator: &dyn Validator<T>,
    url: &str,
) -> FetchResult<T> {
    decode_response(response, validator, url).into()
}
