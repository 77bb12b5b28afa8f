use crate::validation::decode_response;
use crate::{FetchError, FetchResult, Logger, Request, Transport, Validator};
use serde::Serialize;
use tracing::debug;

/// Runs one GET cycle against `url` and hands the terminal result to `set_value`.
///
/// Rejections are reported to `logger.error` with the same reason that ends up
/// in the result.
pub async fn execute_fetch<T, F>(
    transport: &dyn Transport,
    url: &str,
    set_value: F,
    validator: &dyn Validator<T>,
    logger: &dyn Logger,
) where
    F: FnOnce(FetchResult<T>),
{
    let outcome = perform(transport, Request::get(url), validator).await;
    set_value(settle(outcome, logger));
}

/// Runs one POST cycle, sending `body` serialized as JSON.
///
/// Body guards are the caller's concern; this function only serializes.
pub async fn execute_post_fetch<B, T, F>(
    transport: &dyn Transport,
    url: &str,
    body: &B,
    set_value: F,
    result_validator: &dyn Validator<T>,
    logger: &dyn Logger,
) where
    B: Serialize + ?Sized,
    F: FnOnce(FetchResult<T>),
{
    let outcome = match serde_json::to_string(body) {
        Ok(payload) => perform(transport, Request::post(url, payload), result_validator).await,
        Err(e) => Err(FetchError::transport(url, e)),
    };
    set_value(settle(outcome, logger));
}

async fn perform<T>(
    transport: &dyn Transport,
    request: Request,
    validator: &dyn Validator<T>,
) -> Result<T, FetchError> {
    debug!(method = %request.method, url = %request.url, "issuing request");
    let url = request.url.clone();
    let response = transport
        .request(request)
        .await
        .map_err(|e| FetchError::transport(&url, e))?;
    decode_response(&response, validator, &url)
}

pub(crate) fn settle<T>(outcome: Result<T, FetchError>, logger: &dyn Logger) -> FetchResult<T> {
    if let Err(error) = &outcome {
        logger.error(&error.to_string());
    }
    outcome.into()
}
