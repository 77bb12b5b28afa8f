use thiserror::Error;

/// Every way a fetch cycle can end in a rejection.
///
/// The `Display` output of each variant is the exact reason string written
/// into [`FetchResult::reason`](crate::FetchResult) and handed to the
/// [`Logger`](crate::Logger).
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum FetchError {
    /// The transport failed before a response was obtained.
    #[error("Fetch failed for request {url} with reason: {reason}")]
    Transport { url: String, reason: String },

    /// A response arrived but its status is outside `200..=299`.
    #[error("Fetch failed for request {url} with statusCode {status} & statusText {status_text}")]
    Http {
        url: String,
        status: u16,
        status_text: String,
    },

    /// The response body is not valid JSON.
    #[error("Fetch failed for request {url} with reason: {reason}")]
    Decode { url: String, reason: String },

    /// The payload parsed but the validator refused it.
    #[error("Could not decode result for request {url}")]
    Validation { url: String },

    /// The request body was refused by the body guard; nothing was sent.
    #[error("Could not encode body for fetch with url: {url} and body: {body}")]
    Encoding { url: String, body: String },
}

impl FetchError {
    /// Builds a [`FetchError::Transport`] from any displayable reason.
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if no response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// Returns true if the response status was not ok.
    pub fn is_http(&self) -> bool {
        matches!(self, FetchError::Http { .. })
    }

    /// Returns true if the body could not be parsed as JSON.
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }

    /// Returns true if the validator refused the payload.
    pub fn is_validation(&self) -> bool {
        matches!(self, FetchError::Validation { .. })
    }

    /// Returns true if the body guard refused the request body.
    pub fn is_encoding(&self) -> bool {
        matches!(self, FetchError::Encoding { .. })
    }

    /// The url of the request this error belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Http { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::Validation { url }
            | FetchError::Encoding { url, .. } => url,
        }
    }
}
