use crate::{Method, Request, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("easefetch/", env!("CARGO_PKG_VERSION"));

/// Settings used to build the `reqwest` client behind [`HttpTransport`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpTransportConfig {
    pub user_agent: String,
    /// Applied by the HTTP client itself; expiry surfaces as a transport failure.
    pub timeout: Option<Duration>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        HttpTransportConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl HttpTransportConfig {
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }
}

/// [`Transport`] over HTTP, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::from_config(HttpTransportConfig::default())
    }

    pub fn from_config(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::new)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: Request) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(TransportError::new)?;
        let status = response.status();
        let status_text = status_text(&response);

        // Non-ok responses are failures on their status line alone.
        if !status.is_success() {
            return Ok(TransportResponse::new(status.as_u16(), status_text, Vec::<u8>::new()));
        }

        let body = response.bytes().await.map_err(TransportError::new)?;
        Ok(TransportResponse::new(status.as_u16(), status_text, body.to_vec()))
    }
}

/// The reason phrase the server sent, or the canonical one for the status.
///
/// hyper only keeps the phrase when it differs from the canonical reason.
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
