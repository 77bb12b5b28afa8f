use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A single outgoing request. `body` holds an already serialized JSON payload.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Request {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Request {
            method: Method::Post,
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        TransportResponse {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// True for statuses in `200..=299`.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(reason: impl ToString) -> Self {
        TransportError(reason.to_string())
    }
}

/// The network primitive the executors run on.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: Request) -> Result<TransportResponse, TransportError>;
}
