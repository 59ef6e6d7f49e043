//! transport
//!
//! The single boundary between the git-object core and the network.
//!
//! # Design
//!
//! The core never talks HTTP itself. It builds a [`Request`] (method, path
//! relative to the API root, optional JSON body) and hands it to a
//! [`Transport`]. Authentication, headers, status mapping and body decoding
//! into JSON all live behind that trait.
//!
//! Transports are injected explicitly (usually as `Arc<dyn Transport>`), never
//! reached through global state.
//!
//! # Implementations
//!
//! - [`http::HttpTransport`]: reqwest client against the GitHub REST API
//! - [`mock::MockTransport`]: scripted responses with call recording, for tests

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::forge::ForgeError;

/// HTTP method used by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A request built by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the API root, including any query string
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Rate limit state reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp when the window resets
    pub reset: u64,
}

/// A successful response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: u16,
    pub rate: Option<Rate>,
    /// Decoded JSON body; `Null` when the body was empty
    pub body: serde_json::Value,
}

impl Response {
    /// Decode the body into a typed wire record.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::Decode` if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ForgeError> {
        serde_json::from_value(self.body).map_err(|e| ForgeError::Decode(e.to_string()))
    }
}

/// Executes requests against a hosting provider.
///
/// Implementations must be `Send + Sync` so a single transport can be shared
/// across tasks.
///
/// # Errors
///
/// Non-success statuses and network failures are reported as `ForgeError`
/// and passed through the core unchanged. Implementations should stop early
/// and return `ForgeError::Cancelled` when `cancel` fires.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Response, ForgeError>;
}
