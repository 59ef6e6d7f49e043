//! transport::mock
//!
//! Scripted transport for deterministic testing.
//!
//! # Design
//!
//! Responses are registered per `(method, path)` route. Every request that
//! reaches the transport is recorded, so tests can assert exactly which calls
//! were issued and with which bodies. Requests with no matching route fail
//! with `ForgeError::NotFound`.
//!
//! # Example
//!
//! ```
//! use forgegit::transport::mock::MockTransport;
//! use forgegit::transport::{Method, Request, Transport};
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio_test::block_on(async {
//! let transport = MockTransport::new()
//!     .respond(Method::Get, "repos/o/r/branches/main", serde_json::json!({"name": "main"}));
//!
//! let cancel = CancellationToken::new();
//! let response = transport
//!     .execute(&cancel, Request::get("repos/o/r/branches/main"))
//!     .await
//!     .unwrap();
//! assert_eq!(response.body["name"], "main");
//! assert_eq!(transport.calls().len(), 1);
//! # });
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{Method, Request, Response, Transport};
use crate::forge::ForgeError;

/// Mock transport for testing.
///
/// Clones share the same routes and call log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    routes: Vec<Route>,
    calls: Vec<Request>,
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    result: Result<Response, ForgeError>,
    /// Cancelled once this route has answered
    cancel_after: Option<CancellationToken>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn route(self, route: Route) -> Self {
        self.lock().routes.push(route);
        self
    }

    /// Answer `method path` with a 200 and the given JSON body.
    pub fn respond(self, method: Method, path: impl Into<String>, body: serde_json::Value) -> Self {
        self.route(Route {
            method,
            path: path.into(),
            result: Ok(Response {
                status: 200,
                rate: None,
                body,
            }),
            cancel_after: None,
        })
    }

    /// Answer `method path` with the given error.
    pub fn fail(self, method: Method, path: impl Into<String>, error: ForgeError) -> Self {
        self.route(Route {
            method,
            path: path.into(),
            result: Err(error),
            cancel_after: None,
        })
    }

    /// Answer `method path` successfully, then cancel `token`.
    ///
    /// Simulates a cancellation arriving between two dependent calls.
    pub fn respond_then_cancel(
        self,
        method: Method,
        path: impl Into<String>,
        body: serde_json::Value,
        token: CancellationToken,
    ) -> Self {
        self.route(Route {
            method,
            path: path.into(),
            result: Ok(Response {
                status: 200,
                rate: None,
                body,
            }),
            cancel_after: Some(token),
        })
    }

    /// All requests received, in order.
    pub fn calls(&self) -> Vec<Request> {
        self.lock().calls.clone()
    }

    /// Paths of all requests received, in order.
    pub fn paths(&self) -> Vec<String> {
        self.lock().calls.iter().map(|r| r.path.clone()).collect()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Response, ForgeError> {
        let mut inner = self.lock();
        inner.calls.push(request.clone());

        if cancel.is_cancelled() {
            return Err(ForgeError::Cancelled);
        }

        let route = inner
            .routes
            .iter()
            .find(|r| r.method == request.method && r.path == request.path);

        match route {
            Some(route) => {
                if let Some(ref token) = route.cancel_after {
                    token.cancel();
                }
                route.result.clone()
            }
            None => Err(ForgeError::NotFound(format!(
                "no mock route for {} {}",
                request.method, request.path
            ))),
        }
    }
}
