//! transport::http
//!
//! reqwest-backed transport for the GitHub REST API.
//!
//! # Status Mapping
//!
//! | Status | Error |
//! |---|---|
//! | 401 | `AuthRequired` without a token, `AuthFailed` with one |
//! | 403 with `X-RateLimit-Remaining: 0`, 429 | `RateLimited` |
//! | 403 | `AuthFailed` (with required permissions when GitHub reports them) |
//! | 404 | `NotFound` |
//! | other non-2xx | `ApiError` |
//!
//! Rate limits are reported, never retried. Retrying is the caller's call.
//!
//! # Example
//!
//! ```ignore
//! use forgegit::transport::http::HttpTransport;
//!
//! let transport = HttpTransport::new(Some("ghp_xxx".into()))
//!     .with_api_base("https://github.example.com/api/v3");
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Method, Rate, Request, Response, Transport};
use crate::forge::ForgeError;

pub use crate::core::config::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};

/// HTTP transport for GitHub and GitHub Enterprise.
pub struct HttpTransport {
    client: Client,
    token: Option<String>,
    api_base: String,
    user_agent: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("has_token", &self.token.is_some())
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport against `api.github.com`.
    ///
    /// Without a token, requests are sent anonymously and are subject to
    /// GitHub's unauthenticated rate limit.
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Use a custom API base URL (GitHub Enterprise, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Use a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for a path relative to the API root.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let agent = HeaderValue::from_str(&self.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, agent);
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Send the request and map the response.
    async fn send(&self, request: Request) -> Result<Response, ForgeError> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let mut builder = builder.headers(self.headers()?);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Response, ForgeError> {
        let status = response.status();
        let rate = parse_rate(response.headers());

        if !status.is_success() {
            return self.handle_error_response(response, status, rate).await;
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| ForgeError::Decode(format!("invalid JSON body: {}", e)))?
        };

        Ok(Response {
            status: status.as_u16(),
            rate,
            body,
        })
    }

    /// Handle an error response from the API.
    async fn handle_error_response(
        &self,
        response: reqwest::Response,
        status: StatusCode,
        rate: Option<Rate>,
    ) -> Result<Response, ForgeError> {
        let required_permissions = response
            .headers()
            .get("X-Accepted-GitHub-Permissions")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        debug!(status = status.as_u16(), %message, "request failed");

        let rate_exhausted = matches!(rate, Some(r) if r.remaining == 0 && r.limit > 0);

        Err(match status {
            StatusCode::UNAUTHORIZED if self.token.is_none() => ForgeError::AuthRequired,
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if rate_exhausted => ForgeError::RateLimited,
            StatusCode::FORBIDDEN => {
                let mut err_msg = format!("Permission denied: {}", message);
                if let Some(perms) = required_permissions {
                    if !perms.is_empty() {
                        err_msg.push_str(&format!(" [required: {}]", perms));
                    }
                }
                ForgeError::AuthFailed(err_msg)
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Response, ForgeError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ForgeError::Cancelled),
            result = self.send(request) => result,
        }
    }
}

/// Read the `X-RateLimit-*` headers, if all are present.
fn parse_rate(headers: &HeaderMap) -> Option<Rate> {
    let read = |name: &str| -> Option<u64> { headers.get(name)?.to_str().ok()?.parse().ok() };
    Some(Rate {
        limit: read("X-RateLimit-Limit")?,
        remaining: read("X-RateLimit-Remaining")?,
        reset: read("X-RateLimit-Reset")?,
    })
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_path() {
        let transport = HttpTransport::new(None);
        assert_eq!(
            transport.url("repos/octocat/hello-world/branches/main"),
            "https://api.github.com/repos/octocat/hello-world/branches/main"
        );
    }

    #[test]
    fn api_base_trailing_slash_trimmed() {
        let transport =
            HttpTransport::new(None).with_api_base("https://github.example.com/api/v3/");
        assert_eq!(transport.api_base(), "https://github.example.com/api/v3");
        assert_eq!(
            transport.url("/repos/o/r/tags?"),
            "https://github.example.com/api/v3/repos/o/r/tags?"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let transport = HttpTransport::new(Some("secret_token_abc123".into()));
        let debug_output = format!("{:?}", transport);
        assert!(!debug_output.contains("secret_token_abc123"));
        assert!(debug_output.contains("has_token"));
    }

    #[test]
    fn headers_without_token() {
        let headers = HttpTransport::new(None).headers().unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(USER_AGENT).unwrap(), "forgegit");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.github+json");
    }

    #[test]
    fn headers_with_token() {
        let headers = HttpTransport::new(Some("abc".into())).headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn headers_reject_invalid_token() {
        let result = HttpTransport::new(Some("bad\ntoken".into())).headers();
        assert!(matches!(result, Err(ForgeError::AuthFailed(_))));
    }

    #[test]
    fn parse_rate_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("5000"));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("4999"));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1700000000"));
        assert_eq!(
            parse_rate(&headers),
            Some(Rate {
                limit: 5000,
                remaining: 4999,
                reset: 1_700_000_000,
            })
        );
    }

    #[test]
    fn parse_rate_missing_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("5000"));
        assert_eq!(parse_rate(&headers), None);
    }
}
