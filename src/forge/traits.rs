//! forge::traits
//!
//! Provider-neutral git service interface.
//!
//! # Design
//!
//! The `GitService` trait is async because every operation is a remote
//! round trip. Each method takes the cancellation token the caller wants
//! honoured and the `owner/repo` identifier it addresses; the trait itself
//! carries no per-repository state.
//!
//! All methods return `Result` and never retry. Failures from the transport
//! are surfaced unchanged.
//!
//! # Example
//!
//! ```ignore
//! use forgegit::forge::{GitService, ForgeError};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn head_of_main(git: &dyn GitService) -> Result<String, ForgeError> {
//!     let cancel = CancellationToken::new();
//!     let branch = git.find_branch(&cancel, "octocat/hello-world", "main").await?;
//!     Ok(branch.sha)
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::core::types::{
    Change, Commit, CommitInput, CommitListOptions, ListOptions, Reference, ReferenceInput,
};

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The response body did not match the expected wire format.
    #[error("decode error: {0}")]
    Decode(String),

    /// The caller's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,
}

/// Git object operations against one hosting provider.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// - `NotFound`: the branch, tag, commit or repository does not exist
/// - `AuthRequired` / `AuthFailed`: credentials missing or rejected
/// - `RateLimited`: back off before retrying
/// - `Cancelled`: the token fired before the operation finished
#[async_trait]
pub trait GitService: Send + Sync {
    /// Get the provider name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Create a branch pointing at `input.sha`.
    ///
    /// `input.name` may be short or fully qualified; short names are placed
    /// in the branch namespace. The ref is not read back.
    async fn create_branch(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        input: &ReferenceInput,
    ) -> Result<(), ForgeError>;

    /// Fetch a branch by name.
    async fn find_branch(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        name: &str,
    ) -> Result<Reference, ForgeError>;

    /// Fetch a tag by name.
    async fn find_tag(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        name: &str,
    ) -> Result<Reference, ForgeError>;

    /// Fetch a commit by sha or ref name.
    async fn find_commit(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        git_ref: &str,
    ) -> Result<Commit, ForgeError>;

    /// Commit a set of file edits on top of `input.base`.
    ///
    /// # Errors
    ///
    /// Fails with the first error encountered. A failure after the tree was
    /// created leaves an unreferenced tree behind; retrying the whole call
    /// is safe.
    async fn create_commit(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        input: CommitInput,
    ) -> Result<Commit, ForgeError>;

    /// List one page of branches.
    async fn list_branches(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: ListOptions,
    ) -> Result<Vec<Reference>, ForgeError>;

    /// List one page of tags.
    async fn list_tags(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: ListOptions,
    ) -> Result<Vec<Reference>, ForgeError>;

    /// List one page of commits.
    async fn list_commits(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: &CommitListOptions,
    ) -> Result<Vec<Commit>, ForgeError>;

    /// List the files changed by a single commit.
    async fn list_changes(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        git_ref: &str,
        opts: ListOptions,
    ) -> Result<Vec<Change>, ForgeError>;

    /// List the files that differ between `source` and `target`.
    ///
    /// The order of `source` and `target` is significant and passed through
    /// as given.
    async fn compare_changes(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        source: &str,
        target: &str,
        opts: ListOptions,
    ) -> Result<Vec<Change>, ForgeError>;
}
