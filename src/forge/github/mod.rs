//! forge::github
//!
//! GitHub implementation of [`GitService`].
//!
//! # Design
//!
//! Every operation builds a path relative to the API root, hands it to the
//! injected [`Transport`], decodes the body into a record from [`wire`] and
//! converts it with [`convert`]. Nothing is cached between calls.
//!
//! # Commit Creation
//!
//! GitHub has no single "commit these files" endpoint. [`GitHubGit`] runs
//! two dependent calls:
//!
//! 1. `POST repos/{repo}/git/trees` builds a tree on top of the base
//! 2. `POST repos/{repo}/git/commits` commits that tree with the base as
//!    its only parent
//!
//! If step 1 fails, step 2 is never sent. If step 2 fails (or the token is
//! cancelled in between), the tree from step 1 stays behind unreferenced.
//! GitHub cannot delete git objects, so there is no rollback. Trees are
//! content addressed: retrying with the same input reuses the same tree sha,
//! but every successful retry creates a distinct commit.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use forgegit::core::types::{Blob, CommitInput};
//! use forgegit::forge::{github::GitHubGit, GitService};
//! use forgegit::transport::http::HttpTransport;
//! use tokio_util::sync::CancellationToken;
//!
//! let git = GitHubGit::new(Arc::new(HttpTransport::new(Some(token))));
//! let commit = git
//!     .create_commit(
//!         &CancellationToken::new(),
//!         "octocat/hello-world",
//!         CommitInput {
//!             message: "Update README".into(),
//!             base: head_sha,
//!             blobs: vec![Blob::file("README.md", "hello")],
//!         },
//!     )
//!     .await?;
//! ```

mod convert;
mod options;
mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use self::convert::{
    convert_branch, convert_branch_list, convert_change_list, convert_commit,
    convert_commit_list, convert_ref, convert_tag_list,
};
use self::options::{encode_commit_list_options, encode_list_options};
use self::wire::{
    CreateCommitBody, CreateRefBody, CreateTreeBody, GitHubBranch, GitHubCommit, GitHubCompare,
    GitHubRef, GitHubTree, TreeEntry,
};
use super::traits::{ForgeError, GitService};
use crate::core::refs::{expand_ref, split, BRANCH_PREFIX};
use crate::core::types::{
    Change, Commit, CommitInput, CommitListOptions, ListOptions, Reference, ReferenceInput,
};
use crate::transport::{Request, Response, Transport};

/// GitHub git service.
///
/// Holds only the transport; clones are cheap and share it.
#[derive(Clone)]
pub struct GitHubGit {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for GitHubGit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubGit").finish_non_exhaustive()
    }
}

impl GitHubGit {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send one request, racing it against the cancellation token.
    ///
    /// A token that is already cancelled stops the request from being sent.
    async fn execute(
        &self,
        cancel: &CancellationToken,
        request: Request,
    ) -> Result<Response, ForgeError> {
        if cancel.is_cancelled() {
            return Err(ForgeError::Cancelled);
        }

        debug!(method = %request.method, path = %request.path, "github request");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ForgeError::Cancelled),
            result = self.transport.execute(cancel, request) => result,
        }?;

        debug!(
            status = response.status,
            rate_remaining = ?response.rate.map(|r| r.remaining),
            "github response"
        );
        Ok(response)
    }

    async fn get<T: DeserializeOwned + Send>(
        &self,
        cancel: &CancellationToken,
        path: String,
    ) -> Result<T, ForgeError> {
        self.execute(cancel, Request::get(path)).await?.decode()
    }

    async fn post<T: DeserializeOwned + Send>(
        &self,
        cancel: &CancellationToken,
        path: String,
        body: serde_json::Value,
    ) -> Result<T, ForgeError> {
        self.execute(cancel, Request::post(path, body)).await?.decode()
    }

    /// First half of commit creation: build a tree on top of `input.base`.
    async fn create_tree(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        input: &CommitInput,
    ) -> Result<GitHubTree, ForgeError> {
        let path = format!("repos/{}/git/trees", repo);
        let (owner, name) = split(repo);
        let body = encode(&CreateTreeBody {
            base_tree: &input.base,
            owner,
            repo: name,
            tree: input
                .blobs
                .iter()
                .map(|b| TreeEntry {
                    path: &b.path,
                    mode: &b.mode,
                    kind: b.kind.as_str(),
                    content: &b.content,
                })
                .collect(),
        })?;
        self.post(cancel, path, body).await
    }
}

/// Serialize a wire request body.
fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ForgeError> {
    serde_json::to_value(body).map_err(|e| ForgeError::Encode(e.to_string()))
}

#[async_trait]
impl GitService for GitHubGit {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn create_branch(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        input: &ReferenceInput,
    ) -> Result<(), ForgeError> {
        let path = format!("repos/{}/git/refs", repo);
        let body = encode(&CreateRefBody {
            ref_name: expand_ref(&input.name, BRANCH_PREFIX),
            sha: &input.sha,
        })?;
        self.execute(cancel, Request::post(path, body)).await?;
        Ok(())
    }

    async fn find_branch(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        name: &str,
    ) -> Result<Reference, ForgeError> {
        let path = format!("repos/{}/branches/{}", repo, name);
        let branch: GitHubBranch = self.get(cancel, path).await?;
        Ok(convert_branch(branch))
    }

    async fn find_tag(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        name: &str,
    ) -> Result<Reference, ForgeError> {
        let path = format!("repos/{}/git/ref/tags/{}", repo, name);
        let r: GitHubRef = self.get(cancel, path).await?;
        Ok(convert_ref(r))
    }

    async fn find_commit(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        git_ref: &str,
    ) -> Result<Commit, ForgeError> {
        let path = format!("repos/{}/commits/{}", repo, git_ref);
        let commit: GitHubCommit = self.get(cancel, path).await?;
        Ok(convert_commit(commit))
    }

    async fn create_commit(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        input: CommitInput,
    ) -> Result<Commit, ForgeError> {
        let tree = self.create_tree(cancel, repo, &input).await?;
        debug!(repo, tree = %tree.sha, base = %input.base, "created tree");

        if cancel.is_cancelled() {
            warn!(repo, tree = %tree.sha, "cancelled after tree creation; tree left unreferenced");
            return Err(ForgeError::Cancelled);
        }

        let path = format!("repos/{}/git/commits", repo);
        let body = encode(&CreateCommitBody {
            message: &input.message,
            tree: &tree.sha,
            parents: vec![input.base.as_str()],
        })?;
        let commit: GitHubCommit = match self.post(cancel, path, body).await {
            Ok(commit) => commit,
            Err(e) => {
                warn!(repo, tree = %tree.sha, error = %e, "commit creation failed; tree left unreferenced");
                return Err(e);
            }
        };
        debug!(repo, commit = %commit.sha, "created commit");

        Ok(convert_commit(commit))
    }

    async fn list_branches(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: ListOptions,
    ) -> Result<Vec<Reference>, ForgeError> {
        let path = format!("repos/{}/branches?{}", repo, encode_list_options(opts));
        let branches: Vec<GitHubBranch> = self.get(cancel, path).await?;
        Ok(convert_branch_list(branches))
    }

    async fn list_tags(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: ListOptions,
    ) -> Result<Vec<Reference>, ForgeError> {
        let path = format!("repos/{}/tags?{}", repo, encode_list_options(opts));
        let tags: Vec<GitHubBranch> = self.get(cancel, path).await?;
        Ok(convert_tag_list(tags))
    }

    async fn list_commits(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        opts: &CommitListOptions,
    ) -> Result<Vec<Commit>, ForgeError> {
        let path = format!("repos/{}/commits?{}", repo, encode_commit_list_options(opts));
        let commits: Vec<GitHubCommit> = self.get(cancel, path).await?;
        Ok(convert_commit_list(commits))
    }

    async fn list_changes(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        git_ref: &str,
        _opts: ListOptions,
    ) -> Result<Vec<Change>, ForgeError> {
        let path = format!("repos/{}/commits/{}", repo, git_ref);
        let commit: GitHubCommit = self.get(cancel, path).await?;
        Ok(convert_change_list(commit.files))
    }

    async fn compare_changes(
        &self,
        cancel: &CancellationToken,
        repo: &str,
        source: &str,
        target: &str,
        _opts: ListOptions,
    ) -> Result<Vec<Change>, ForgeError> {
        let path = format!("repos/{}/compare/{}...{}", repo, source, target);
        let compare: GitHubCompare = self.get(cancel, path).await?;
        Ok(convert_change_list(compare.files))
    }
}

// --------------------------------------------------------------------------
// URL Parsing
// --------------------------------------------------------------------------

/// Parse a GitHub remote URL into an `owner/repo` identifier.
///
/// Supports both SSH and HTTPS formats:
/// - `git@github.com:owner/repo.git`
/// - `https://github.com/owner/repo.git`
/// - `https://github.com/owner/repo`
///
/// # Example
///
/// ```
/// use forgegit::forge::github::parse_github_url;
///
/// assert_eq!(
///     parse_github_url("git@github.com:octocat/hello-world.git").as_deref(),
///     Some("octocat/hello-world")
/// );
/// ```
pub fn parse_github_url(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("http://github.com/"))?;
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let (owner, repo) = split(rest);
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(crate::core::refs::join(owner, repo))
}
