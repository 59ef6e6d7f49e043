//! forge::github::wire
//!
//! GitHub REST request and response records.
//!
//! Field names match the GitHub API byte for byte. Response records default
//! every field so partial payloads (for example the abbreviated `commit`
//! object inside a branch listing) still decode; the converters decide what
//! a missing value means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST repos/{repo}/git/refs`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRefBody<'a> {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: &'a str,
}

/// Request body for `POST repos/{repo}/git/trees`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateTreeBody<'a> {
    pub base_tree: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub tree: Vec<TreeEntry<'a>>,
}

/// One entry of a tree creation request. Empty fields are omitted.
#[derive(Debug, Serialize)]
pub(crate) struct TreeEntry<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    pub path: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub mode: &'a str,
    #[serde(rename = "type", skip_serializing_if = "is_empty")]
    pub kind: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub content: &'a str,
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

/// Request body for `POST repos/{repo}/git/commits`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateCommitBody<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: Vec<&'a str>,
}

/// Tree object returned by tree creation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubTree {
    pub sha: String,
}

/// Branch record; also the shape of tag listings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubBranch {
    pub name: String,
    pub commit: GitHubCommit,
    #[allow(dead_code)]
    pub protected: bool,
}

/// Commit record as returned by the commits and git/commits endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubCommit {
    pub sha: String,
    pub html_url: String,
    pub commit: GitHubCommitDetail,
    /// `null` when GitHub cannot associate the author with an account
    pub author: Option<GitHubAccount>,
    /// `null` when GitHub cannot associate the committer with an account
    pub committer: Option<GitHubAccount>,
    pub files: Vec<GitHubFile>,
}

/// The git-level part of a commit record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubCommitDetail {
    pub author: GitHubSignature,
    pub committer: GitHubSignature,
    pub message: String,
}

/// Git-level author/committer block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubSignature {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

/// Account metadata attached to a commit.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubAccount {
    pub login: String,
    pub avatar_url: String,
}

/// A single ref as returned by `git/ref/...`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitHubObject,
}

/// Object a ref points at.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubObject {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub kind: String,
    pub sha: String,
}

/// Two-ref comparison record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubCompare {
    pub files: Vec<GitHubFile>,
}

/// One file of a commit or comparison diff.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GitHubFile {
    pub sha: String,
    pub filename: String,
    pub status: String,
    pub additions: u64,
    pub deletions: u64,
    pub previous_filename: String,
}
