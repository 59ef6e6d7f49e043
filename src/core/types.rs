//! core::types
//!
//! Vendor-neutral git object model.
//!
//! # Types
//!
//! - [`Reference`] - A branch or tag pointer
//! - [`Commit`] / [`Signature`] - Normalized commit record
//! - [`Change`] / [`ChangeStatus`] - One file entry of a diff
//! - [`CommitInput`] / [`Blob`] - Caller intent for the commit pipeline
//! - [`ReferenceInput`] - Caller intent for branch creation
//! - [`ListOptions`] / [`CommitListOptions`] - Single-page listing parameters
//!
//! Output types are produced fresh by the converters in
//! [`crate::forge::github`]; input types are consumed by a single call and
//! never retained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::refs;

/// A normalized pointer to a git ref.
///
/// `path` is the fully qualified ref (`refs/heads/main`, `refs/tags/v1`) and
/// always ends with `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Short name (`main`)
    pub name: String,
    /// Fully qualified path (`refs/heads/main`)
    pub path: String,
    /// Object id the ref points at
    pub sha: String,
}

impl Reference {
    /// Whether this reference lives in the branch namespace.
    pub fn is_branch(&self) -> bool {
        refs::is_branch(&self.path)
    }

    /// Whether this reference lives in the tag namespace.
    pub fn is_tag(&self) -> bool {
        refs::is_tag(&self.path)
    }
}

/// Author or committer identity.
///
/// `name`, `email` and `date` come from the git object. `login` and `avatar`
/// come from the hosting account linked to the commit and are empty when the
/// provider could not associate one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
    /// Provider account handle
    pub login: String,
    /// Provider account avatar URL
    pub avatar: String,
}

/// A normalized commit record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Web URL of the commit
    pub link: String,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
}

/// How a file changed between two trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    #[default]
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl ChangeStatus {
    /// Parse a provider status string.
    ///
    /// Unknown strings resolve to `Modified`.
    pub fn parse(s: &str) -> Self {
        match s {
            "added" => ChangeStatus::Added,
            "removed" => ChangeStatus::Removed,
            "renamed" => ChangeStatus::Renamed,
            "copied" => ChangeStatus::Copied,
            "changed" => ChangeStatus::Changed,
            "unchanged" => ChangeStatus::Unchanged,
            _ => ChangeStatus::Modified,
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeStatus::Added => write!(f, "added"),
            ChangeStatus::Removed => write!(f, "removed"),
            ChangeStatus::Modified => write!(f, "modified"),
            ChangeStatus::Renamed => write!(f, "renamed"),
            ChangeStatus::Copied => write!(f, "copied"),
            ChangeStatus::Changed => write!(f, "changed"),
            ChangeStatus::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A single file entry of a commit or comparison diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub path: String,
    /// Path before a rename; empty otherwise
    pub previous_path: String,
    /// Blob id of the new content
    pub sha: String,
    pub status: ChangeStatus,
    pub additions: u64,
    pub deletions: u64,
}

impl Change {
    pub fn added(&self) -> bool {
        self.status == ChangeStatus::Added
    }

    pub fn deleted(&self) -> bool {
        self.status == ChangeStatus::Removed
    }

    pub fn renamed(&self) -> bool {
        self.status == ChangeStatus::Renamed
    }
}

/// Object type of a tree entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    /// Regular file content
    #[default]
    Blob,
    /// Subdirectory
    Tree,
    /// Submodule pointer to a commit in another repository
    Commit,
}

impl TreeEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeEntryKind::Blob => "blob",
            TreeEntryKind::Tree => "tree",
            TreeEntryKind::Commit => "commit",
        }
    }
}

/// A single file edit inside a [`CommitInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub path: String,
    /// Git file mode (`100644`, `100755`, `040000`, `160000`, `120000`)
    pub mode: String,
    pub content: String,
    #[serde(default)]
    pub kind: TreeEntryKind,
}

impl Blob {
    /// A regular, non-executable file.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            content: content.into(),
            kind: TreeEntryKind::Blob,
        }
    }
}

/// Caller intent for "commit these edits on top of `base`".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInput {
    pub message: String,
    /// Parent commit sha; also used as the base tree
    pub base: String,
    pub blobs: Vec<Blob>,
}

/// Caller intent for creating a ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceInput {
    /// Short or fully qualified name
    pub name: String,
    pub sha: String,
}

/// Parameters for a single listing page.
///
/// Zero means "provider default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    pub size: u32,
}

/// Parameters for a single page of commit history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitListOptions {
    pub page: u32,
    pub size: u32,
    /// Branch name or sha to list from
    pub git_ref: String,
    /// Only commits touching this path
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_status_parse() {
        assert_eq!(ChangeStatus::parse("added"), ChangeStatus::Added);
        assert_eq!(ChangeStatus::parse("removed"), ChangeStatus::Removed);
        assert_eq!(ChangeStatus::parse("renamed"), ChangeStatus::Renamed);
        assert_eq!(ChangeStatus::parse("modified"), ChangeStatus::Modified);
        assert_eq!(ChangeStatus::parse("bogus"), ChangeStatus::Modified);
        assert_eq!(ChangeStatus::parse(""), ChangeStatus::Modified);
    }

    #[test]
    fn change_status_display_matches_parse() {
        for status in [
            ChangeStatus::Added,
            ChangeStatus::Removed,
            ChangeStatus::Modified,
            ChangeStatus::Renamed,
            ChangeStatus::Copied,
            ChangeStatus::Changed,
            ChangeStatus::Unchanged,
        ] {
            assert_eq!(ChangeStatus::parse(&status.to_string()), status);
        }
    }

    #[test]
    fn change_predicates() {
        let change = Change {
            path: "a.txt".into(),
            status: ChangeStatus::Renamed,
            ..Default::default()
        };
        assert!(change.renamed());
        assert!(!change.added());
        assert!(!change.deleted());
    }

    #[test]
    fn reference_namespace() {
        let branch = Reference {
            name: "main".into(),
            path: "refs/heads/main".into(),
            sha: "abc".into(),
        };
        assert!(branch.is_branch());
        assert!(!branch.is_tag());
    }

    #[test]
    fn blob_file_defaults() {
        let blob = Blob::file("README.md", "hello");
        assert_eq!(blob.mode, "100644");
        assert_eq!(blob.kind, TreeEntryKind::Blob);
        assert_eq!(blob.kind.as_str(), "blob");
    }

    #[test]
    fn blob_kind_defaults_when_absent() {
        let blob: Blob =
            serde_json::from_str(r#"{"path":"a","mode":"100644","content":"x"}"#).unwrap();
        assert_eq!(blob.kind, TreeEntryKind::Blob);
    }
}
