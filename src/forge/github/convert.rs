//! forge::github::convert
//!
//! Mapping from GitHub wire records to the neutral model.
//!
//! Every converter is total: a record that decoded always converts, with
//! missing values resolved to empty strings or `None`. List converters keep
//! input order and return an empty `Vec` for an empty input.

use super::wire::{
    GitHubAccount, GitHubBranch, GitHubCommit, GitHubFile, GitHubRef, GitHubSignature,
};
use crate::core::refs::{expand_ref, trim_ref, BRANCH_PREFIX, TAG_PREFIX};
use crate::core::types::{Change, ChangeStatus, Commit, Reference, Signature};

pub(crate) fn convert_commit_list(from: Vec<GitHubCommit>) -> Vec<Commit> {
    from.into_iter().map(convert_commit).collect()
}

pub(crate) fn convert_commit(from: GitHubCommit) -> Commit {
    let detail = from.commit;
    Commit {
        sha: from.sha,
        link: from.html_url,
        message: detail.message,
        author: convert_signature(detail.author, from.author),
        committer: convert_signature(detail.committer, from.committer),
    }
}

/// Merge the git-level signature with the (optional) account metadata.
fn convert_signature(git: GitHubSignature, account: Option<GitHubAccount>) -> Signature {
    let account = account.unwrap_or_default();
    Signature {
        name: git.name,
        email: git.email,
        date: git.date,
        login: account.login,
        avatar: account.avatar_url,
    }
}

pub(crate) fn convert_branch_list(from: Vec<GitHubBranch>) -> Vec<Reference> {
    from.into_iter().map(convert_branch).collect()
}

pub(crate) fn convert_branch(from: GitHubBranch) -> Reference {
    named_reference(from, BRANCH_PREFIX)
}

pub(crate) fn convert_tag_list(from: Vec<GitHubBranch>) -> Vec<Reference> {
    from.into_iter().map(convert_tag).collect()
}

pub(crate) fn convert_tag(from: GitHubBranch) -> Reference {
    named_reference(from, TAG_PREFIX)
}

/// Branch and tag listings share a record shape and differ only in namespace.
fn named_reference(from: GitHubBranch, prefix: &str) -> Reference {
    Reference {
        name: trim_ref(&from.name).to_string(),
        path: expand_ref(&from.name, prefix),
        sha: from.commit.sha,
    }
}

pub(crate) fn convert_ref(from: GitHubRef) -> Reference {
    Reference {
        name: trim_ref(&from.ref_name).to_string(),
        path: from.ref_name,
        sha: from.object.sha,
    }
}

pub(crate) fn convert_change_list(from: Vec<GitHubFile>) -> Vec<Change> {
    from.into_iter().map(convert_change).collect()
}

pub(crate) fn convert_change(from: GitHubFile) -> Change {
    Change {
        status: ChangeStatus::parse(&from.status),
        path: from.filename,
        previous_path: from.previous_filename,
        sha: from.sha,
        additions: from.additions,
        deletions: from.deletions,
    }
}
