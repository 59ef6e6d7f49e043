//! cli::commands
//!
//! Command implementations.
//!
//! Each command makes one [`GitService`] call (create-commit makes two
//! through the service) and returns the result as JSON. Printing is left to
//! the caller so handlers stay testable against a mock transport.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{Command, PageArgs};
use crate::core::types::{Blob, CommitInput, CommitListOptions, ListOptions, ReferenceInput};
use crate::forge::{resolve_repo, GitService};

impl From<PageArgs> for ListOptions {
    fn from(args: PageArgs) -> Self {
        ListOptions {
            page: args.page,
            size: args.per_page,
        }
    }
}

/// A file to upload, from a `LOCAL[=REMOTE]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub local: PathBuf,
    pub remote: String,
}

impl FileSpec {
    /// Parse `LOCAL` or `LOCAL=REMOTE`.
    ///
    /// Without a remote part the local path is reused, minus any leading
    /// `./`.
    pub fn parse(arg: &str) -> Result<Self> {
        let (local, remote) = match arg.split_once('=') {
            Some((local, remote)) => (local, remote),
            None => (arg, arg),
        };
        let remote = remote.trim_start_matches("./").trim_start_matches('/');
        if local.is_empty() || remote.is_empty() {
            bail!("invalid file argument '{}', expected LOCAL or LOCAL=REMOTE", arg);
        }
        Ok(FileSpec {
            local: PathBuf::from(local),
            remote: remote.to_string(),
        })
    }

    /// Read the local file into a blob.
    pub fn to_blob(&self) -> Result<Blob> {
        let content = fs::read_to_string(&self.local)
            .with_context(|| format!("failed to read '{}'", self.local.display()))?;
        Ok(Blob::file(self.remote.clone(), content))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("failed to serialize result")
}

/// Dispatch a command to the service.
pub async fn dispatch(
    command: Command,
    git: &dyn GitService,
    cancel: &CancellationToken,
) -> Result<Value> {
    match command {
        Command::Branch { repo, name } => {
            to_json(&git.find_branch(cancel, &resolve_repo(&repo), &name).await?)
        }
        Command::Branches { repo, page } => to_json(
            &git.list_branches(cancel, &resolve_repo(&repo), page.into())
                .await?,
        ),
        Command::Tag { repo, name } => {
            to_json(&git.find_tag(cancel, &resolve_repo(&repo), &name).await?)
        }
        Command::Tags { repo, page } => {
            to_json(&git.list_tags(cancel, &resolve_repo(&repo), page.into()).await?)
        }
        Command::Commit { repo, git_ref } => to_json(
            &git.find_commit(cancel, &resolve_repo(&repo), &git_ref)
                .await?,
        ),
        Command::Commits {
            repo,
            git_ref,
            path,
            page,
        } => {
            let opts = CommitListOptions {
                page: page.page,
                size: page.per_page,
                git_ref,
                path,
            };
            to_json(&git.list_commits(cancel, &resolve_repo(&repo), &opts).await?)
        }
        Command::Changes {
            repo,
            git_ref,
            page,
        } => to_json(
            &git.list_changes(cancel, &resolve_repo(&repo), &git_ref, page.into())
                .await?,
        ),
        Command::Compare {
            repo,
            source,
            target,
            page,
        } => to_json(
            &git.compare_changes(cancel, &resolve_repo(&repo), &source, &target, page.into())
                .await?,
        ),
        Command::CreateBranch { repo, name, sha } => {
            let input = ReferenceInput { name, sha };
            git.create_branch(cancel, &resolve_repo(&repo), &input)
                .await?;
            to_json(&input)
        }
        Command::CreateCommit {
            repo,
            base,
            message,
            files,
        } => {
            let blobs = files
                .iter()
                .map(|arg| FileSpec::parse(arg)?.to_blob())
                .collect::<Result<Vec<_>>>()?;
            let input = CommitInput {
                message,
                base,
                blobs,
            };
            to_json(&git.create_commit(cancel, &resolve_repo(&repo), input).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::github::GitHubGit;
    use crate::forge::ForgeError;
    use crate::transport::mock::MockTransport;
    use crate::transport::Method;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn file_spec_same_path() {
        let file = FileSpec::parse("./docs/README.md").unwrap();
        assert_eq!(file.local, PathBuf::from("./docs/README.md"));
        assert_eq!(file.remote, "docs/README.md");
    }

    #[test]
    fn file_spec_renamed() {
        let file = FileSpec::parse("out.toml=conf/app.toml").unwrap();
        assert_eq!(file.local, PathBuf::from("out.toml"));
        assert_eq!(file.remote, "conf/app.toml");
    }

    #[test]
    fn file_spec_rejects_empty_parts() {
        assert!(FileSpec::parse("=remote").is_err());
        assert!(FileSpec::parse("local=").is_err());
        assert!(FileSpec::parse("").is_err());
    }

    #[test]
    fn file_spec_reads_blob() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("notes.txt");
        fs::write(&local, "hello\n").unwrap();

        let arg = format!("{}=docs/notes.txt", local.display());
        let blob = FileSpec::parse(&arg).unwrap().to_blob().unwrap();
        assert_eq!(blob.path, "docs/notes.txt");
        assert_eq!(blob.content, "hello\n");
        assert_eq!(blob.mode, "100644");
    }

    #[test]
    fn file_spec_missing_file() {
        let file = FileSpec::parse("/definitely/not/here.txt").unwrap();
        assert!(file.to_blob().is_err());
    }

    #[tokio::test]
    async fn dispatch_tags_resolves_repo_url() {
        let mock = MockTransport::new().respond(
            Method::Get,
            "repos/octocat/hello/tags?",
            json!([{ "name": "v1.0.0", "commit": { "sha": "abc123" } }]),
        );
        let git = GitHubGit::new(Arc::new(mock.clone()));

        let out = dispatch(
            Command::Tags {
                repo: "https://github.com/octocat/hello.git".into(),
                page: PageArgs::default(),
            },
            &git,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(out[0]["name"], "v1.0.0");
        assert_eq!(out[0]["path"], "refs/tags/v1.0.0");
        assert_eq!(out[0]["sha"], "abc123");
        assert_eq!(mock.paths(), vec!["repos/octocat/hello/tags?"]);
    }

    #[tokio::test]
    async fn dispatch_propagates_forge_error() {
        let mock = MockTransport::new();
        let git = GitHubGit::new(Arc::new(mock));

        let err = dispatch(
            Command::Branch {
                repo: "octocat/hello".into(),
                name: "main".into(),
            },
            &git,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::NotFound(_))
        ));
    }
}
