//! forge::factory
//!
//! Git service construction.
//!
//! # Design
//!
//! Commands call [`create_git_service`] with the loaded configuration and
//! get back a trait object. They never name `HttpTransport` or `GitHubGit`
//! directly, which keeps the transport swappable (tests inject a
//! `MockTransport` through [`GitHubGit::new`] instead).

use std::sync::Arc;

use super::github::{parse_github_url, GitHubGit};
use super::traits::GitService;
use crate::core::config::Config;
use crate::transport::http::HttpTransport;
use crate::transport::Transport;

/// Build the HTTP transport described by `config`.
pub fn create_transport(config: &Config) -> Arc<dyn Transport> {
    let transport = HttpTransport::new(config.token().map(str::to_string))
        .with_api_base(config.api_base())
        .with_user_agent(config.user_agent());
    Arc::new(transport)
}

/// Build a git service over the HTTP transport described by `config`.
///
/// # Example
///
/// ```
/// use forgegit::core::config::Config;
/// use forgegit::forge::{create_git_service, GitService};
///
/// let git = create_git_service(&Config::default());
/// assert_eq!(git.name(), "github");
/// ```
pub fn create_git_service(config: &Config) -> Arc<dyn GitService> {
    Arc::new(GitHubGit::new(create_transport(config)))
}

/// Normalize a repository argument to `owner/repo`.
///
/// Accepts either an `owner/repo` identifier or a GitHub remote URL.
/// Anything else is returned unchanged.
///
/// # Example
///
/// ```
/// use forgegit::forge::resolve_repo;
///
/// assert_eq!(resolve_repo("git@github.com:octocat/hello-world.git"), "octocat/hello-world");
/// assert_eq!(resolve_repo("octocat/hello-world"), "octocat/hello-world");
/// ```
pub fn resolve_repo(repo: &str) -> String {
    parse_github_url(repo).unwrap_or_else(|| repo.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_service_from_default_config() {
        let git = create_git_service(&Config::default());
        assert_eq!(git.name(), "github");
    }

    #[test]
    fn resolve_repo_url_forms() {
        assert_eq!(
            resolve_repo("https://github.com/octocat/hello-world.git"),
            "octocat/hello-world"
        );
        assert_eq!(resolve_repo("octocat/hello-world"), "octocat/hello-world");
        assert_eq!(resolve_repo("just-a-name"), "just-a-name");
    }
}
