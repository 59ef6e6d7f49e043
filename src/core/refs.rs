//! core::refs
//!
//! Reference name codec.
//!
//! Providers disagree on whether branch and tag listings carry short names
//! (`main`) or fully qualified paths (`refs/heads/main`). Everything that
//! leaves the forge layer is canonicalized here, so downstream code only ever
//! sees one representation.
//!
//! All functions are pure string operations and never fail.

/// Namespace for branch refs.
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Namespace for tag refs.
pub const TAG_PREFIX: &str = "refs/tags/";

/// Expand a short ref name into a fully qualified path.
///
/// Names that already start with `refs/` are returned unchanged. The prefix
/// may be given with or without its trailing slash.
///
/// # Example
///
/// ```
/// use forgegit::core::refs::expand_ref;
///
/// assert_eq!(expand_ref("main", "refs/heads"), "refs/heads/main");
/// assert_eq!(expand_ref("main", "refs/heads/"), "refs/heads/main");
/// assert_eq!(expand_ref("refs/tags/v1", "refs/heads"), "refs/tags/v1");
/// ```
pub fn expand_ref(name: &str, prefix: &str) -> String {
    if name.starts_with("refs/") {
        return name.to_string();
    }
    let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
    format!("{}/{}", prefix, name)
}

/// Strip the branch or tag namespace from a ref path.
///
/// Paths outside those namespaces are returned unchanged.
///
/// # Example
///
/// ```
/// use forgegit::core::refs::trim_ref;
///
/// assert_eq!(trim_ref("refs/heads/main"), "main");
/// assert_eq!(trim_ref("refs/tags/v1.0"), "v1.0");
/// assert_eq!(trim_ref("feature/x"), "feature/x");
/// ```
pub fn trim_ref(path: &str) -> &str {
    path.strip_prefix(BRANCH_PREFIX)
        .or_else(|| path.strip_prefix(TAG_PREFIX))
        .unwrap_or(path)
}

/// Split an `owner/repo` identifier on its first separator.
///
/// Without a separator the owner is empty and the whole input is taken as
/// the repository name. That is a caller error; it is not reported here and
/// surfaces later as a failed remote call.
///
/// # Example
///
/// ```
/// use forgegit::core::refs::split;
///
/// assert_eq!(split("octocat/hello-world"), ("octocat", "hello-world"));
/// assert_eq!(split("hello-world"), ("", "hello-world"));
/// ```
pub fn split(identifier: &str) -> (&str, &str) {
    match identifier.split_once('/') {
        Some((owner, repo)) => (owner, repo),
        None => ("", identifier),
    }
}

/// Join an owner and repository name into an `owner/repo` identifier.
pub fn join(owner: &str, repo: &str) -> String {
    format!("{}/{}", owner, repo)
}

/// Whether the path lives in the branch namespace.
pub fn is_branch(path: &str) -> bool {
    path.starts_with(BRANCH_PREFIX)
}

/// Whether the path lives in the tag namespace.
pub fn is_tag(path: &str) -> bool {
    path.starts_with(TAG_PREFIX)
}
