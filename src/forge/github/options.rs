//! forge::github::options
//!
//! Query-string encoding for listing endpoints.
//!
//! Zero and empty values are left out so GitHub applies its own defaults.
//! Keys are emitted in sorted order.

use url::form_urlencoded::Serializer;

use crate::core::types::{CommitListOptions, ListOptions};

pub(crate) fn encode_list_options(opts: ListOptions) -> String {
    let mut params = Serializer::new(String::new());
    if opts.page != 0 {
        params.append_pair("page", &opts.page.to_string());
    }
    if opts.size != 0 {
        params.append_pair("per_page", &opts.size.to_string());
    }
    params.finish()
}

pub(crate) fn encode_commit_list_options(opts: &CommitListOptions) -> String {
    let mut params = Serializer::new(String::new());
    if opts.page != 0 {
        params.append_pair("page", &opts.page.to_string());
    }
    if !opts.path.is_empty() {
        params.append_pair("path", &opts.path);
    }
    if opts.size != 0 {
        params.append_pair("per_page", &opts.size.to_string());
    }
    if !opts.git_ref.is_empty() {
        params.append_pair("sha", &opts.git_ref);
    }
    params.finish()
}
