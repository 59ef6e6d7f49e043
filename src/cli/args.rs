//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--config <path>`: Read this config file instead of searching
//! - `--api-base <url>`: Override the API root

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// forgegit - Inspect and write git objects through the GitHub REST API
#[derive(Parser, Debug)]
#[command(name = "forgegit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to load (skips the default search path)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API root URL, e.g. https://github.example.com/api/v3
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Paging flags shared by the list commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Page number (1-based; omitted when 0)
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Results per page (omitted when 0)
    #[arg(long, default_value_t = 0)]
    pub per_page: u32,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a single branch
    Branch {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Branch name
        name: String,
    },

    /// List branches
    Branches {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a single tag
    Tag {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Tag name
        name: String,
    },

    /// List tags
    Tags {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a commit by sha, branch or tag
    Commit {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Commit sha or ref name
        #[arg(value_name = "REF")]
        git_ref: String,
    },

    /// List commits
    Commits {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Start listing from this sha or branch
        #[arg(long = "ref", value_name = "REF", default_value = "")]
        git_ref: String,
        /// Only commits touching this path
        #[arg(long, default_value = "")]
        path: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List files changed by a commit
    Changes {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Commit sha or ref name
        #[arg(value_name = "REF")]
        git_ref: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List files changed between two refs
    Compare {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Base ref
        source: String,
        /// Head ref
        target: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Create a branch pointing at a commit
    #[command(name = "create-branch")]
    CreateBranch {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Branch name (short or fully qualified)
        name: String,
        /// Commit sha the branch points at
        sha: String,
    },

    /// Commit local files on top of a base commit
    #[command(
        name = "create-commit",
        after_help = "\
EXAMPLES:
    # Commit README.md at the same path
    forgegit create-commit octocat/hello --base 7638417 -m 'Update docs' README.md

    # Commit a local file under a different remote path
    forgegit create-commit octocat/hello --base 7638417 -m 'Add config' ./out.toml=conf/app.toml

NOTES:
    The commit is not attached to any branch. Point a branch at the printed
    sha with create-branch."
    )]
    CreateCommit {
        /// Repository as owner/repo or a GitHub URL
        repo: String,
        /// Parent commit sha
        #[arg(long)]
        base: String,
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Files as LOCAL or LOCAL=REMOTE
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },
}
