//! forge
//!
//! Provider-neutral git object operations and their GitHub implementation.
//!
//! # Architecture
//!
//! The [`GitService`] trait defines branch, tag, commit and diff operations
//! in terms of the neutral model in [`crate::core::types`]. Callers build a
//! service with [`create_git_service`] rather than naming a provider type.
//!
//! # Modules
//!
//! - `traits`: `GitService` trait and `ForgeError`
//! - [`github`]: GitHub REST implementation
//! - `factory`: service construction from configuration
//!
//! # Example
//!
//! ```ignore
//! use forgegit::core::config::Config;
//! use forgegit::forge::{create_git_service, GitService};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = Config::load()?;
//! let git = create_git_service(&config);
//!
//! let cancel = CancellationToken::new();
//! let tags = git.list_tags(&cancel, "octocat/hello-world", Default::default()).await?;
//! for tag in tags {
//!     println!("{} {}", tag.name, tag.sha);
//! }
//! ```

mod factory;
pub mod github;
mod traits;

pub use factory::{create_git_service, create_transport, resolve_repo};
pub use traits::*;
