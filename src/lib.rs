//! forgegit - A normalized git object model over the GitHub REST API
//!
//! forgegit reads and writes branches, tags, commits and file changes through
//! GitHub's REST endpoints and hands them back as provider-neutral values.
//!
//! # Architecture
//!
//! The codebase is layered, each layer depending only on the ones below it:
//!
//! - [`cli`] - Command-line interface (parses args, prints JSON)
//! - [`forge`] - The `GitService` trait and its GitHub implementation
//! - [`transport`] - Request execution over HTTP, or scripted for tests
//! - [`core`] - Neutral types, ref name handling and configuration
//!
//! # Invariants
//!
//! 1. Every operation takes a cancellation token and stops at the next await
//!    point once it fires
//! 2. Provider wire records never escape the `forge` layer
//! 3. Commit creation never sends the commit request if the tree request failed

pub mod cli;
pub mod core;
pub mod forge;
pub mod transport;
