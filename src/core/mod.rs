//! core
//!
//! Provider-neutral domain types, ref name handling and configuration.
//!
//! # Modules
//!
//! - [`types`] - Reference, Commit, Change, Blob and request/option types
//! - [`refs`] - Fully qualified ref name codec (`refs/heads/...`)
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Nothing here knows about HTTP or any provider's wire format
//! - Schemas are strict and self-describing

pub mod config;
pub mod refs;
pub mod types;
