//! Embeddable core library for bundlefix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a larger build-automation host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`GraphSource`](ports::GraphSource) — load a build-graph snapshot
//! - [`WritePort`](ports::WritePort) — write files and create directories
//!
//! The [`adapters`] module provides default filesystem-backed
//! implementations.
//!
//! # Entry points
//!
//! - [`run_resolve`](pipeline::run_resolve) — resolve a graph into an
//!   assignment + report
//! - [`run_check`](pipeline::run_check) — re-validate an existing
//!   assignment without allocating

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the domain surface so embedders don't need bundlefix-domain
// directly.
pub use bundlefix_domain::{ResolveError, Resolver, ResolverConfig};
