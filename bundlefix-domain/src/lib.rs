//! Domain logic: turn a build-graph snapshot into a deterministic bundle
//! identifier assignment.
//!
//! This crate owns *which* identifier every target gets and why. It does not
//! own how snapshots are read or assignments persisted; that's the
//! `bundlefix-core` ports.

mod allocate;
mod classify;
mod embedding;
mod error;
mod resolver;
mod sanitize;
mod validate;

pub use allocate::{ClassifiedTarget, MAX_SUFFIX_ATTEMPTS, allocate};
pub use classify::Classifier;
pub use embedding::check_embedding;
pub use error::ResolveError;
pub use resolver::{Resolution, Resolver, ResolverConfig};
pub use sanitize::{FALLBACK_FRAGMENT, sanitize_fragment};
pub use validate::{MAX_IDENTIFIER_LEN, check_identifier, validate_entries};
