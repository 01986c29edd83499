//! Public address resolution.
//!
//! A single outbound GET to an IP-echo service that answers with a JSON
//! body such as `{"ip":"203.0.113.5"}`. Every failure collapses into
//! [`ResolutionOutcome::Failed`]; the underlying cause is only logged.

pub mod client;
pub mod types;

pub use client::{Error, HttpResolver};
pub use types::{DEFAULT_SERVICE_URL, ResolutionOutcome, ResolveFuture, Resolver, ResolverConfig};
