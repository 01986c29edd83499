//! Resolver trait, outcome and configuration types.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// IP-echo endpoint queried when no other URL is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://api.ipify.org?format=json";

/// Result of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The service reported this public address.
    Resolved(String),
    /// Network error, non-success status, or malformed payload.
    Failed,
}

/// A boxed future returned by [`Resolver::resolve`].
pub type ResolveFuture<'a> = Pin<Box<dyn Future<Output = ResolutionOutcome> + Send + 'a>>;

/// Performs one public address lookup per call.
///
/// Implementations never retry and never panic on network errors: exactly
/// one outcome is produced per invocation.
pub trait Resolver: Send + Sync + 'static {
    fn resolve(&self) -> ResolveFuture<'_>;
}

/// Configuration for [`crate::HttpResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Endpoint returning `{"ip": "..."}`.
    pub url: String,
    /// Upper bound for the whole request, connect included.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.into(),
            timeout: Duration::from_secs(10),
        }
    }
}
