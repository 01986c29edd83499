//! HTTP resolver backed by `reqwest`.

use std::net::IpAddr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{ResolutionOutcome, ResolveFuture, Resolver, ResolverConfig};

/// Causes of a failed lookup. Callers of [`Resolver::resolve`] only ever
/// see [`ResolutionOutcome::Failed`]; these exist for logs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no address")]
    MissingAddress,

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Deserialize)]
struct EchoResponse {
    ip: Option<String>,
}

/// Resolves the public address through an IP-echo HTTP endpoint.
pub struct HttpResolver {
    http: reqwest::Client,
    url: String,
}

impl HttpResolver {
    /// Builds a resolver with the configured endpoint and request timeout.
    pub fn new(config: &ResolverConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pubip/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// Returns the endpoint this resolver queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs the lookup, keeping the failure cause.
    pub async fn lookup(&self) -> Result<String, Error> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        parse_response(&body)
    }
}

impl Resolver for HttpResolver {
    fn resolve(&self) -> ResolveFuture<'_> {
        Box::pin(async move {
            match self.lookup().await {
                Ok(addr) => {
                    debug!(address = %addr, "public address resolved");
                    ResolutionOutcome::Resolved(addr)
                }
                Err(e) => {
                    warn!(url = %self.url, error = %e, "public address lookup failed");
                    ResolutionOutcome::Failed
                }
            }
        })
    }
}

/// Extracts and validates the `ip` field of an echo response body.
pub(crate) fn parse_response(body: &[u8]) -> Result<String, Error> {
    let resp: EchoResponse = serde_json::from_slice(body)?;
    let raw = resp.ip.ok_or(Error::MissingAddress)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingAddress);
    }
    let addr: IpAddr = trimmed
        .parse()
        .map_err(|_| Error::InvalidAddress(raw.clone()))?;
    Ok(addr.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a mock HTTP server that answers once with the given status and body.
    async fn mock_server(status: &str, body: &str) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/?format=json");
        let status = status.to_string();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let _ = stream.read(&mut buf).await;

                let resp = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, handle)
    }

    fn resolver_for(url: String) -> HttpResolver {
        HttpResolver::new(&ResolverConfig {
            url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn parse_ipv4() {
        assert_eq!(
            parse_response(br#"{"ip":"203.0.113.5"}"#).unwrap(),
            "203.0.113.5"
        );
    }

    #[test]
    fn parse_ipv6_and_whitespace() {
        assert_eq!(
            parse_response(br#"{"ip":"  2001:db8::1\n"}"#).unwrap(),
            "2001:db8::1"
        );
    }

    #[test]
    fn parse_missing_field() {
        assert!(matches!(
            parse_response(br#"{"address":"1.2.3.4"}"#),
            Err(Error::MissingAddress)
        ));
        assert!(matches!(
            parse_response(br#"{"ip":"   "}"#),
            Err(Error::MissingAddress)
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_response(br#"{"ip":"not-an-ip"}"#),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_response(br#"{"ip":42}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(parse_response(b"<html>"), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn resolve_success() {
        let (url, handle) = mock_server("200 OK", r#"{"ip":"203.0.113.5"}"#).await;
        let resolver = resolver_for(url);

        let outcome = resolver.resolve().await;
        assert_eq!(outcome, ResolutionOutcome::Resolved("203.0.113.5".into()));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn lookup_non_success_status() {
        let (url, handle) = mock_server("503 Service Unavailable", "busy").await;
        let resolver = resolver_for(url);

        match resolver.lookup().await {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn resolve_malformed_payload_fails() {
        let (url, handle) = mock_server("200 OK", r#"{"origin":"x"}"#).await;
        let resolver = resolver_for(url);

        assert_eq!(resolver.resolve().await, ResolutionOutcome::Failed);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn resolve_connection_refused_fails() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let resolver = resolver_for(format!("http://127.0.0.1:{port}/"));
        assert_eq!(resolver.resolve().await, ResolutionOutcome::Failed);
    }

    #[tokio::test]
    async fn resolve_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            // Accept and hold the connection without answering.
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(stream);
            }
        });

        let resolver = HttpResolver::new(&ResolverConfig {
            url: format!("http://127.0.0.1:{port}/"),
            timeout: Duration::from_millis(200),
        })
        .unwrap();

        assert!(matches!(resolver.lookup().await, Err(Error::Http(_))));
        handle.abort();
    }
}
