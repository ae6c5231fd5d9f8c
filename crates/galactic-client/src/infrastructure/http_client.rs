//! HTTP transport to a `galactic-server`.
//!
//! Requests and successful responses carry `application/octet-stream`
//! GalacticBuf bodies.  A non-2xx reply becomes an error whose message is
//! the status line plus the server's plain-text explanation.

use anyhow::{bail, Context};
use galactic_core::{encode_message, Object};
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request, Uri};
use tracing::debug;

const OCTET_STREAM: &str = "application/octet-stream";

/// Client bound to one server base URL, e.g. `http://127.0.0.1:3000`.
#[derive(Debug, Clone)]
pub struct GalacticHttpClient {
    client: Client<HttpConnector>,
    base: String,
}

impl GalacticHttpClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute `http://` URL.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        let uri: Uri = base
            .parse()
            .with_context(|| format!("invalid server URL: '{base_url}'"))?;
        if uri.scheme_str() != Some("http") || uri.authority().is_none() {
            bail!("server URL must look like http://host:port, got '{base_url}'");
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    /// Full URI for `path` on this server.
    pub fn uri(&self, path: &str) -> anyhow::Result<Uri> {
        let url = format!("{}{}", self.base, path);
        url.parse()
            .with_context(|| format!("invalid request URL: '{url}'"))
    }

    /// `GET path`, returning the raw response body.
    pub async fn get(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        self.send(Method::GET, path, Body::empty()).await
    }

    /// `POST path` with `message` encoded as the body.
    pub async fn post(&self, path: &str, message: &Object) -> anyhow::Result<Vec<u8>> {
        let body = encode_message(message).context("failed to encode request message")?;
        self.send(Method::POST, path, Body::from(body)).await
    }

    async fn send(&self, method: Method, path: &str, body: Body) -> anyhow::Result<Vec<u8>> {
        let uri = self.uri(path)?;
        debug!(%method, %uri, "sending request");
        let req = Request::builder()
            .method(method)
            .uri(uri.clone())
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(body)
            .context("failed to build request")?;

        let resp = self
            .client
            .request(req)
            .await
            .with_context(|| format!("request to {uri} failed"))?;
        let status = resp.status();
        let bytes = hyper::body::to_bytes(resp.into_body())
            .await
            .with_context(|| format!("failed to read response from {uri}"))?;
        debug!(status = status.as_u16(), len = bytes.len(), "response received");

        if !status.is_success() {
            bail!(
                "server returned {status}: {}",
                String::from_utf8_lossy(&bytes).trim()
            );
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = GalacticHttpClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(
            client.uri("/trades").unwrap().to_string(),
            "http://127.0.0.1:3000/trades"
        );
    }

    #[test]
    fn test_new_rejects_https() {
        assert!(GalacticHttpClient::new("https://example.com").is_err());
    }

    #[test]
    fn test_new_rejects_relative_url() {
        assert!(GalacticHttpClient::new("/trades").is_err());
    }
}
