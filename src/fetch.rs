//! Archive download: one GET, no retry, no backoff.

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use tracing::debug;

use crate::cache::ARCHIVE_FILENAME;

const USER_AGENT: &str = concat!("bestchange/", env!("CARGO_PKG_VERSION"));

/// Downloads the feed archive from `<base_url>/info.zip`. A non-success
/// status or transport failure fails the whole load; the caller re-`load`s
/// when it wants another attempt.
pub(crate) async fn download(base_url: &str) -> Result<Bytes> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), ARCHIVE_FILENAME);
    debug!("Downloading feed archive from {}", url);

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to request feed archive from {url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Feed server answered {status} for {url}"));
    }

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read feed archive body from {url}"))?;
    debug!(size = body.len(), "downloaded feed archive");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_sends_user_agent_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info.zip"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip bytes".to_vec()))
            .mount(&server)
            .await;

        let body = download(&server.uri()).await.unwrap();
        assert_eq!(body.as_ref(), b"zip bytes");
    }

    #[tokio::test]
    async fn test_download_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info.zip"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = download(&server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        // Exactly one attempt, no retry.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_download_fails_on_connection_refused() {
        // Nothing listens on this port once the server is dropped.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        assert!(download(&uri).await.is_err());
    }
}
