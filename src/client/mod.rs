//! HTTP client for the remote download API.
//!
//! One request per user action: `GET <base>/<platform-path>?url=<link>`,
//! answered with a JSON envelope. No retries, no request timeout beyond the
//! transport's own defaults, no cancellation — the call resolves or rejects
//! exactly once. Failure classification follows the envelope contract
//! ([`ResponseEnvelope::indicates_failure`]); the successful envelope is
//! returned unmodified for [`crate::media`] to interpret.

mod envelope;
mod error;

pub use envelope::ResponseEnvelope;
pub use error::ClientError;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::platform::Platform;

/// Production base URL of the download API.
pub const DEFAULT_API_BASE: &str = "https://api.nvidiabotz.xyz/download";

/// User-Agent sent with API requests.
const USER_AGENT: &str = concat!("snaplink/", env!("CARGO_PKG_VERSION"));

/// One media fetch, constructed per user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// The submitted (already validated, trimmed) link.
    pub url: String,
    /// The platform the link belongs to.
    pub platform: Platform,
}

impl DownloadRequest {
    /// Creates a request for `url` on `platform`.
    #[must_use]
    pub fn new(url: impl Into<String>, platform: Platform) -> Self {
        Self {
            url: url.into(),
            platform,
        }
    }
}

/// Source of media envelopes.
///
/// Implemented by [`MediaClient`] for the real API; the orchestrator takes a
/// `dyn MediaFetcher` so tests can drive it with a scripted fake.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetches the media envelope for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success HTTP status,
    /// unreadable body, or an envelope that signals failure.
    async fn fetch_media(&self, request: &DownloadRequest)
    -> Result<ResponseEnvelope, ClientError>;
}

/// HTTP client for the download API.
///
/// Created once and reused; connection pooling lives in the inner
/// `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct MediaClient {
    client: Client,
    base_url: String,
}

impl MediaClient {
    /// Creates a client against the production API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base URL (self-hosted API
    /// deployments, wiremock in tests).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
        }
    }

    /// Builds the full API request URL for one download request.
    fn api_url(&self, request: &DownloadRequest) -> String {
        format!(
            "{}/{}?url={}",
            self.base_url,
            request.platform.api_path(),
            urlencoding::encode(&request.url)
        )
    }
}

impl Default for MediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaFetcher for MediaClient {
    #[instrument(skip(self), fields(platform = %request.platform, url = %request.url))]
    async fn fetch_media(
        &self,
        request: &DownloadRequest,
    ) -> Result<ResponseEnvelope, ClientError> {
        let api_url = self.api_url(request);
        debug!(api_url = %api_url, "calling download API");

        let response = self
            .client
            .get(&api_url)
            .send()
            .await
            .map_err(|e| ClientError::network(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "download API request failed");
            return Err(ClientError::http_status(&request.url, status.as_u16()));
        }

        let envelope: ResponseEnvelope = response
            .json()
            .await
            .map_err(|e| ClientError::decode(&request.url, e))?;

        if envelope.indicates_failure() {
            let message = envelope.message().map_or_else(
                || format!("Failed to fetch data from {}.", request.platform),
                str::to_string,
            );
            warn!(message = %message, "download API signalled failure");
            return Err(ClientError::api(message));
        }

        debug!("download API returned a success envelope");
        Ok(envelope)
    }
}

fn trim_trailing_slash(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
