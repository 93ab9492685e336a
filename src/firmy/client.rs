//! HTTP client for firmy.cz using wreq for browser TLS emulation.

use crate::config::Config;
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Raw response from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl Page {
    /// Only a plain 200 counts as a usable page.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for fetching directory pages - enables mocking for tests.
#[async_trait]
pub trait DirectoryFetch: Send + Sync {
    /// Issues a GET request. Error statuses are returned as a [`Page`];
    /// only transport failures are errors.
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;

    /// Root URL of the directory, without a trailing slash.
    fn base_url(&self) -> &str;
}

/// firmy.cz HTTP client. One instance is reused for every request of a run.
///
/// TLS and header fingerprints come from the Chrome 131 emulation profile.
/// The configured `User-Agent` replaces the profile's own on every request.
pub struct FirmyClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl FirmyClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .emulation(Emulation::Chrome131)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).map_err(|source| FetchError::Setup { source })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|source| FetchError::Setup { source })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl DirectoryFetch for FirmyClient {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Body { url: url.to_string(), source })?;

        Ok(Page { status, body })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
