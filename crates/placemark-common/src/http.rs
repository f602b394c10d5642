//! Outbound HTTP for geocoders. Requests only go to hosts on the client's
//! allowlist; a host also covers its subdomains.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, RequestBuilder};
use url::Url;

use crate::error::PlacemarkError;

/// Hosts allowed before any configuration is applied.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["maps.googleapis.com", "localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
pub struct HostAllowlistClient {
    client: Client,
    hosts: HashSet<String>,
}

impl HostAllowlistClient {
    pub fn new() -> Result<Self, PlacemarkError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, PlacemarkError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("placemark/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlacemarkError::Client(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        })
    }

    /// Allow `host` and its subdomains. Case is ignored.
    pub fn allow_host(&mut self, host: &str) {
        self.hosts.insert(host.to_ascii_lowercase());
    }

    fn host_allowed(&self, host: &str) -> bool {
        self.hosts.iter().any(|allowed| {
            host == allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// False for unparsable URLs and URLs without a host.
    pub fn permits(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .is_some_and(|host| self.host_allowed(&host))
    }

    pub fn get(&self, url: &str) -> Result<RequestBuilder, PlacemarkError> {
        if !self.permits(url) {
            return Err(PlacemarkError::HostNotAllowed(url.to_string()));
        }
        Ok(self.client.get(url))
    }
}
