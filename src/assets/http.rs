use std::time::Duration;

use crate::{
    assets::fetch::{FrameFetcher, FsFrameFetcher, is_remote_location},
    foundation::error::{ScrubError, ScrubResult},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetcher for externally hosted frames (`http://` and `https://` locations).
///
/// Uses a blocking client, so each preload worker waits on its own request. Transport errors
/// and non-2xx responses surface as [`ScrubError::Asset`], which preload records as a missing
/// frame.
#[derive(Clone, Debug)]
pub struct HttpFrameFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFrameFetcher {
    /// Fetcher with a 30 second per-request timeout.
    pub fn new() -> ScrubResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Fetcher with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> ScrubResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrubError::asset(format!("build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl FrameFetcher for HttpFrameFetcher {
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>> {
        if !is_remote_location(location) {
            return Err(ScrubError::asset(format!(
                "'{location}' is not an http(s) location"
            )));
        }
        let resp = self
            .client
            .get(location)
            .send()
            .map_err(|e| ScrubError::asset(format!("request frame '{location}': {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrubError::asset(format!(
                "frame '{location}' returned HTTP status {}",
                status.as_u16()
            )));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| ScrubError::asset(format!("read frame body '{location}': {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Dispatches remote locations to one fetcher and everything else to another.
pub struct RoutingFrameFetcher {
    local: Box<dyn FrameFetcher>,
    remote: Box<dyn FrameFetcher>,
}

impl RoutingFrameFetcher {
    /// Route `http(s)://` locations to `remote` and the rest to `local`.
    pub fn new(local: impl FrameFetcher + 'static, remote: impl FrameFetcher + 'static) -> Self {
        Self {
            local: Box::new(local),
            remote: Box::new(remote),
        }
    }

    /// Filesystem fetcher rooted at `root` plus an HTTP fetcher with default settings.
    pub fn fs_and_http(root: impl Into<std::path::PathBuf>) -> ScrubResult<Self> {
        Ok(Self::new(FsFrameFetcher::new(root), HttpFrameFetcher::new()?))
    }
}

impl FrameFetcher for RoutingFrameFetcher {
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>> {
        if is_remote_location(location) {
            self.remote.fetch(location)
        } else {
            self.local.fetch(location)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/http.rs"]
mod tests;
