use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{ScrubError, ScrubResult};

/// Source of encoded frame bytes.
///
/// Implementations are called concurrently from the preload pool, one call per frame, and must
/// not assume any completion order.
pub trait FrameFetcher: Send + Sync {
    /// Fetch the encoded bytes stored at `location`.
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>>;
}

/// Return `true` for locations that need a network-capable fetcher.
pub fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetcher for locally bundled frames.
///
/// Relative locations resolve against `root`; absolute paths and `file://` URLs are used as-is.
/// Remote locations are rejected; pair with an [`HttpFrameFetcher`](crate::HttpFrameFetcher)
/// through a [`RoutingFrameFetcher`](crate::RoutingFrameFetcher).
#[derive(Clone, Debug)]
pub struct FsFrameFetcher {
    root: PathBuf,
}

impl FsFrameFetcher {
    /// Create a fetcher resolving relative locations against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory used for relative locations.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a location to a filesystem path.
    pub fn resolve(&self, location: &str) -> ScrubResult<PathBuf> {
        if is_remote_location(location) {
            return Err(ScrubError::asset(format!(
                "remote location '{location}' requires a network-capable fetcher"
            )));
        }
        if let Some(stripped) = location.strip_prefix("file://") {
            return Ok(PathBuf::from(stripped));
        }
        let p = Path::new(location);
        if p.is_absolute() {
            return Ok(p.to_path_buf());
        }
        Ok(self.root.join(p))
    }
}

impl FrameFetcher for FsFrameFetcher {
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>> {
        let path = self.resolve(location)?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Fetcher over bytes held in memory, keyed by location.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameFetcher {
    frames: HashMap<String, Vec<u8>>,
}

impl MemoryFrameFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `location`, replacing any previous entry.
    pub fn insert(&mut self, location: impl Into<String>, bytes: Vec<u8>) {
        self.frames.insert(location.into(), bytes);
    }

    /// Number of stored locations.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameFetcher for MemoryFrameFetcher {
    fn fetch(&self, location: &str) -> ScrubResult<Vec<u8>> {
        self.frames
            .get(location)
            .cloned()
            .ok_or_else(|| ScrubError::asset(format!("no frame stored at '{location}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
