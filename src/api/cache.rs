use std::path::PathBuf;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

lazy_static! {
    static ref DEFAULT_CACHE_DIR: PathBuf = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lastchart");
}

/// One cached provider response. Only successful responses are stored, so a
/// hit can be replayed without re-checking the error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: String,
}

/// Read-through disk cache for Last.fm responses, keyed by the request's
/// credential-free signature.
///
/// Cache trouble is never allowed to fail a request: a broken read degrades
/// to a network call, a broken write is logged and dropped.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    root: PathBuf,
    bypass_reads: bool,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR.clone())
    }
}

impl ResponseCache {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            bypass_reads: false,
        }
    }

    /// Skip lookups while still recording fresh responses.
    pub fn bypass_reads(mut self, bypass: bool) -> Self {
        self.bypass_reads = bypass;
        self
    }

    fn entry_path(&self, signature: &str) -> PathBuf {
        let digest = Sha256::digest(signature.as_bytes());
        let mut name = String::with_capacity(digest.len() * 2);
        for byte in digest {
            name.push_str(&format!("{byte:02x}"));
        }
        self.root.join(format!("{name}.json"))
    }

    pub fn load(&self, signature: &str) -> Option<CachedResponse> {
        if self.bypass_reads {
            return None;
        }

        let path = self.entry_path(signature);
        let body = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&body) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("discarding unreadable cache entry {}: {e}", path.display());
                None
            }
        }
    }

    pub fn store(&self, signature: &str, entry: &CachedResponse) {
        if let Err(e) = self.try_store(signature, entry) {
            log::debug!("failed to cache response: {e}");
        }
    }

    fn try_store(&self, signature: &str, entry: &CachedResponse) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string(entry)?;
        std::fs::write(self.entry_path(signature), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CachedResponse {
        CachedResponse {
            status: 200,
            body: r#"{"artists":{"artist":[]}}"#.to_string(),
        }
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());

        assert!(cache.load("method=chart.gettopartists").is_none());
        cache.store("method=chart.gettopartists", &entry());

        let hit = cache.load("method=chart.gettopartists").unwrap();
        assert_eq!(hit.status, 200);
        assert_eq!(hit.body, entry().body);
    }

    #[test]
    fn distinct_signatures_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());

        cache.store("artist=Cher&method=artist.getTopTags", &entry());
        assert!(cache.load("artist=Blur&method=artist.getTopTags").is_none());
    }

    #[test]
    fn bypass_skips_reads_but_still_writes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path()).bypass_reads(true);

        cache.store("method=chart.gettopartists", &entry());
        assert!(cache.load("method=chart.gettopartists").is_none());

        let reading = ResponseCache::new(dir.path());
        assert!(reading.load("method=chart.gettopartists").is_some());
    }
}
