use std::time::Duration;

use super::{cache::CachedResponse, Gateway, LastfmRequest, LastfmResponse, ResponseCache, API_BASE_URL};
use crate::{config::Credentials, Error};

/// Minimum delay after any response that was not served from the cache.
static THROTTLE: Duration = Duration::from_millis(300);

/// HTTP client for the Last.fm web API: injects credentials, consults the
/// response cache before touching the network, and throttles fresh calls.
#[derive(Debug, Clone)]
pub struct LastfmClient {
    http: reqwest::Client,
    credentials: Credentials,
    cache: ResponseCache,
}

impl LastfmClient {
    pub fn new(credentials: Credentials, cache: ResponseCache) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(&credentials.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            credentials,
            cache,
        })
    }

    /// Cached responses carry no delay; everything else waits out the
    /// provider's informal rate limit.
    fn throttle_after(from_cache: bool) -> Option<Duration> {
        (!from_cache).then_some(THROTTLE)
    }
}

impl Gateway for LastfmClient {
    async fn get(&self, request: LastfmRequest) -> Result<LastfmResponse, Error> {
        let signature = request.signature()?;

        if let Some(hit) = self.cache.load(&signature) {
            log::debug!("cache hit for {signature}");
            return Ok(LastfmResponse {
                status: hit.status,
                body: hit.body,
                from_cache: true,
            });
        }

        let url = format!("{}?{}", API_BASE_URL, request.query(&self.credentials.api_key)?);
        let response = LastfmResponse::from_response(self.http.get(url).send().await?).await?;

        self.cache.store(
            &signature,
            &CachedResponse {
                status: response.status,
                body: response.body.clone(),
            },
        );

        if let Some(delay) = Self::throttle_after(response.from_cache) {
            tokio::time::sleep(delay).await;
        }

        Ok(response)
    }
}
