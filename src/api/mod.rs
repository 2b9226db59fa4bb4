pub mod cache;
mod client;
pub mod response;

use std::collections::BTreeMap;

pub use cache::ResponseCache;
pub use client::LastfmClient;

use crate::Error;

pub(crate) static API_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Provider cap on `limit` for chart methods.
pub static MAX_PAGE_SIZE: usize = 500;

/// One GET against the Last.fm API, identified by its `method` query
/// parameter plus any method-specific parameters.
///
/// `api_key` and `format=json` are injected at send time and are not part of
/// the request's cache signature.
#[derive(Debug, Clone, PartialEq)]
pub struct LastfmRequest {
    pub method: String,
    pub params: BTreeMap<String, String>,
}

impl LastfmRequest {
    pub fn new<S: AsRef<str>>(method: S) -> Self {
        Self {
            method: method.as_ref().to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn param<K: AsRef<str>, V: IntoLastfmParam>(mut self, key: K, value: V) -> Self {
        if let Some(value) = value.into_lastfm_param() {
            self.params.insert(key.as_ref().to_string(), value);
        }
        self
    }

    /// Credential-free canonical form, used as the cache key. Parameters are
    /// ordered so that equivalent requests always produce the same signature.
    pub fn signature(&self) -> Result<String, Error> {
        let mut params = self.params.clone();
        params.insert("method".to_string(), self.method.clone());
        Ok(serde_urlencoded::to_string(params)?)
    }

    /// Full query string with the api key and response format attached.
    pub fn query(&self, api_key: &str) -> Result<String, Error> {
        let mut params = self.params.clone();
        params.insert("method".to_string(), self.method.clone());
        params.insert("api_key".to_string(), api_key.to_string());
        params.insert("format".to_string(), "json".to_string());
        Ok(serde_urlencoded::to_string(params)?)
    }
}

#[derive(Debug, Clone)]
pub struct LastfmResponse {
    pub status: u16,
    pub body: String,
    pub from_cache: bool,
}

impl LastfmResponse {
    /// Collapses a transport response into either a success body or a typed
    /// error. Last.fm reports failures as `{"error": n, "message": "..."}`,
    /// usually with an HTTP status to match; both shapes end up as
    /// [`Error::Request`].
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status().as_u16();
        let body = String::from_utf8(response.bytes().await?.to_vec())
            .map_err(|e| Error::Parse(e.to_string()))?;

        if (200..300).contains(&status) && !body.is_empty() {
            // A 200 carrying the provider's error envelope is still a failure.
            if let Some(error) = ErrorEnvelope::read(&body) {
                return Err(error);
            }
            return Ok(Self {
                status,
                body,
                from_cache: false,
            });
        }

        Err(ErrorEnvelope::read(&body).unwrap_or(Error::Request {
            code: status,
            message: "failed to make lastfm request".to_string(),
        }))
    }
}

struct ErrorEnvelope;

impl ErrorEnvelope {
    fn read(body: &str) -> Option<Error> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let code = value.get("error")?.as_u64()? as u16;
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown lastfm error")
            .to_string();
        Some(Error::Request { code, message })
    }
}

/// The one capability the fetcher and enricher need from the transport layer.
/// [`LastfmClient`] is the real implementation; tests substitute fakes.
pub trait Gateway {
    fn get(
        &self,
        request: LastfmRequest,
    ) -> impl std::future::Future<Output = Result<LastfmResponse, Error>> + Send;
}

pub trait IntoLastfmParam {
    fn into_lastfm_param(self) -> Option<String>;
}

impl IntoLastfmParam for Option<()> {
    fn into_lastfm_param(self) -> Option<String> {
        self.map(|_| String::new())
    }
}

macro_rules! impl_into_lastfm_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoLastfmParam for $ty {
                fn into_lastfm_param(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    }
}

macro_rules! impl_into_lastfm_param_with_ref {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoLastfmParam for $ty {
                fn into_lastfm_param(self) -> Option<String> {
                    Some(self.to_string())
                }
            }

            impl IntoLastfmParam for &$ty {
                fn into_lastfm_param(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    }
}

impl_into_lastfm_param!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize, bool, &str);
impl_into_lastfm_param_with_ref!(String);

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::{Gateway, LastfmRequest, LastfmResponse};
    use crate::Error;

    /// Replays a scripted sequence of responses and records every request.
    pub(crate) struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<LastfmResponse, Error>>>,
        pub requests: Mutex<Vec<LastfmRequest>>,
    }

    impl ScriptedGateway {
        pub(crate) fn new<I>(responses: I) -> Self
        where
            I: IntoIterator<Item = Result<LastfmResponse, Error>>,
        {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn ok(body: &str) -> Result<LastfmResponse, Error> {
            Ok(LastfmResponse {
                status: 200,
                body: body.to_string(),
                from_cache: false,
            })
        }

        pub(crate) fn failure() -> Result<LastfmResponse, Error> {
            Err(Error::Request {
                code: 503,
                message: "service offline".to_string(),
            })
        }
    }

    impl Gateway for ScriptedGateway {
        async fn get(&self, request: LastfmRequest) -> Result<LastfmResponse, Error> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(ScriptedGateway::failure)
        }
    }
}
