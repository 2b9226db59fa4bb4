use crate::Error;

pub static API_KEY_VAR: &str = "LASTFM_API_KEY";
pub static USER_AGENT_VAR: &str = "LASTFM_USER_AGENT";

/// The two opaque strings every request needs. Loaded once at startup;
/// a missing value is fatal before any network traffic.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub user_agent: String,
}

impl Credentials {
    /// Read credentials from the environment, picking up a `.env` file first
    /// if one is present.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: require(API_KEY_VAR)?,
            user_agent: require(USER_AGENT_VAR)?,
        })
    }
}

fn require(var: &str) -> Result<String, Error> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Config(var.to_string()))
}
