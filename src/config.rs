use std::env;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the default transport and the bundled
/// integrations. Values are sourced from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_url: Option<String>,
    pub yelp_api_token: Option<String>,
    pub yelp_api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tmdb_api_key: None,
            tmdb_api_url: None,
            yelp_api_token: None,
            yelp_api_url: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("apikit/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - APIKIT_HTTP_TIMEOUT_SECS (default: 30)
    /// - APIKIT_USER_AGENT (default: apikit/<version>)
    /// - TMDB_API_KEY, TMDB_API_URL (default: production url)
    /// - YELP_API_TOKEN, YELP_API_URL (default: v3 url)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("APIKIT_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("Invalid APIKIT_HTTP_TIMEOUT_SECS: {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let user_agent = get("APIKIT_USER_AGENT").unwrap_or_else(default_user_agent);

        Ok(Self {
            user_agent,
            timeout_secs,
            tmdb_api_key: get("TMDB_API_KEY"),
            tmdb_api_url: get("TMDB_API_URL"),
            yelp_api_token: get("YELP_API_TOKEN"),
            yelp_api_url: get("YELP_API_URL"),
        })
    }
}
