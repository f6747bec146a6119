use std::time::Duration;

use reqwest::Url;

use crate::core::SolariaError;

/// API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:4003";
/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "SOLARIA_API_URL";
/// Environment variable holding the request timeout in whole seconds.
pub const API_TIMEOUT_ENV: &str = "SOLARIA_API_TIMEOUT_SECS";

/// Connection settings for the Solaria API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// Parse an `http`/`https` base URL. No timeout is set.
    pub fn new(base_url: &str) -> Result<Self, SolariaError> {
        let url = Url::parse(base_url.trim())
            .map_err(|e| SolariaError::Config(format!("invalid API URL '{base_url}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SolariaError::Config(format!(
                "unsupported URL scheme '{}' (expected http or https)",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(SolariaError::Config(format!(
                "API URL '{base_url}' cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url: url,
            timeout: None,
        })
    }

    /// Abort requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `SOLARIA_API_URL` and `SOLARIA_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, SolariaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SolariaError> {
        let url = lookup(API_URL_ENV)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&url)?;

        if let Some(raw) = lookup(API_TIMEOUT_ENV).filter(|t| !t.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                SolariaError::Config(format!("{API_TIMEOUT_ENV} must be whole seconds, got '{raw}'"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Base URL extended by path segments; each segment is percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, SolariaError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SolariaError::Config("API URL cannot be used as a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Base URL with a server-relative file path appended verbatim.
    pub(crate) fn file_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base = url.path().trim_end_matches('/').to_string();
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{base}/{path}"));
        url
    }
}
