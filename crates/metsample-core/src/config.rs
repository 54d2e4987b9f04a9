use std::env;
use std::time::Duration;

use crate::error::{PipelineError, Result};

pub const DEFAULT_SEARCH_URL: &str =
    "https://collectionapi.metmuseum.org/public/collection/v1/search";
pub const DEFAULT_OBJECT_URL: &str =
    "https://collectionapi.metmuseum.org/public/collection/v1/objects";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("metsample/", env!("CARGO_PKG_VERSION"));

/// Endpoints and request settings for the remote collection API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Search endpoint; receives `q` and `hasImages` query parameters.
    pub search_url: String,
    /// Object endpoint; the object id is appended as the last path segment.
    pub object_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            object_url: DEFAULT_OBJECT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            use_system_proxy: true,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `METSAMPLE_SEARCH_URL`, `METSAMPLE_OBJECT_URL` and
    /// `METSAMPLE_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("METSAMPLE_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(url) = lookup("METSAMPLE_OBJECT_URL") {
            config.object_url = url;
        }
        if let Some(raw) = lookup("METSAMPLE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PipelineError::Config(format!(
                    "METSAMPLE_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Points both endpoints at a single base URL (`<base>/search`, `<base>/objects`).
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            search_url: format!("{base}/search"),
            object_url: format!("{base}/objects"),
            ..Self::default()
        }
    }

    pub fn object_endpoint(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.object_url.trim_end_matches('/'), id)
    }
}
