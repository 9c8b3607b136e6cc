//! Configuration for recommendation searches

use log::warn;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for recommendation searches
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Results requested per upstream search page
    pub per_page: u8,
    /// Upper bound on concurrent upstream search pages
    pub max_pages: u32,
    /// Repositories enriched concurrently
    pub batch_size: usize,
    /// Pause between enrichment batches
    pub batch_delay: Duration,
    /// Repositories must score strictly above this to be returned
    pub min_score: f64,
    pub api_timeout: Duration,
    pub rate_limit_buffer: u32,
    /// Recency window for the upstream `pushed:` qualifier
    pub lookback_years: u32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            per_page: 30,
            max_pages: 3,
            batch_size: 5,
            batch_delay: Duration::from_millis(100),
            min_score: 0.05,
            api_timeout: Duration::from_secs(10),
            rate_limit_buffer: 10,
            lookback_years: 2,
        }
    }
}

impl RecommendConfig {
    /// Defaults overlaid with `CONTRIB_FINDER_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_value::<usize>("CONTRIB_FINDER_BATCH_SIZE") {
            config.batch_size = v.max(1);
        }
        if let Some(v) = env_value::<u64>("CONTRIB_FINDER_BATCH_DELAY_MS") {
            config.batch_delay = Duration::from_millis(v);
        }
        if let Some(v) = env_value::<u32>("CONTRIB_FINDER_MAX_PAGES") {
            config.max_pages = v.max(1);
        }
        if let Some(v) = env_value::<f64>("CONTRIB_FINDER_MIN_SCORE") {
            config.min_score = v.clamp(0.0, 1.0);
        }
        if let Some(v) = env_value::<u64>("CONTRIB_FINDER_API_TIMEOUT_SECS") {
            config.api_timeout = Duration::from_secs(v);
        }

        config
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

/// The caller's token if given and non-empty, else `GITHUB_TOKEN`.
#[must_use]
pub fn resolve_token(user_token: Option<&str>) -> Option<String> {
    user_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| {
            std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
        })
}
