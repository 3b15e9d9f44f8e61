//! Configuration for the proxy checker.

use crate::error::CheckerError;
use std::time::Duration;
use url::Url;

/// Default endpoint that echoes the caller's IP.
pub const DEFAULT_TEST_URL: &str = "http://icanhazip.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Default ceiling on simultaneously in-flight probes.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 2000;
/// Default number of worker tasks.
pub const DEFAULT_WORKER_COUNT: usize = 300;
/// Default refresh interval of the progress line.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Immutable settings for one checking run.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// URL requested through every proxy.
    pub test_url: String,
    /// Upper bound for a single probe, connection to last body byte.
    pub timeout: Duration,
    /// Maximum number of probes in flight across all workers.
    pub concurrency_limit: usize,
    /// Number of worker tasks pulling from the queue.
    pub worker_count: usize,
    /// How often the progress line is redrawn.
    pub progress_interval: Duration,
    /// Whether the live progress line is rendered at all.
    pub show_progress: bool,
}

impl CheckerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CheckerConfigBuilder {
        CheckerConfigBuilder::new()
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            test_url: DEFAULT_TEST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            worker_count: DEFAULT_WORKER_COUNT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            show_progress: true,
        }
    }
}

/// Builder for `CheckerConfig`.
pub struct CheckerConfigBuilder {
    test_url: Option<String>,
    timeout: Option<Duration>,
    concurrency_limit: Option<usize>,
    worker_count: Option<usize>,
    progress_interval: Option<Duration>,
    show_progress: Option<bool>,
}

impl CheckerConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            test_url: None,
            timeout: None,
            concurrency_limit: None,
            worker_count: None,
            progress_interval: None,
            show_progress: None,
        }
    }

    /// Set the URL requested through each proxy.
    pub fn test_url(mut self, url: impl Into<String>) -> Self {
        self.test_url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the ceiling on simultaneous outbound probes.
    pub fn concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit);
        self
    }

    /// Set the number of worker tasks.
    pub fn worker_count(mut self, count: usize) -> Self {
        self.worker_count = Some(count);
        self
    }

    /// Set the progress refresh interval.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Enable or disable the live progress line.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<CheckerConfig, CheckerError> {
        let defaults = CheckerConfig::default();
        let config = CheckerConfig {
            test_url: self.test_url.unwrap_or(defaults.test_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            concurrency_limit: self.concurrency_limit.unwrap_or(defaults.concurrency_limit),
            worker_count: self.worker_count.unwrap_or(defaults.worker_count),
            progress_interval: self.progress_interval.unwrap_or(defaults.progress_interval),
            show_progress: self.show_progress.unwrap_or(defaults.show_progress),
        };
        validate(&config)?;
        Ok(config)
    }
}

impl Default for CheckerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &CheckerConfig) -> Result<(), CheckerError> {
    let url = Url::parse(&config.test_url).map_err(|e| {
        CheckerError::InvalidConfig(format!("test url {:?}: {}", config.test_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CheckerError::InvalidConfig(format!(
            "test url must be http or https, got {}",
            url.scheme()
        )));
    }
    if config.timeout.is_zero() {
        return Err(CheckerError::InvalidConfig("timeout must be non-zero".into()));
    }
    if config.concurrency_limit == 0 {
        return Err(CheckerError::InvalidConfig(
            "concurrency limit must be at least 1".into(),
        ));
    }
    if config.worker_count == 0 {
        return Err(CheckerError::InvalidConfig("worker count must be at least 1".into()));
    }
    if config.progress_interval.is_zero() {
        return Err(CheckerError::InvalidConfig(
            "progress interval must be non-zero".into(),
        ));
    }
    Ok(())
}
