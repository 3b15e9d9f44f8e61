//! Proxy addresses and probe outcomes.

use std::fmt;

/// A proxy endpoint in `host:port` form, as read from the input list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    /// Wrap an already trimmed `host:port` string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Forward-proxy URL understood by the HTTP client.
    pub fn url(&self) -> String {
        format!("http://{}", self.0)
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProxyAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A proxy that answered the test request with status 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveProxy {
    pub proxy: ProxyAddress,
    /// Round-trip time, rounded to the nearest millisecond.
    pub latency_ms: u64,
}

impl fmt::Display for LiveProxy {
    /// Output file line format: `<proxy> | <latency>ms`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}ms", self.proxy, self.latency_ms)
    }
}

/// Classification of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(LiveProxy),
    Failure(ProxyAddress),
}

impl ProbeOutcome {
    pub fn success(proxy: ProxyAddress, latency_ms: u64) -> Self {
        Self::Success(LiveProxy { proxy, latency_ms })
    }

    pub fn proxy(&self) -> &ProxyAddress {
        match self {
            Self::Success(live) => &live.proxy,
            Self::Failure(proxy) => proxy,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
