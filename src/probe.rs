//! Single-proxy liveness probe.

use crate::error::TransportError;
use crate::proxy::{ProbeOutcome, ProxyAddress};

use async_trait::async_trait;
use http::header::CONNECTION;
use http::StatusCode;
use std::time::{Duration, Instant};

/// Opens a client routed through one proxy.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Set up a client for `proxy`. Not part of the measured latency.
    async fn client_for(&self, proxy: &ProxyAddress) -> Result<Box<dyn ProbeClient>, TransportError>;
}

/// A client bound to a single proxy, used for exactly one request.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// GET `url`, reading the full response body.
    async fn get(&self, url: &str) -> Result<StatusCode, TransportError>;
}

/// Transport backed by a fresh `reqwest::Client` per probe.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeTransport for ReqwestTransport {
    async fn client_for(&self, proxy: &ProxyAddress) -> Result<Box<dyn ProbeClient>, TransportError> {
        let proxy_url = proxy.url();
        let timeout = self.timeout;
        // Building loads TLS roots synchronously; keep it off the runtime threads.
        let client = tokio::task::spawn_blocking(move || {
            // `all` forwards plain http and tunnels https through CONNECT.
            reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(proxy_url)?)
                .timeout(timeout)
                .pool_max_idle_per_host(0)
                .build()
        })
        .await
        .map_err(|e| TransportError::Connection(format!("client setup aborted: {}", e)))??;
        Ok(Box::new(ReqwestClient(client)))
    }
}

struct ReqwestClient(reqwest::Client);

#[async_trait]
impl ProbeClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<StatusCode, TransportError> {
        let response = self.0.get(url).header(CONNECTION, "close").send().await?;
        let status = response.status();
        response.bytes().await?;
        Ok(status)
    }
}

/// Probe `proxy` once and classify the result.
///
/// Never fails: every transport error, non-200 status or timeout becomes
/// [`ProbeOutcome::Failure`]. Only an exact 200 counts as success. Client
/// setup and the request are each bounded by `timeout`; latency covers the
/// request alone.
pub async fn probe(
    transport: &dyn ProbeTransport,
    proxy: ProxyAddress,
    test_url: &str,
    timeout: Duration,
) -> ProbeOutcome {
    let client = match tokio::time::timeout(timeout, transport.client_for(&proxy)).await {
        Ok(Ok(client)) => client,
        _ => return ProbeOutcome::Failure(proxy),
    };

    let start = Instant::now();
    match tokio::time::timeout(timeout, client.get(test_url)).await {
        Ok(Ok(status)) if status == StatusCode::OK => {
            ProbeOutcome::success(proxy, round_millis(start.elapsed()))
        }
        _ => ProbeOutcome::Failure(proxy),
    }
}

fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}
