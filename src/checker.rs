//! Run orchestration: queue, pool, progress and report.

use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::pool::{RunState, WorkerPool};
use crate::probe::{ProbeTransport, ReqwestTransport};
use crate::progress::ProgressReporter;
use crate::proxy::{LiveProxy, ProxyAddress};
use crate::queue::WorkQueue;
use crate::utils;

use log::{info, warn};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Checks a list of proxies with bounded concurrency.
pub struct ProxyChecker {
    config: CheckerConfig,
    transport: Arc<dyn ProbeTransport>,
}

impl ProxyChecker {
    /// Checker probing through real HTTP requests.
    pub fn new(config: CheckerConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    /// Checker using a custom transport.
    pub fn with_transport(config: CheckerConfig, transport: Arc<dyn ProbeTransport>) -> Self {
        Self { config, transport }
    }

    /// Probe every proxy once and collect the live ones.
    pub async fn check(&self, proxies: Vec<ProxyAddress>) -> RunReport {
        let start = Instant::now();
        let state = RunState::new(WorkQueue::new(proxies));
        let total = state.queue.total();
        info!("Checking {} proxies against {}", total, self.config.test_url);

        let progress = self.config.show_progress.then(|| {
            ProgressReporter::new(Arc::clone(&state.counter), total, self.config.progress_interval)
                .spawn()
        });

        WorkerPool::new(&self.config, Arc::clone(&self.transport))
            .run(&state)
            .await;

        let completed = state.counter.get();
        if completed < total {
            warn!("{} of {} proxies were lost to failed workers", total - completed, total);
        }
        if let Some(handle) = progress {
            if let Err(e) = handle.finish().await {
                warn!("Progress reporter ended abnormally: {}", e);
            }
        }

        let report = RunReport {
            total,
            completed,
            live: state.collector.snapshot(),
            elapsed: start.elapsed(),
        };
        info!(
            "Run finished: {}/{} live in {:.2}s",
            report.live.len(),
            report.total,
            report.elapsed.as_secs_f64()
        );
        report
    }

    /// Load `input`, check it, and overwrite `output` with the live proxies.
    pub async fn run_files(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<RunReport, CheckerError> {
        let proxies = utils::load_proxy_file(input.as_ref())?;
        info!("Loaded {} proxies from {}", proxies.len(), input.as_ref().display());

        let report = self.check(proxies).await;

        utils::write_results(output.as_ref(), &report.live)?;
        info!("Wrote {} proxies to {}", report.live.len(), output.as_ref().display());
        Ok(report)
    }
}

/// Outcome of one complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of proxies queued.
    pub total: usize,
    /// Final value of the completion counter.
    pub completed: usize,
    /// Proxies that answered with status 200, in completion order.
    pub live: Vec<LiveProxy>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Proxies checked per second, if there was anything to measure.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        if self.total == 0 || secs <= 0.0 {
            return None;
        }
        Some(self.total as f64 / secs)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✅ {} found proxy live", self.live.len())?;
        match self.throughput() {
            Some(rate) => write!(
                f,
                "⏱️ time: {:.2}s | Proxy/s: {:.1}",
                self.elapsed.as_secs_f64(),
                rate
            ),
            None => write!(f, "⏱️ time: {:.2}s | Proxy/s: n/a", self.elapsed.as_secs_f64()),
        }
    }
}
