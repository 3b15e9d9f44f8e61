//! Worker pool draining the work queue through the probe.

use crate::collector::{CompletionCounter, ResultCollector};
use crate::config::CheckerConfig;
use crate::probe::{self, ProbeTransport};
use crate::proxy::ProbeOutcome;
use crate::queue::WorkQueue;

use futures::future;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// A fixed set of worker tasks sharing one admission gate.
///
/// `worker_count` tasks pull from the queue, but at most
/// `concurrency_limit` probes are in flight at any moment.
pub struct WorkerPool {
    transport: Arc<dyn ProbeTransport>,
    test_url: Arc<str>,
    timeout: Duration,
    worker_count: usize,
    gate: Arc<Semaphore>,
}

/// Shared handles a run hands to every worker.
#[derive(Clone)]
pub struct RunState {
    pub queue: Arc<WorkQueue>,
    pub counter: Arc<CompletionCounter>,
    pub collector: Arc<ResultCollector>,
}

impl RunState {
    pub fn new(queue: WorkQueue) -> Self {
        Self {
            queue: Arc::new(queue),
            counter: Arc::new(CompletionCounter::new()),
            collector: Arc::new(ResultCollector::new()),
        }
    }
}

impl WorkerPool {
    pub fn new(config: &CheckerConfig, transport: Arc<dyn ProbeTransport>) -> Self {
        Self {
            transport,
            test_url: Arc::from(config.test_url.as_str()),
            timeout: config.timeout,
            worker_count: config.worker_count,
            gate: Arc::new(Semaphore::new(config.concurrency_limit)),
        }
    }

    /// Run all workers until the queue is drained and every worker has exited.
    pub async fn run(&self, state: &RunState) {
        info!(
            "Starting {} workers for {} proxies ({} permits)",
            self.worker_count,
            state.queue.total(),
            self.gate.available_permits()
        );

        let handles: Vec<_> = (0..self.worker_count)
            .map(|id| {
                let worker = Worker {
                    transport: Arc::clone(&self.transport),
                    test_url: Arc::clone(&self.test_url),
                    timeout: self.timeout,
                    gate: Arc::clone(&self.gate),
                    state: state.clone(),
                };
                tokio::spawn(worker.run(id))
            })
            .collect();

        for result in future::join_all(handles).await {
            if let Err(e) = result {
                warn!("Worker task ended abnormally: {}", e);
            }
        }

        info!(
            "All workers finished: {} processed, {} live",
            state.counter.get(),
            state.collector.count()
        );
    }
}

struct Worker {
    transport: Arc<dyn ProbeTransport>,
    test_url: Arc<str>,
    timeout: Duration,
    gate: Arc<Semaphore>,
    state: RunState,
}

impl Worker {
    async fn run(self, id: usize) {
        let mut processed = 0usize;

        while let Some(proxy) = self.state.queue.take() {
            // The gate is owned by the pool and never closed, so acquire cannot fail.
            // The permit is held only for the network call.
            let permit = self.gate.acquire().await.expect("probe gate is never closed");
            let outcome =
                probe::probe(self.transport.as_ref(), proxy, &self.test_url, self.timeout).await;
            drop(permit);

            if let ProbeOutcome::Success(live) = outcome {
                self.state.collector.record(live);
            }
            self.state.counter.increment();
            processed += 1;
        }

        debug!("Worker {} exiting after {} proxies", id, processed);
    }
}
