//! Shared completion counter and result sink.

use crate::proxy::LiveProxy;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of proxies whose probe has finished, successful or not.
///
/// Only ever incremented, once per processed proxy.
#[derive(Debug, Default)]
pub struct CompletionCounter(AtomicUsize);

impl CompletionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Release);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Append-only collection of live proxies.
#[derive(Debug, Default)]
pub struct ResultCollector {
    results: Mutex<Vec<LiveProxy>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, live: LiveProxy) {
        self.results.lock().push(live);
    }

    /// Copy of everything recorded so far, in arrival order.
    pub fn snapshot(&self) -> Vec<LiveProxy> {
        self.results.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.results.lock().len()
    }
}
