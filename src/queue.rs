//! Closed work queue shared by all workers.

use crate::proxy::ProxyAddress;

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Pending proxies, populated once and drained by workers.
///
/// Each address is handed out exactly once; nothing is pushed after
/// construction.
#[derive(Debug)]
pub struct WorkQueue {
    pending: Mutex<VecDeque<ProxyAddress>>,
    total: usize,
}

impl WorkQueue {
    pub fn new(proxies: impl IntoIterator<Item = ProxyAddress>) -> Self {
        let pending: VecDeque<_> = proxies.into_iter().collect();
        let total = pending.len();
        Self {
            pending: Mutex::new(pending),
            total,
        }
    }

    /// Take the next proxy in FIFO order, or `None` once drained.
    pub fn take(&self) -> Option<ProxyAddress> {
        self.pending.lock().pop_front()
    }

    /// Number of proxies the queue was created with.
    pub fn total(&self) -> usize {
        self.total
    }
}
