//! Live single-line progress display.

use crate::collector::CompletionCounter;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

const TEMPLATE: &str = "🚀 ok: {msg} | {pos}/{len}";

/// Periodically samples the completion counter and redraws one status line.
///
/// Runs beside the worker pool and stops on its own once every proxy has
/// been counted, or earlier when told to through [`ProgressHandle::finish`].
pub struct ProgressReporter {
    counter: Arc<CompletionCounter>,
    total: usize,
    interval: Duration,
    bar: ProgressBar,
    stop: Arc<Notify>,
}

/// Running reporter task.
pub struct ProgressHandle {
    stop: Arc<Notify>,
    task: JoinHandle<()>,
}

impl ProgressReporter {
    /// Reporter drawing to standard output.
    pub fn new(counter: Arc<CompletionCounter>, total: usize, interval: Duration) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self {
            counter,
            total,
            interval,
            bar,
            stop: Arc::new(Notify::new()),
        }
    }

    /// Redirect the status line to another target.
    pub fn with_draw_target(self, target: ProgressDrawTarget) -> Self {
        self.bar.set_draw_target(target);
        self
    }

    pub fn spawn(self) -> ProgressHandle {
        let stop = Arc::clone(&self.stop);
        ProgressHandle {
            stop,
            task: tokio::spawn(self.run()),
        }
    }

    /// Draw until `completed >= total` or a stop request, whichever comes first.
    async fn run(self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let stopped = tokio::select! {
                _ = ticker.tick() => false,
                _ = self.stop.notified() => true,
            };

            let completed = self.counter.get();
            self.bar.set_position(completed as u64);
            self.bar.set_message(format!("{}%", percent(completed, self.total)));

            if completed >= self.total {
                self.bar.finish();
                return;
            }
            if stopped {
                self.bar.abandon();
                return;
            }
        }
    }
}

impl ProgressHandle {
    /// Take one last sample, stop the reporter and wait for it.
    ///
    /// Needed when workers died before counting every proxy; otherwise the
    /// reporter has already exited or exits on this final sample.
    pub async fn finish(self) -> Result<(), JoinError> {
        self.stop.notify_one();
        self.task.await
    }
}

/// `ceil(100 * completed / total)`, or 100 when there is nothing to do.
pub fn percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    (completed.min(total) * 100).div_ceil(total)
}
