//! # proxy-checker
//!
//! A bounded-concurrency liveness checker for HTTP proxy lists.
//!
//! Every proxy is taken once from a shared queue by one of a fixed set of
//! workers, probed with a single GET request under a global concurrency
//! ceiling, and recorded if it answers with status 200. A reporter task
//! redraws a progress line while the run is in flight.

pub mod checker;
pub mod collector;
pub mod config;
pub mod error;
pub mod pool;
pub mod probe;
pub mod progress;
pub mod proxy;
pub mod queue;
pub mod utils;

pub use checker::{ProxyChecker, RunReport};
pub use collector::{CompletionCounter, ResultCollector};
pub use config::{CheckerConfig, CheckerConfigBuilder};
pub use error::{CheckerError, TransportError};
pub use pool::{RunState, WorkerPool};
pub use probe::{probe, ProbeClient, ProbeTransport, ReqwestTransport};
pub use progress::{ProgressHandle, ProgressReporter};
pub use proxy::{LiveProxy, ProbeOutcome, ProxyAddress};
pub use queue::WorkQueue;
