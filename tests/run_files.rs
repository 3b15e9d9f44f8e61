use async_trait::async_trait;
use http::StatusCode;
use proxy_checker::{
    CheckerConfig, CheckerError, ProbeClient, ProbeTransport, ProxyAddress, ProxyChecker, TransportError,
};
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Answers 200 after 50ms for one proxy and refuses the rest.
struct SingleLive {
    live: &'static str,
    calls: AtomicUsize,
}

/// Client replying with a fixed status after a delay.
struct Fixed(StatusCode, Duration);

#[async_trait]
impl ProbeClient for Fixed {
    async fn get(&self, _url: &str) -> Result<StatusCode, TransportError> {
        tokio::time::sleep(self.1).await;
        Ok(self.0)
    }
}

#[async_trait]
impl ProbeTransport for SingleLive {
    async fn client_for(&self, proxy: &ProxyAddress) -> Result<Box<dyn ProbeClient>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if proxy.as_str() == self.live {
            Ok(Box::new(Fixed(StatusCode::OK, Duration::from_millis(50))))
        } else {
            Err(TransportError::Connection("connection refused".into()))
        }
    }
}

/// Every proxy whose last octet is even answers 200.
struct EvenLive;

#[async_trait]
impl ProbeTransport for EvenLive {
    async fn client_for(&self, proxy: &ProxyAddress) -> Result<Box<dyn ProbeClient>, TransportError> {
        tokio::task::yield_now().await;
        let host = proxy.as_str().split(':').next().unwrap_or_default();
        let last: u32 = host.rsplit('.').next().and_then(|o| o.parse().ok()).unwrap_or(1);
        let status = if last % 2 == 0 { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
        Ok(Box::new(Fixed(status, Duration::ZERO)))
    }
}

fn quiet(workers: usize, limit: usize) -> CheckerConfig {
    CheckerConfig::builder()
        .worker_count(workers)
        .concurrency_limit(limit)
        .timeout(Duration::from_secs(1))
        .show_progress(false)
        .build()
        .unwrap()
}

#[tokio::test]
async fn writes_single_live_proxy() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proxies.txt");
    let output = dir.path().join("working_proxies.txt");
    fs::write(&input, "1.1.1.1:8080\n2.2.2.2:3128\n\n3.3.3.3:8080\n  \n4.4.4.4:8080\n").unwrap();

    let transport = Arc::new(SingleLive { live: "1.1.1.1:8080", calls: AtomicUsize::new(0) });
    let checker = ProxyChecker::with_transport(quiet(300, 2000), transport.clone());
    let report = checker.run_files(&input, &output).await.unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.completed, 4);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 4);
    assert!(report.to_string().contains("1 found proxy live"));

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 1);
    let (proxy, latency) = lines[0].split_once(" | ").unwrap();
    assert_eq!(proxy, "1.1.1.1:8080");
    let ms: u64 = latency.strip_suffix("ms").unwrap().parse().unwrap();
    assert!((50..250).contains(&ms), "{}", ms);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_are_unique_subset_of_input() {
    let input: Vec<ProxyAddress> = (0..1000)
        .map(|i| ProxyAddress::new(format!("10.2.{}.{}:8080", i / 250, i % 250)))
        .collect();
    let expected_live = input
        .iter()
        .filter(|p| p.as_str().split(':').next().unwrap().rsplit('.').next().unwrap().parse::<u32>().unwrap() % 2 == 0)
        .count();

    for (workers, limit) in [(1, 1), (7, 3), (300, 2000)] {
        let checker = ProxyChecker::with_transport(quiet(workers, limit), Arc::new(EvenLive));
        let report = checker.check(input.clone()).await;

        assert_eq!(report.completed, input.len());
        assert!(report.live.len() <= report.total);
        assert_eq!(report.live.len(), expected_live);

        let known: HashSet<_> = input.iter().collect();
        let mut seen = HashSet::new();
        for live in &report.live {
            assert!(known.contains(&live.proxy));
            assert!(seen.insert(live.proxy.clone()), "duplicate {}", live.proxy);
        }
    }
}

#[tokio::test]
async fn empty_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proxies.txt");
    let output = dir.path().join("working_proxies.txt");
    fs::write(&input, "").unwrap();

    let checker = ProxyChecker::with_transport(quiet(4, 4), Arc::new(EvenLive));
    let report = checker.run_files(&input, &output).await.unwrap();

    assert_eq!(report.total, 0);
    assert_eq!(report.throughput(), None);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let checker = ProxyChecker::with_transport(quiet(4, 4), Arc::new(EvenLive));

    let err = checker
        .run_files(dir.path().join("absent.txt"), dir.path().join("out.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckerError::Io { .. }));
    assert!(!dir.path().join("out.txt").exists());
}
