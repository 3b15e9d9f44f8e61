//! Simple example of using proxy-checker as a library.

use proxy_checker::{CheckerConfig, ProxyAddress, ProxyChecker};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CheckerConfig::builder()
        .test_url("http://httpbin.org/ip")
        .timeout(Duration::from_secs(3))
        // at most 50 sockets open at once, whatever the worker count
        .concurrency_limit(50)
        .worker_count(100)
        .build()?;

    let proxies: Vec<ProxyAddress> = std::env::args()
        .skip(1)
        .map(ProxyAddress::new)
        .collect();

    println!("Checking {} proxies...", proxies.len());
    let report = ProxyChecker::new(config).check(proxies).await;

    for live in &report.live {
        println!("{}", live);
    }
    println!("{}", report);

    Ok(())
}
