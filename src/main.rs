use anyhow::{Context, Result};
use clap::Parser;
use proxy_checker::{CheckerConfig, ProxyChecker};
use std::path::PathBuf;
use std::time::Duration;

/// Check which proxies in a list are alive and how fast they answer
#[derive(Parser, Debug)]
#[command(name = "proxy-checker", version, about)]
struct Cli {
    /// File with one host:port proxy per line
    #[arg(short, long, env = "PROXY_CHECKER_INPUT", default_value = "proxies.txt")]
    input: PathBuf,

    /// File receiving the live proxies (overwritten)
    #[arg(short, long, env = "PROXY_CHECKER_OUTPUT", default_value = "working_proxies.txt")]
    output: PathBuf,

    /// URL requested through each proxy
    #[arg(long, env = "PROXY_CHECKER_TEST_URL", default_value = proxy_checker::config::DEFAULT_TEST_URL)]
    test_url: String,

    /// Per-request timeout in seconds
    #[arg(short, long, env = "PROXY_CHECKER_TIMEOUT", default_value_t = 2.0)]
    timeout: f64,

    /// Maximum simultaneous outbound probes
    #[arg(short, long, env = "PROXY_CHECKER_CONCURRENCY", default_value_t = proxy_checker::config::DEFAULT_CONCURRENCY_LIMIT)]
    concurrency: usize,

    /// Number of worker tasks
    #[arg(short, long, env = "PROXY_CHECKER_WORKERS", default_value_t = proxy_checker::config::DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Progress refresh interval in milliseconds
    #[arg(long, default_value_t = 100)]
    progress_interval_ms: u64,

    /// Do not draw the live progress line
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let timeout = Duration::try_from_secs_f64(cli.timeout)
        .with_context(|| format!("invalid timeout: {}", cli.timeout))?;
    let config = CheckerConfig::builder()
        .test_url(cli.test_url)
        .timeout(timeout)
        .concurrency_limit(cli.concurrency)
        .worker_count(cli.workers)
        .progress_interval(Duration::from_millis(cli.progress_interval_ms))
        .show_progress(!cli.quiet)
        .build()?;

    println!("⚡ started proxychecker");
    println!(
        "🔍 {} | {} request live",
        cli.input.display(),
        config.concurrency_limit
    );

    let report = ProxyChecker::new(config)
        .run_files(&cli.input, &cli.output)
        .await
        .context("proxy check failed")?;

    println!("\n🔍 allof {} proxy checked", report.total);
    println!("{}", report);
    println!("💾 saved to {}", cli.output.display());

    Ok(())
}
