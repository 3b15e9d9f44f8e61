//! Input loading and output writing.

use crate::error::CheckerError;
use crate::proxy::{LiveProxy, ProxyAddress};

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Read a proxy list file, one `host:port` per line.
pub fn load_proxy_file(path: impl AsRef<Path>) -> Result<Vec<ProxyAddress>, CheckerError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CheckerError::io(path, e))?;
    Ok(parse_proxy_list(&content))
}

/// Trim every line and keep the non-empty ones, in input order.
pub fn parse_proxy_list(content: &str) -> Vec<ProxyAddress> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ProxyAddress::new)
        .collect()
}

/// Overwrite `path` with one `<proxy> | <latency>ms` line per live proxy.
pub fn write_results(path: impl AsRef<Path>, results: &[LiveProxy]) -> Result<(), CheckerError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| CheckerError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for live in results {
        writeln!(writer, "{}", live).map_err(|e| CheckerError::io(path, e))?;
    }
    writer.flush().map_err(|e| CheckerError::io(path, e))
}
