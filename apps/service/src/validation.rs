//! Bounds checks for user supplied settings.

use anyhow::{Result, anyhow};
use url::Url;

/// Validate the watch interval
pub fn validate_check_interval(interval_seconds: u64) -> Result<()> {
    const MIN_INTERVAL: u64 = 10; // 10 seconds
    const MAX_INTERVAL: u64 = 86400; // 24 hours

    if interval_seconds < MIN_INTERVAL {
        return Err(anyhow!(
            "Check interval too short: {} seconds (minimum: {})",
            interval_seconds,
            MIN_INTERVAL
        ));
    }

    if interval_seconds > MAX_INTERVAL {
        return Err(anyhow!(
            "Check interval too long: {} seconds (maximum: {})",
            interval_seconds,
            MAX_INTERVAL
        ));
    }

    Ok(())
}

/// Validate the per-probe bound
pub fn validate_timeout(timeout_ms: u64) -> Result<()> {
    const MIN_TIMEOUT: u64 = 100; // 100ms
    const MAX_TIMEOUT: u64 = 300_000; // 5 minutes

    if timeout_ms < MIN_TIMEOUT {
        return Err(anyhow!("Timeout too small: {} ms (min: {} ms)", timeout_ms, MIN_TIMEOUT));
    }

    if timeout_ms > MAX_TIMEOUT {
        return Err(anyhow!("Timeout too large: {} ms (max: {} ms)", timeout_ms, MAX_TIMEOUT));
    }

    Ok(())
}

/// Validate the forwarding server root URL
pub fn validate_relay_url(target: &str) -> Result<()> {
    let url = Url::parse(target).map_err(|e| anyhow!("Invalid relay URL: {}", e))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("Invalid scheme for relay URL: {}", other)),
    }

    if url.host_str().is_none() {
        return Err(anyhow!("Relay URL must have a valid host"));
    }

    Ok(())
}
