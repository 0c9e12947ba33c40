//! `rangefetch config`: show where settings come from and their values.

use anyhow::Result;
use rangefetch_core::config::{self, RangefetchConfig};

pub fn run_config(cfg: &RangefetchConfig) -> Result<()> {
    let path = config::config_path()?;
    let policy = cfg.retry_policy();
    println!("config file:       {}", path.display());
    println!("chunk_count:       {}", cfg.chunk_count);
    println!("connect timeout:   {}s", cfg.connect_timeout_secs);
    println!("request timeout:   {}s", cfg.timeout_secs);
    println!(
        "low speed abort:   < {} B/s for {}s",
        cfg.low_speed_limit, cfg.low_speed_time_secs
    );
    println!("prefer HTTP/2:     {}", cfg.prefer_http2);
    println!(
        "user agent:        {}",
        cfg.user_agent.as_deref().unwrap_or("(libcurl default)")
    );
    println!("max attempts:      {}", policy.max_attempts);
    println!(
        "backoff:           {:?} doubling, capped at {:?}",
        policy.base_delay, policy.max_delay
    );
    Ok(())
}
