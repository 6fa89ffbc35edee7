//! Subscriber setup.
//!
//! Filter precedence: `RUST_LOG`, then `--log-level`, then `log_level` from
//! the configuration file, then [`DEFAULT_LEVEL`]. Output goes to stderr so
//! that reports on stdout stay machine-readable.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

/// Level used when `RUST_LOG` is not set
pub fn fallback_level<'a>(flag: Option<&'a str>, config: Option<&'a str>) -> &'a str {
    flag.or(config).unwrap_or(DEFAULT_LEVEL)
}

pub fn env_filter(flag: Option<&str>, config: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level(flag, config)))
}

/// Install the global subscriber; a second call is a no-op.
pub fn init(flag: Option<&str>, config: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(flag, config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
