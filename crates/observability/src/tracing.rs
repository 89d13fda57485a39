//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` first, then `default_filter`, then `info`.
pub fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str) {
    // JSON logs + timestamps on stderr so stdout stays free for rendered views.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_a_no_op() {
        init("debug");
        init("warn");
        ::tracing::info!("still logging after repeated init");
    }

    #[test]
    fn invalid_default_falls_back_to_info() {
        // A malformed directive must not panic.
        let _ = filter("=[not a directive");
    }
}
