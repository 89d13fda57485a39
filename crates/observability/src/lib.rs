//! Tracing and logging setup shared by the storefront binaries.

/// Initialize process-wide logging.
///
/// `default_filter` applies when `RUST_LOG` is unset. Safe to call multiple
/// times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
