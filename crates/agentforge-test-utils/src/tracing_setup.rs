//! Tracing initialisation for tests.
//!
//! Agent construction and factory dispatch emit `tracing` debug events;
//! tests that want those captured alongside the test output call
//! [`init_test_tracing`] first.

use tracing_subscriber::EnvFilter;

/// Install a subscriber routing events through the test-harness writer.
///
/// The filter comes from `RUST_LOG` when set, `info` otherwise. Only the
/// first call per process installs anything; later calls are no-ops, so
/// every test can start with this unconditionally.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
