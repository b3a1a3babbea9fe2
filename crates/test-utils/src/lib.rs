//! Shared helpers for randwire integration tests.
//!
//! - [`builders`]: hand-written DAGs and configs.
//! - [`fake_units`]: recording and failing compute units.

pub mod builders;
pub mod fake_units;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Output is captured and only shown for failing tests. `RUST_LOG=debug`
/// surfaces generation retries and per-node dispatch.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if an executor run takes longer than five seconds.
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("executor run timed out after 5 seconds")
}
