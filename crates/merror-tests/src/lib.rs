//! Shared setup for the Merror integration tests

use tracing_subscriber::EnvFilter;

/// Namespace of the fixture types
pub const NS: &str = merror_test_target::NAMESPACE;

/// Full name of a fixture type
pub fn type_name(name: &str) -> String {
    format!("{}.{}", NS, name)
}

/// Build an `EnvFilter` from `MERROR_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("MERROR_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install a test-writer subscriber.
///
/// Does nothing when neither `MERROR_LOG` nor `RUST_LOG` is set. Safe to call
/// from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    if std::env::var("MERROR_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_test_writer()
        .try_init();
}

/// Load the fixture assembly and install tracing
pub fn setup() {
    init_tracing();
    if let Err(e) = merror_test_target::assembly() {
        panic!("failed to load fixture assembly: {}", e);
    }
}
