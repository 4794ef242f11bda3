//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for local runs
    Development,
    /// JSON structured output for CI jobs
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Pick a profile from the `TOPOGRAPH_LOG` convention (`json` selects production)
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" || v == "production" => Profile::Production,
            _ => Profile::Development,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are no-ops.
///
/// # Profiles
///
/// - **Development**: Human-readable logs on stderr, `topograph=debug`
/// - **Production**: JSON structured logs on stderr, `topograph=info`
/// - **Test**: Bare registry; tests install the capture layer instead
///
/// Logs always go to stderr so rendered diagrams can be piped from stdout.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("topograph=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("topograph=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
