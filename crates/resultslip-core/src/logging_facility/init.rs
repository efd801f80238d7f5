//! Subscriber installation

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile, selected by `[logging] profile` in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable text, debug level for the workspace crates
    Development,
    /// One JSON object per event, info level
    Production,
    /// Bare registry; tests install their own capture layer
    Test,
}

// Directive targets match by prefix, so `resultslip` covers every workspace crate.
const DEVELOPMENT_FILTER: &str = "resultslip=debug";
const PRODUCTION_FILTER: &str = "resultslip=info";

static INIT_ONCE: Once = Once::new();

/// Filter directives used when `RUST_LOG` is not set
///
/// An explicit, non-blank `filter` from the configuration wins over the
/// profile default.
pub fn default_directives(profile: Profile, filter: Option<&str>) -> &str {
    match filter.map(str::trim) {
        Some(custom) if !custom.is_empty() => custom,
        _ => match profile {
            Profile::Development => DEVELOPMENT_FILTER,
            Profile::Production | Profile::Test => PRODUCTION_FILTER,
        },
    }
}

/// Install the global subscriber; only the first call has any effect
///
/// All output goes to stderr. `RUST_LOG`, when set and valid, overrides both
/// `filter` and the profile default.
pub fn init(profile: Profile, filter: Option<&str>) {
    INIT_ONCE.call_once(|| {
        let env_filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(profile, filter)))
        };
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(env_filter())
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(env_filter())
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}
