//! Environment selection
//!
//! Decides whether the process is operating against the production or the
//! staging trust context. The registry consults the source on every query
//! so that runtime environment changes (e.g. in test setups) take effect
//! immediately; implementations must not cache.

use std::fmt::Debug;

/// Environment variable that switches the process to the staging trust
/// context when set to `1` or `true`
pub const STAGING_ENV_VAR: &str = "ANCHORAGE_USE_STAGING";

/// The trust context a query is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// The default, compiled-in production anchor set
    Production,
    /// The alternate anchor set for staging deployments
    Staging,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Staging => f.write_str("staging"),
        }
    }
}

/// Source of the process-wide environment selection
///
/// Implementations must be side-effect free and must return the current
/// selection on every call rather than a cached value.
pub trait EnvironmentSource: Send + Sync + Debug {
    /// Whether the staging trust context is currently selected
    fn staging_active(&self) -> bool;

    /// The currently selected environment
    fn environment(&self) -> Environment {
        if self.staging_active() {
            Environment::Staging
        } else {
            Environment::Production
        }
    }
}

/// Reads the selection from the process environment on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvironmentSource for ProcessEnv {
    fn staging_active(&self) -> bool {
        match std::env::var(STAGING_ENV_VAR) {
            Ok(value) => matches!(value.as_str(), "1" | "true"),
            Err(_) => false,
        }
    }
}
