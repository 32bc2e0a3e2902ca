//! Trust Registry
//!
//! The runtime-facing view of the trusted anchor set: the environment's
//! base anchors plus any assertions injected at runtime. The base sets are
//! immutable after construction; the injected extras are the only mutable
//! state and every read and write of them serializes behind one lock.

use std::sync::{Arc, Mutex};

use anchorage_core::Assertion;
use thiserror::Error;
use tracing::info;

use crate::builtin::{AnchorLoadError, BuiltinAnchors};
use crate::environment::{Environment, EnvironmentSource, ProcessEnv};

/// Errors raised while serving a trust query
#[derive(Debug, Error)]
pub enum TrustError {
    /// Fatal configuration error: the staging trust context is selected but
    /// this build compiled in no staging anchors. Serving production
    /// anchors instead would silently misdirect trust, so the caller must
    /// treat this as unrecoverable.
    #[error(
        "staging trust context selected but no staging anchors are compiled in; \
         a build with the `staging-anchors` feature is required"
    )]
    StagingAnchorsRequired,
}

/// Process-wide registry of trusted assertions
///
/// One long-lived instance is expected per process, constructed at the
/// composition root after [`BuiltinAnchors::load`] succeeds and shared with
/// the verification pipeline.
#[derive(Debug)]
pub struct TrustRegistry {
    anchors: BuiltinAnchors,
    extra: Arc<Mutex<Vec<Assertion>>>,
    environment: Arc<dyn EnvironmentSource>,
}

impl TrustRegistry {
    /// Create a registry over the given anchors and environment source
    pub fn new(anchors: BuiltinAnchors, environment: Arc<dyn EnvironmentSource>) -> Self {
        info!(
            production = anchors.production().len(),
            staging = anchors.staging().len(),
            "Trust registry initialized"
        );
        Self {
            anchors,
            extra: Arc::new(Mutex::new(Vec::new())),
            environment,
        }
    }

    /// Load the built-in anchors and create a registry selecting its
    /// environment from the process environment
    pub fn from_builtin() -> Result<Self, AnchorLoadError> {
        Ok(Self::new(BuiltinAnchors::load()?, Arc::new(ProcessEnv)))
    }

    /// The effective trusted set: the active environment's base anchors
    /// followed by any injected extras, in insertion order.
    ///
    /// A fresh vector of copies is built on every call; mutating it never
    /// affects the registry. The environment selection is re-read on every
    /// call. No duplicate suppression is performed: a caller that injects
    /// an assertion already present in the base set will see it twice, and
    /// avoiding that is the caller's responsibility.
    pub fn trusted(&self) -> Result<Vec<Assertion>, TrustError> {
        let base = match self.environment.environment() {
            Environment::Staging => {
                let staging = self.anchors.staging();
                if staging.is_empty() {
                    return Err(TrustError::StagingAnchorsRequired);
                }
                staging
            }
            Environment::Production => self.anchors.production(),
        };

        let extra = self.extra.lock().unwrap();
        let mut trusted = Vec::with_capacity(base.len() + extra.len());
        trusted.extend_from_slice(base);
        trusted.extend_from_slice(&extra);
        Ok(trusted)
    }

    /// Extend the effective trusted set with further assertions, visible to
    /// every subsequent [`trusted`](Self::trusted) call in the process
    /// until restored.
    ///
    /// The additions are not decoded, validated, or cross-checked against
    /// the base set; injection is a trust escalation explicitly granted by
    /// the caller (a test harness, or an operator bootstrapping a new
    /// authority).
    ///
    /// The returned handle restores the extras to exactly their state
    /// before this call. Handles from overlapping injections must be
    /// restored in reverse order of injection; restoring out of order
    /// leaves the last-restored snapshot in place.
    #[must_use = "dropping the handle without calling restore() leaves the injection in place"]
    pub fn inject(&self, additions: Vec<Assertion>) -> RestoreHandle {
        let mut extra = self.extra.lock().unwrap();
        let snapshot = extra.clone();

        let mut next = Vec::with_capacity(snapshot.len() + additions.len());
        next.extend_from_slice(&snapshot);
        next.extend(additions);

        info!(
            added = next.len() - snapshot.len(),
            total = next.len(),
            "Injected trusted assertions"
        );
        *extra = next;

        RestoreHandle {
            snapshot,
            extra: Arc::clone(&self.extra),
        }
    }
}

/// Capability to undo an injection
///
/// Holds a snapshot of the injected extras as they were before the
/// corresponding [`TrustRegistry::inject`] call. Restoring reinstalls that
/// snapshot wholesale; it does not subtract the additions. Restore is
/// explicit -- dropping the handle leaves the injection in place.
#[derive(Debug)]
pub struct RestoreHandle {
    snapshot: Vec<Assertion>,
    extra: Arc<Mutex<Vec<Assertion>>>,
}

impl RestoreHandle {
    /// Reinstall the captured snapshot as the injected extras
    pub fn restore(self) {
        let mut extra = self.extra.lock().unwrap();
        info!(total = self.snapshot.len(), "Restored trusted assertion set");
        *extra = self.snapshot;
    }
}
