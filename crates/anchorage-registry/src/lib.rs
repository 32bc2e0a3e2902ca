//! # Anchorage Registry
//!
//! The trust-anchor registry for the assertion verification pipeline: the
//! component that determines which signing identities are accepted as
//! roots of trust when validating incoming signed documents.
//!
//! ## Lifecycle
//!
//! 1. At process start the composition root calls
//!    [`BuiltinAnchors::load`] (or [`TrustRegistry::from_builtin`]). A
//!    failure here means the build artifact's embedded anchors are
//!    corrupted; it is unrecoverable and the process must exit.
//! 2. The long-lived [`TrustRegistry`] answers [`trusted`] queries from
//!    the verification pipeline: the active environment's base anchors
//!    followed by any injected extras, copied fresh on every call.
//! 3. Callers that need additional trusted identities -- test harnesses,
//!    or operators bootstrapping a new authority -- extend the set with
//!    [`inject`] and undo it with the returned [`RestoreHandle`].
//!
//! ## Environments
//!
//! The production anchor set is always compiled in. The staging set is
//! empty unless the `staging-anchors` feature is enabled; selecting the
//! staging environment without it is a fatal configuration error, never a
//! silent fallback to production trust.
//!
//! [`trusted`]: TrustRegistry::trusted
//! [`inject`]: TrustRegistry::inject

pub mod builtin;
pub mod environment;
pub mod registry;

pub use builtin::{AnchorLoadError, BuiltinAnchors};
pub use environment::{Environment, EnvironmentSource, ProcessEnv, STAGING_ENV_VAR};
pub use registry::{RestoreHandle, TrustError, TrustRegistry};
