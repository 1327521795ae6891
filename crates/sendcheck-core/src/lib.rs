//! Verification engine between `sendcheck-api` and its callers (CLI).
//!
//! This crate owns the domain model and every rule that decides whether a
//! sending domain's authentication records are in order:
//!
//! - **[`Verifier`]**: Orchestrator. Resolves one [`RecordRequest`] through a
//!   [`Resolve`] implementation, hands the answers to the matching
//!   interpreter, and always returns exactly one [`Verdict`]. Failures become
//!   `error` verdicts; nothing is propagated to the caller.
//!
//! - **Interpreters** ([`interpret`]): Pure functions, one per
//!   [`RecordKind`], over the raw answer strings and a [`PolicyConfig`]
//!   slice. Reentrant and free of I/O.
//!
//! - **[`PolicyConfig`]**: Per-kind matching rules (required SPF includes,
//!   accepted `all` modifiers, DMARC reporting addresses, MX host set).
//!   Passed by reference into every call; never global.
//!
//! - **Domain expansion** ([`expand`]): Turns a bare sending domain into
//!   the five standard lookups using provider [`DomainConventions`].

pub mod error;
pub mod expand;
pub mod interpret;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod resolver;
pub mod verifier;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use expand::{DomainConventions, domain_requests, normalize_domain};
pub use model::{FailureKind, QueryKind, RecordKind, RecordRequest, Verdict, VerificationStatus};
pub use policy::{DmarcPolicy, MatchPolicy, MxPolicy, PolicyConfig, SpfPolicy};
pub use resolver::Resolve;
pub use verifier::{DEFAULT_CONCURRENCY, Verifier};
