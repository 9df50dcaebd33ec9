//! Turnstile Authorization Strategy
//!
//! The decision core consulted by the SSO request pipeline. For a protected
//! service and an authenticated principal it answers three independent
//! questions:
//! - May the service use the broker for authentication at all?
//! - May the service take part in transparent single sign-on, or must it
//!   always force fresh credential presentation?
//! - Do the principal's resolved attributes satisfy the service's
//!   required-attribute policy?
//!
//! Key properties:
//! - Pure, stateless-at-evaluation-time decisions over an immutable
//!   `AccessPolicy` built once by the owning service registry entry
//! - Exact, case-sensitive attribute matching; a multi-valued attribute
//!   satisfies a requirement when any one of its values is accepted
//! - Denials surface as `false` plus a structured audit event; only an
//!   absent service identity is an error
//! - Audit emission through an injected `AuditSink`, no process-wide state

pub mod error;
pub mod matching;
pub mod strategy;
pub mod types;

// Re-export primary types for convenience
pub use error::{AuthzError, AuthzResult};
pub use matching::{evaluate_required_attributes, AccessVerdict, GrantBasis};
pub use strategy::{AuditSink, AuthorizationStrategy, InMemoryAuditSink};
pub use types::{AccessPolicy, AccessPolicyBuilder, AuthzAuditEvent, AuthzAuditEventKind};
