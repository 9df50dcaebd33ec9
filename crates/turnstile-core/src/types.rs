use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ServiceId — typed identifier for a protected service
// ---------------------------------------------------------------------------

/// Identifier of a service registered with the broker.
///
/// Opaque to the decision logic; it appears only in diagnostics and audit
/// events. An empty id stands for an absent service identity and is a
/// caller contract violation wherever an operation requires one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ServiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ServiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Timestamp — audit event time (seconds + nanoseconds)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds_since_epoch: u64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        Self {
            seconds_since_epoch: now.timestamp() as u64,
            nanoseconds: now.timestamp_subsec_nanos(),
        }
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            seconds_since_epoch: seconds,
            nanoseconds: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// DenyReason — why an authorization decision came out false
// ---------------------------------------------------------------------------

/// Structured cause attached to denial diagnostics and audit events.
///
/// The boolean surface of the decision operations deliberately does not
/// distinguish these; callers that need the distinction read it from the
/// audit event, not the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    /// The service is not enabled in the service registry.
    ServiceDisabled,
    /// The service may not take part in transparent single sign-on.
    SsoDisallowed,
    /// The policy names required attributes but the principal carries none.
    PrincipalAttributesEmpty,
    /// The principal carries fewer attribute names than the policy requires.
    AttributeShortfall,
    /// Require-all mode: at least one required attribute name is missing.
    RequiredAttributeAbsent,
    /// No present attribute had a value in its required value set.
    AttributeValueMismatch,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::ServiceDisabled => write!(f, "service_disabled"),
            DenyReason::SsoDisallowed => write!(f, "sso_disallowed"),
            DenyReason::PrincipalAttributesEmpty => write!(f, "principal_attributes_empty"),
            DenyReason::AttributeShortfall => write!(f, "attribute_shortfall"),
            DenyReason::RequiredAttributeAbsent => write!(f, "required_attribute_absent"),
            DenyReason::AttributeValueMismatch => write!(f, "attribute_value_mismatch"),
        }
    }
}
