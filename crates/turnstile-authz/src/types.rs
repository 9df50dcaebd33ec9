use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use turnstile_core::{DenyReason, ServiceId, Timestamp};

// ---------------------------------------------------------------------------
// AccessPolicy — per-service authorization configuration
// ---------------------------------------------------------------------------

/// The authorization configuration attached to one registered service.
///
/// Immutable once built. The owning registry entry changes policy by
/// replacing the whole record, never by mutating fields in place, so any
/// number of concurrent evaluations may read the same instance without
/// synchronization.
///
/// Equality and hashing cover all four fields, with map equality by
/// content; the registry layer relies on this for change detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// May the service use the broker at all?
    #[serde(default = "default_true")]
    enabled: bool,

    /// May the service take part in transparent single sign-on?
    #[serde(default = "default_true")]
    sso_enabled: bool,

    /// Aggregation mode for the required-attribute check: when set, every
    /// required attribute name must be present on the principal.
    #[serde(default = "default_true")]
    require_all_attributes: bool,

    /// Attribute names the principal must carry, each mapped to the set of
    /// values accepted for that name.
    #[serde(default)]
    required_attributes: BTreeMap<String, BTreeSet<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            sso_enabled: true,
            require_all_attributes: true,
            required_attributes: BTreeMap::new(),
        }
    }
}

impl AccessPolicy {
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder {
            policy: AccessPolicy::default(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn sso_enabled(&self) -> bool {
        self.sso_enabled
    }

    pub fn require_all_attributes(&self) -> bool {
        self.require_all_attributes
    }

    pub fn required_attributes(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.required_attributes
    }
}

/// Builder producing an immutable `AccessPolicy`.
///
/// Construction happens once, inside the registry, before the record is
/// shared with concurrent evaluations; there are no setters afterwards.
#[derive(Debug, Clone)]
pub struct AccessPolicyBuilder {
    policy: AccessPolicy,
}

impl AccessPolicyBuilder {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.policy.enabled = enabled;
        self
    }

    pub fn sso_enabled(mut self, sso_enabled: bool) -> Self {
        self.policy.sso_enabled = sso_enabled;
        self
    }

    pub fn require_all_attributes(mut self, require_all: bool) -> Self {
        self.policy.require_all_attributes = require_all;
        self
    }

    /// Adds one required attribute name with its accepted value set.
    /// Duplicate values collapse; a repeated name replaces the earlier set.
    pub fn required_attribute<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy
            .required_attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> AccessPolicy {
        self.policy
    }
}

// ---------------------------------------------------------------------------
// Audit types
// ---------------------------------------------------------------------------

/// Types of auditable events emitted by the authorization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthzAuditEventKind {
    /// A disabled service attempted to use the broker.
    ServiceDisabled,
    /// A service barred from SSO attempted transparent sign-on.
    SsoDisallowed,
    /// A principal failed the service's required-attribute policy.
    AccessDenied,
}

/// A structured audit event describing one denial.
///
/// The boolean returned to the pipeline does not say why access was
/// refused; the `deny_reason` here does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthzAuditEvent {
    pub kind: AuthzAuditEventKind,
    pub timestamp: Timestamp,
    pub service: ServiceId,
    pub deny_reason: Option<DenyReason>,
    pub detail: Option<String>,
}
