//! Required-attribute evaluation.
//!
//! Pure decision logic, separated from diagnostics and audit emission in
//! `strategy`. Everything here is a deterministic function of the policy
//! record and the supplied principal attributes.

use turnstile_core::{DenyReason, PrincipalAttributes};

use crate::types::AccessPolicy;

/// Outcome of evaluating a principal against a required-attribute policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessVerdict {
    Grant(GrantBasis),
    Deny(DenyReason),
}

impl AccessVerdict {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessVerdict::Grant(_))
    }
}

/// Why a grant verdict was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantBasis {
    /// The policy names no required attributes; nothing restricts access.
    NoRequiredAttributes,
    /// This attribute carried at least one accepted value.
    ValueMatch { attribute: String },
}

/// Evaluates the principal's attributes against the policy's required
/// attributes. Checks run in order; the first conclusive one wins:
///
/// 1. No required attributes configured: grant.
/// 2. No principal attributes at all: deny.
/// 3. Fewer principal attribute names than required names: deny. The
///    principal cannot be carrying enough distinct names to ever satisfy
///    every requirement.
/// 4. In require-all mode, deny unless every required name is present on
///    the principal.
/// 5. Grant on the first present name whose distinct values intersect its
///    accepted set. Remaining names are not value-checked, even in
///    require-all mode; require-all governs name presence only.
/// 6. No name produced an intersection: deny.
///
/// Value comparison is exact and case-sensitive. The grant/deny outcome is
/// independent of iteration order: a grant occurs iff some present name
/// intersects its accepted set.
pub fn evaluate_required_attributes(
    policy: &AccessPolicy,
    principal: &PrincipalAttributes,
) -> AccessVerdict {
    let required = policy.required_attributes();
    if required.is_empty() {
        return AccessVerdict::Grant(GrantBasis::NoRequiredAttributes);
    }
    if principal.is_empty() {
        return AccessVerdict::Deny(DenyReason::PrincipalAttributesEmpty);
    }
    if principal.len() < required.len() {
        return AccessVerdict::Deny(DenyReason::AttributeShortfall);
    }

    // Required names the principal actually carries.
    let matched: Vec<&str> = required
        .keys()
        .map(String::as_str)
        .filter(|&name| principal.contains_name(name))
        .collect();

    if policy.require_all_attributes() && matched.len() < required.len() {
        return AccessVerdict::Deny(DenyReason::RequiredAttributeAbsent);
    }

    for name in matched {
        let accepted = &required[name];
        let Some(value) = principal.get(name) else {
            continue;
        };
        let available = value.distinct_values();
        if accepted.iter().any(|v| available.contains(v.as_str())) {
            return AccessVerdict::Grant(GrantBasis::ValueMatch {
                attribute: name.to_string(),
            });
        }
    }

    AccessVerdict::Deny(DenyReason::AttributeValueMismatch)
}
