use std::sync::Mutex;

use turnstile_core::{DenyReason, PrincipalAttributes, ServiceId, Timestamp};

use crate::error::{AuthzError, AuthzResult};
use crate::matching::{evaluate_required_attributes, AccessVerdict, GrantBasis};
use crate::types::{AccessPolicy, AuthzAuditEvent, AuthzAuditEventKind};

// ---------------------------------------------------------------------------
// AuditSink trait — authorization audit event emission
// ---------------------------------------------------------------------------

/// Trait for emitting authorization audit events.
///
/// Injected into the strategy at construction; the component keeps no
/// process-wide logging state of its own. A sink failure never changes a
/// decision outcome.
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: &AuthzAuditEvent) -> Result<(), String>;
}

/// In-memory audit sink for testing.
#[derive(Default)]
pub struct InMemoryAuditSink {
    events: Mutex<Vec<AuthzAuditEvent>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<AuthzAuditEvent> {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .clear();
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: &AuthzAuditEvent) -> Result<(), String> {
        self.events
            .lock()
            .map_err(|_| "audit sink lock poisoned".to_string())?
            .push(event.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AuthorizationStrategy — the decision surface
// ---------------------------------------------------------------------------

/// The authorization decision component consulted by the SSO request
/// pipeline: once when a service is first referenced (enablement and SSO
/// eligibility) and once when a ticket is about to be granted (the
/// required-attribute check).
///
/// Every operation is a pure function of its inputs and the immutable
/// policy; no state is retained between calls, and concurrent evaluation
/// against the same policy needs no synchronization.
pub struct AuthorizationStrategy<'a> {
    policy: &'a AccessPolicy,
    audit_sink: &'a dyn AuditSink,
}

impl<'a> AuthorizationStrategy<'a> {
    pub fn new(policy: &'a AccessPolicy, audit_sink: &'a dyn AuditSink) -> Self {
        Self { policy, audit_sink }
    }

    /// Whether the service may use the broker at all.
    ///
    /// Returns the policy's `enabled` flag verbatim. Total function; a
    /// disabled service produces a diagnostic and an audit event, never an
    /// error.
    pub fn is_service_authorized(&self, service: &ServiceId) -> bool {
        if !self.policy.enabled() {
            tracing::warn!(service = %service, "service is not enabled in the service registry");
            self.emit_denial(
                AuthzAuditEventKind::ServiceDisabled,
                service,
                DenyReason::ServiceDisabled,
                None,
            );
        }
        self.policy.enabled()
    }

    /// Whether the service may take part in transparent single sign-on.
    ///
    /// Returns the policy's `sso_enabled` flag verbatim. The service
    /// identity must be present; an empty id is a caller contract
    /// violation.
    pub fn is_service_authorized_for_sso(&self, service: &ServiceId) -> AuthzResult<bool> {
        require_service(service)?;
        if !self.policy.sso_enabled() {
            tracing::warn!(service = %service, "service may not take part in single sign-on");
            self.emit_denial(
                AuthzAuditEventKind::SsoDisallowed,
                service,
                DenyReason::SsoDisallowed,
                None,
            );
        }
        Ok(self.policy.sso_enabled())
    }

    /// Whether the principal's resolved attributes satisfy the service's
    /// required-attribute policy.
    ///
    /// Decision order and matching semantics live in
    /// [`evaluate_required_attributes`]; this operation adds the service
    /// identity check, diagnostics, and the audit event on denial.
    pub fn is_service_access_authorized_for_principal(
        &self,
        attributes: &PrincipalAttributes,
        service: &ServiceId,
    ) -> AuthzResult<bool> {
        require_service(service)?;

        match evaluate_required_attributes(self.policy, attributes) {
            AccessVerdict::Grant(GrantBasis::NoRequiredAttributes) => {
                tracing::debug!(service = %service, "no required attributes are specified");
                Ok(true)
            }
            AccessVerdict::Grant(GrantBasis::ValueMatch { attribute }) => {
                tracing::info!(
                    service = %service,
                    attribute = %attribute,
                    "principal is authorized to access service"
                );
                Ok(true)
            }
            AccessVerdict::Deny(reason) => {
                let detail = denial_detail(reason);
                tracing::warn!(service = %service, reason = %reason, "{}", detail);
                self.emit_denial(
                    AuthzAuditEventKind::AccessDenied,
                    service,
                    reason,
                    Some(detail.to_string()),
                );
                tracing::info!(service = %service, "principal is denied access to service");
                Ok(false)
            }
        }
    }

    fn emit_denial(
        &self,
        kind: AuthzAuditEventKind,
        service: &ServiceId,
        reason: DenyReason,
        detail: Option<String>,
    ) {
        let event = AuthzAuditEvent {
            kind,
            timestamp: Timestamp::now(),
            service: service.clone(),
            deny_reason: Some(reason),
            detail,
        };
        // A refused audit event must not turn a policy outcome into an
        // error; it degrades to a diagnostic.
        if let Err(e) = self.audit_sink.emit(&event) {
            tracing::warn!(service = %service, error = %e, "audit sink rejected event");
        }
    }
}

fn require_service(service: &ServiceId) -> AuthzResult<()> {
    if service.is_empty() {
        return Err(AuthzError::InvalidRequest(
            "service id must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn denial_detail(reason: DenyReason) -> &'static str {
    match reason {
        DenyReason::ServiceDisabled => "service is not enabled in the service registry",
        DenyReason::SsoDisallowed => "service may not take part in single sign-on",
        DenyReason::PrincipalAttributesEmpty => {
            "no principal attributes are available to satisfy attribute requirements"
        }
        DenyReason::AttributeShortfall => {
            "principal is not carrying enough attributes to satisfy requirements"
        }
        DenyReason::RequiredAttributeAbsent => {
            "not all required attributes are available to the principal"
        }
        DenyReason::AttributeValueMismatch => "no principal attribute value is accepted",
    }
}
