//! End-to-end exercise of the authorization strategy as the SSO request
//! pipeline consumes it: service enablement and SSO eligibility when a
//! service is first referenced, then the required-attribute check when a
//! ticket is about to be granted.

use turnstile_authz::{
    AccessPolicy, AuthorizationStrategy, AuthzAuditEventKind, AuthzError, InMemoryAuditSink,
};
use turnstile_core::{AttributeValue, DenyReason, PrincipalAttributes, ServiceId};

fn resolved_attributes() -> PrincipalAttributes {
    let mut attributes = PrincipalAttributes::new();
    attributes.insert("dept", "eng");
    attributes.insert("role", AttributeValue::from_values(["user", "ops"]));
    attributes.insert("site", "hq");
    attributes
}

#[test]
fn full_pipeline_grants_a_conforming_principal() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::builder()
        .required_attribute("dept", ["eng", "research"])
        .required_attribute("role", ["ops", "admin"])
        .build();
    let strategy = AuthorizationStrategy::new(&policy, &sink);
    let service = ServiceId::new("https://wiki.example.org");

    assert!(strategy.is_service_authorized(&service));
    assert!(strategy.is_service_authorized_for_sso(&service).unwrap());
    assert!(strategy
        .is_service_access_authorized_for_principal(&resolved_attributes(), &service)
        .unwrap());

    assert!(sink.events().is_empty());
}

#[test]
fn full_pipeline_refuses_a_fully_locked_down_service() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::builder()
        .enabled(false)
        .sso_enabled(false)
        .required_attribute("clearance", ["secret"])
        .build();
    let strategy = AuthorizationStrategy::new(&policy, &sink);
    let service = ServiceId::new("https://vault.example.org");

    assert!(!strategy.is_service_authorized(&service));
    assert!(!strategy.is_service_authorized_for_sso(&service).unwrap());
    assert!(!strategy
        .is_service_access_authorized_for_principal(&resolved_attributes(), &service)
        .unwrap());

    let kinds: Vec<_> = sink.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AuthzAuditEventKind::ServiceDisabled,
            AuthzAuditEventKind::SsoDisallowed,
            AuthzAuditEventKind::AccessDenied,
        ]
    );
    assert!(sink.events().iter().all(|e| e.service == service));
}

#[test]
fn audit_trail_names_the_denied_service_and_reason() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::builder()
        .require_all_attributes(false)
        .required_attribute("group", ["wheel"])
        .build();
    let strategy = AuthorizationStrategy::new(&policy, &sink);
    let service = ServiceId::new("https://admin.example.org");

    let granted = strategy
        .is_service_access_authorized_for_principal(&resolved_attributes(), &service)
        .unwrap();
    assert!(!granted);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].service.as_str(), "https://admin.example.org");
    assert_eq!(
        events[0].deny_reason,
        Some(DenyReason::AttributeValueMismatch)
    );
}

#[test]
fn absent_service_identity_is_a_contract_violation() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::default();
    let strategy = AuthorizationStrategy::new(&policy, &sink);
    let absent = ServiceId::new("");

    let sso = strategy.is_service_authorized_for_sso(&absent);
    assert!(matches!(sso, Err(AuthzError::InvalidRequest(_))));

    let access = strategy.is_service_access_authorized_for_principal(&resolved_attributes(), &absent);
    assert!(matches!(access, Err(AuthzError::InvalidRequest(_))));

    // Contract violations are not policy denials; no audit events.
    assert!(sink.events().is_empty());
}

#[test]
fn concurrent_evaluations_share_one_policy_without_synchronization() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::builder()
        .required_attribute("dept", ["eng"])
        .required_attribute("role", ["ops"])
        .build();
    let strategy = AuthorizationStrategy::new(&policy, &sink);

    std::thread::scope(|scope| {
        for i in 0..8 {
            let strategy = &strategy;
            scope.spawn(move || {
                let service = ServiceId::new(format!("https://app-{i}.example.org"));
                assert!(strategy.is_service_authorized(&service));
                assert!(strategy
                    .is_service_access_authorized_for_principal(&resolved_attributes(), &service)
                    .unwrap());
            });
        }
    });

    assert!(sink.events().is_empty());
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let sink = InMemoryAuditSink::new();
    let policy = AccessPolicy::builder()
        .required_attribute("role", ["admin"])
        .build();
    let strategy = AuthorizationStrategy::new(&policy, &sink);
    let service = ServiceId::new("https://app.example.org");
    let attributes = resolved_attributes();

    let first = strategy
        .is_service_access_authorized_for_principal(&attributes, &service)
        .unwrap();
    let second = strategy
        .is_service_access_authorized_for_principal(&attributes, &service)
        .unwrap();
    assert_eq!(first, second);
}
