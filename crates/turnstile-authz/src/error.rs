use thiserror::Error;

/// Error enum for the authorization strategy operations.
///
/// The taxonomy is deliberately minimal. Empty policy, empty principal
/// attributes, and attribute-count mismatches are legitimate grant/deny
/// outcomes, never errors; the only fault is a caller contract violation.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A required service identity argument was absent where the contract
    /// demands one. Propagated to the caller immediately; never retried.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type AuthzResult<T> = Result<T, AuthzError>;
