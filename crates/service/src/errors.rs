use std::fmt;

use serde::Serialize;
use thiserror::Error;

use models::errors::ModelError;

/// Why a simulated remote call did not produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptReason {
    /// The remote side dropped the connection (failure injection).
    ServerRejected,
    /// The caller-side watchdog fired before an answer arrived.
    TimedOut,
    /// The caller withdrew the request before it committed.
    Cancelled,
}

impl fmt::Display for InterruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterruptReason::ServerRejected => "server rejected",
            InterruptReason::TimedOut => "timed out",
            InterruptReason::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Flat error category handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ConnectionInterrupted,
    Validation,
    NotConfirmed,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("connection interrupted ({reason}): {message}")]
    ConnectionInterrupted { reason: InterruptReason, message: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("operation not confirmed: {0}")]
    NotConfirmed(String),
    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{entity} {id} not found")) }

    pub fn interrupted(reason: InterruptReason, message: impl Into<String>) -> Self {
        Self::ConnectionInterrupted { reason, message: message.into() }
    }

    pub fn server_rejected(operation: &str) -> Self {
        Self::interrupted(
            InterruptReason::ServerRejected,
            format!("connection to the server was interrupted during {operation}"),
        )
    }

    pub fn timed_out(operation: &str, after: std::time::Duration) -> Self {
        Self::interrupted(
            InterruptReason::TimedOut,
            format!("no answer to {operation} within {}s", after.as_secs_f32()),
        )
    }

    pub fn cancelled(operation: &str) -> Self {
        Self::interrupted(InterruptReason::Cancelled, format!("{operation} was cancelled before it completed"))
    }

    pub fn conflict(msg: impl Into<String>) -> Self { Self::Conflict(msg.into()) }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::ConnectionInterrupted { .. } => ErrorKind::ConnectionInterrupted,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotConfirmed(_) => ErrorKind::NotConfirmed,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
        }
    }

    pub fn reason(&self) -> Option<InterruptReason> {
        match self {
            ServiceError::ConnectionInterrupted { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 2001,
            ServiceError::Validation(_) => 2002,
            ServiceError::NotConfirmed(_) => 2003,
            ServiceError::Conflict(_) => 2004,
            ServiceError::ConnectionInterrupted { reason, .. } => match reason {
                InterruptReason::ServerRejected => 2101,
                InterruptReason::TimedOut => 2102,
                InterruptReason::Cancelled => 2103,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timeout_and_server_failure_share_one_kind() {
        let a = ServiceError::server_rejected("view-site");
        let b = ServiceError::timed_out("view-site", Duration::from_secs(5));
        assert_eq!(a.kind(), ErrorKind::ConnectionInterrupted);
        assert_eq!(b.kind(), ErrorKind::ConnectionInterrupted);
        assert_eq!(a.reason(), Some(InterruptReason::ServerRejected));
        assert_eq!(b.reason(), Some(InterruptReason::TimedOut));
        assert_ne!(a.code(), b.code());
        assert_eq!(b.to_string(), "connection interrupted (timed out): no answer to view-site within 5s");
    }

    #[test]
    fn model_validation_maps_to_validation_kind() {
        let err: ServiceError = ModelError::invalid("rating 7 outside 0.0..=5.0").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.reason().is_none());
    }
}
