use thiserror::Error;

use crate::dispatcher::CallHandle;

/// Errors raised before a call is dispatched, or when addressing a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{operation}: missing argument <{name}>")]
    MissingArgument { operation: &'static str, name: &'static str },
    #[error("{operation}: invalid <{name}> '{value}'")]
    InvalidArgument { operation: &'static str, name: &'static str, value: String },
    #[error("{0} is already in progress")]
    Busy(&'static str),
    #[error("no call in flight with handle {0}")]
    UnknownCall(CallHandle),
}
