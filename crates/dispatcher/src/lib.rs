//! Presentation-side wiring for the remote facade.
//!
//! A [`Dispatcher`] runs each operation on a background task under a
//! watchdog, keeps one call per operation in flight, and posts exactly one
//! [`Completion`] per call onto a queue the foreground drains into a
//! [`Presenter`].

pub mod errors;
pub mod operation;
pub mod dispatcher;
pub mod presenter;

pub use dispatcher::{CallHandle, CallInfo, Completion, Dispatcher};
pub use errors::DispatchError;
pub use operation::{Operation, Output};
pub use presenter::{drain, drain_outstanding, drain_ready, present, Presenter};
