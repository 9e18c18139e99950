//! Service layer: in-memory stores behind a simulated unreliable remote channel.
//! - `storage` holds the records.
//! - `facade` adds failure injection, latency and the error taxonomy.
//! - `services` expose the ETOUR/SMOS use cases as typed operations returning DTOs.

pub mod errors;
pub mod storage;
pub mod failure;
pub mod latency;
pub mod facade;
pub mod ops;
pub mod services;
pub mod registry;
#[cfg(test)]
pub mod test_support;

pub use errors::{ErrorKind, InterruptReason, ServiceError};
pub use registry::Services;
