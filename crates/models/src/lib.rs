//! Domain records for the ETOUR and SMOS use cases.
//!
//! Records are plain data with field-level checks. Each type implements
//! [`Record`] so the service layer can store, look up and validate it
//! without knowing the concrete shape.

pub mod errors;
pub mod site;
pub mod account;
pub mod point;
pub mod convention;
pub mod address;
pub mod report_card;
pub mod seed;

use errors::ModelError;

/// A record owned by a single in-memory store and keyed by a string id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Field-level checks; called before a record enters a store.
    fn validate(&self) -> Result<(), ModelError>;
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(format!("{field} required")));
    }
    Ok(())
}
