#![cfg(test)]
use std::sync::Arc;

use models::Record;

use crate::facade::RemoteFacade;
use crate::failure::FailureSwitch;
use crate::latency::LatencyProfile;
use crate::storage::MemoryStore;

/// Zero-latency facade over `records` plus the switch that drives its failures.
pub fn facade_for<V: Record>(records: Vec<V>) -> (RemoteFacade<V>, Arc<FailureSwitch>) {
    let switch = Arc::new(FailureSwitch::new(false));
    let store = Arc::new(MemoryStore::from_records(records));
    (RemoteFacade::new(store, switch.clone(), LatencyProfile::none()), switch)
}
