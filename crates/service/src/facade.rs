//! Unreliable remote-operation facade.
//!
//! Every call runs the same sequence: check the simulated connection, wait
//! out the simulated latency, then touch the store. A failed check returns
//! before the store is read or written. Mutations are committed as the last
//! step of a call with no await after them, so a call dropped mid-flight has
//! either committed in full or not at all.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::Record;

use crate::errors::ServiceError;
use crate::failure::FailureInjectionPolicy;
use crate::latency::LatencyProfile;
use crate::storage::MemoryStore;

pub struct RemoteFacade<V: Record> {
    store: Arc<MemoryStore<String, V>>,
    policy: Arc<dyn FailureInjectionPolicy>,
    latency: LatencyProfile,
}

impl<V: Record> Clone for RemoteFacade<V> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), policy: Arc::clone(&self.policy), latency: self.latency.clone() }
    }
}

impl<V: Record> RemoteFacade<V> {
    pub fn new(store: Arc<MemoryStore<String, V>>, policy: Arc<dyn FailureInjectionPolicy>, latency: LatencyProfile) -> Self {
        Self { store, policy, latency }
    }

    /// Direct access to the backing store, bypassing the simulated channel.
    pub fn store(&self) -> &Arc<MemoryStore<String, V>> {
        &self.store
    }

    fn require_confirmation(operation: &str, confirmed: bool) -> Result<(), ServiceError> {
        if confirmed {
            Ok(())
        } else {
            Err(ServiceError::NotConfirmed(format!("{operation} requires confirmation")))
        }
    }

    async fn connect(&self, operation: &str) -> Result<(), ServiceError> {
        if self.policy.should_fail(operation) {
            warn!(operation, kind = V::KIND, "simulated connection failure");
            return Err(ServiceError::server_rejected(operation));
        }
        let delay = self.latency.delay_for(operation);
        if !delay.is_zero() {
            debug!(operation, delay_ms = delay.as_millis() as u64, "simulated latency");
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    /// Fetch one record by id.
    #[instrument(skip(self), fields(kind = V::KIND))]
    pub async fn fetch(&self, operation: &str, id: &str) -> Result<V, ServiceError> {
        self.connect(operation).await?;
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found(V::KIND, id))
    }

    /// All records matching `predicate`, ordered by id.
    #[instrument(skip(self, predicate), fields(kind = V::KIND))]
    pub async fn search<P>(&self, operation: &str, predicate: P) -> Result<Vec<V>, ServiceError>
    where
        P: Fn(&V) -> bool,
    {
        self.connect(operation).await?;
        let mut found: Vec<V> = self.store.all().await.into_iter().filter(|r| predicate(r)).collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(found)
    }

    /// Insert a new record; an existing id is a conflict. The record is
    /// validated once the connection check has passed.
    #[instrument(skip(self, record), fields(kind = V::KIND, id = record.id()))]
    pub async fn insert(&self, operation: &str, record: V, confirmed: bool) -> Result<V, ServiceError> {
        Self::require_confirmation(operation, confirmed)?;
        self.connect(operation).await?;
        record.validate()?;
        let out = self
            .store
            .update_map(|map| {
                if map.contains_key(record.id()) {
                    return Err(ServiceError::conflict(format!("{} {} already exists", V::KIND, record.id())));
                }
                map.insert(record.id().to_string(), record.clone());
                Ok(record)
            })
            .await?;
        info!(operation, id = out.id(), "record inserted");
        Ok(out)
    }

    /// Mutate a record in place. `f` works on a draft that is validated and
    /// committed only if both `f` and validation succeed.
    #[instrument(skip(self, f), fields(kind = V::KIND))]
    pub async fn modify<T, F>(&self, operation: &str, id: &str, confirmed: bool, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut V) -> Result<T, ServiceError>,
    {
        Self::require_confirmation(operation, confirmed)?;
        self.connect(operation).await?;
        let out = self
            .store
            .update_entry(id, |draft| {
                let out = f(draft)?;
                draft.validate()?;
                Ok::<T, ServiceError>(out)
            })
            .await
            .ok_or_else(|| ServiceError::not_found(V::KIND, id))??;
        info!(operation, id, "record updated");
        Ok(out)
    }

    /// Remove a record once `guard` accepts it; returns the removed record.
    #[instrument(skip(self, guard), fields(kind = V::KIND))]
    pub async fn delete_if<G>(&self, operation: &str, id: &str, confirmed: bool, guard: G) -> Result<V, ServiceError>
    where
        G: FnOnce(&V) -> Result<(), ServiceError>,
    {
        Self::require_confirmation(operation, confirmed)?;
        self.connect(operation).await?;
        let removed = self
            .store
            .update_map(|map| {
                let current = map.get(id).ok_or_else(|| ServiceError::not_found(V::KIND, id))?;
                guard(current)?;
                map.remove(id).ok_or_else(|| ServiceError::not_found(V::KIND, id))
            })
            .await?;
        info!(operation, id, "record deleted");
        Ok(removed)
    }

    pub async fn delete(&self, operation: &str, id: &str, confirmed: bool) -> Result<V, ServiceError> {
        self.delete_if(operation, id, confirmed, |_| Ok(())).await
    }
}
