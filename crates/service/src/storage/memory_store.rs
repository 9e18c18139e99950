use std::{borrow::Borrow, collections::HashMap, hash::Hash};
use tokio::sync::RwLock;

use models::Record;

/// Generic in-memory key-value store.
///
/// Holds a `HashMap<K, V>` behind an async lock. Reads hand out clones, so
/// callers never get a live view into the map.
pub struct MemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }
}

impl<V: Record> MemoryStore<String, V> {
    /// Seed a store keyed by each record's id. Later duplicates overwrite earlier ones.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let map = records.into_iter().map(|r| (r.id().to_string(), r)).collect();
        Self { inner: RwLock::new(map) }
    }
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or overwrite a value.
    pub async fn put(&self, key: K, value: V) {
        let mut map = self.inner.write().await;
        map.insert(key, value);
    }

    /// Remove a key; returns whether it existed.
    pub async fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut map = self.inner.write().await;
        map.remove(key).is_some()
    }

    /// Snapshot of every value.
    pub async fn all(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// List all entries as `(key, value)` pairs.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Apply `f` to a copy of the entry and write the copy back only if `f`
    /// succeeds. Returns `None` when the key is absent.
    ///
    /// The entry is either fully updated or left untouched.
    pub async fn update_entry<Q, T, E, F>(&self, key: &Q, f: F) -> Option<Result<T, E>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(&mut V) -> Result<T, E>,
    {
        let mut map = self.inner.write().await;
        let slot = map.get_mut(key)?;
        let mut draft = slot.clone();
        Some(f(&mut draft).map(|out| {
            *slot = draft;
            out
        }))
    }

    /// Apply a mutation to the underlying map under one write lock.
    ///
    /// `f` must perform all of its checks before it mutates, so that an `Err`
    /// leaves the map as it was.
    pub async fn update_map<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<T, E>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::site::CulturalHeritage;

    #[tokio::test]
    async fn memory_store_crud() {
        let store = MemoryStore::<String, String>::new();

        // initially empty
        assert!(store.is_empty().await);

        store.put("a".into(), "1".into()).await;
        store.put("b".into(), "2".into()).await;
        assert_eq!(store.get("a").await.as_deref(), Some("1"));

        // overwrite
        store.put("a".into(), "10".into()).await;
        assert_eq!(store.get("a").await.as_deref(), Some("10"));
        assert_eq!(store.len().await, 2);

        assert!(store.remove("b").await);
        assert!(!store.remove("b").await);
        assert!(store.get("b").await.is_none());
    }

    #[tokio::test]
    async fn snapshot_is_detached_from_store() {
        let store = MemoryStore::<String, String>::new();
        store.put("a".into(), "1".into()).await;

        let mut snapshot = store.all().await;
        snapshot[0].push_str("-changed");
        snapshot.clear();

        assert_eq!(store.get("a").await.as_deref(), Some("1"));
        assert_eq!(store.list().await, vec![("a".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn failed_entry_update_leaves_record_untouched() {
        let store = MemoryStore::from_records(vec![CulturalHeritage::new("CG001", "Colosseum", "Rome")]);

        let res = store
            .update_entry("CG001", |site| {
                site.name = "Half-written".into();
                Err::<(), _>("rejected")
            })
            .await;
        assert_eq!(res, Some(Err("rejected")));
        assert_eq!(store.get("CG001").await.unwrap().name, "Colosseum");

        let res = store
            .update_entry("CG001", |site| {
                site.city = "Roma".into();
                Ok::<_, ()>(site.city.clone())
            })
            .await;
        assert_eq!(res, Some(Ok("Roma".to_string())));
        assert_eq!(store.get("CG001").await.unwrap().city, "Roma");

        assert!(store.update_entry("XXXX", |_| Ok::<(), ()>(())).await.is_none());
    }

    #[tokio::test]
    async fn seeding_keys_records_by_id() {
        let store = MemoryStore::from_records(vec![
            CulturalHeritage::new("CG001", "Colosseum", "Rome"),
            CulturalHeritage::new("CG002", "Uffizi", "Florence"),
        ]);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("CG002").await.unwrap().city, "Florence");
    }
}
