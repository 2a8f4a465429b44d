//! Keyed memoization of asynchronous lookups with single-flight semantics.
//!
//! Each key is either pending (one shared in-flight future that every caller
//! awaits) or ready (the completed value, kept for the life of the memo).
//! A failed lookup is not memoized: the entry is dropped so the next caller
//! starts a fresh fetch.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

enum Slot<V, E> {
    Pending {
        generation: u64,
        fetch: SharedFetch<V, E>,
    },
    Ready(V),
}

pub struct SingleFlight<K, V, E> {
    slots: Mutex<HashMap<K, Slot<V, E>>>,
    next_generation: AtomicU64,
}

impl<K, V, E> SingleFlight<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Return the memoized value for `key`, joining an in-flight fetch if
    /// there is one and starting `fetch` otherwise.
    ///
    /// `fetch` is only invoked when neither a value nor a pending fetch
    /// exists for the key.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let (generation, pending) = {
            let mut slots = self.lock();
            match slots.get(&key) {
                Some(Slot::Ready(value)) => return Ok(value.clone()),
                Some(Slot::Pending { generation, fetch }) => (*generation, fetch.clone()),
                None => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let shared = fetch().boxed().shared();
                    slots.insert(
                        key.clone(),
                        Slot::Pending {
                            generation,
                            fetch: shared.clone(),
                        },
                    );
                    (generation, shared)
                }
            }
        };

        let result = pending.await;

        // Only the fetch that owns the slot may settle it; a newer fetch
        // started after an earlier failure keeps its own entry.
        let mut slots = self.lock();
        let owns_slot = matches!(
            slots.get(&key),
            Some(Slot::Pending { generation: g, .. }) if *g == generation
        );
        if owns_slot {
            match &result {
                Ok(value) => {
                    slots.insert(key, Slot::Ready(value.clone()));
                }
                Err(_) => {
                    slots.remove(&key);
                }
            }
        }

        result
    }

    /// Completed value for `key`, if any.  Never waits on a pending fetch.
    pub fn get(&self, key: &K) -> Option<V> {
        match self.lock().get(key) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        matches!(self.lock().get(key), Some(Slot::Pending { .. }))
    }

    /// Number of keys that are pending or ready.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V, E>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V, E> Default for SingleFlight<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
