use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use super::Store;

/// In-memory store for tests/dev and the default server wiring.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<Rows<K, V>>,
}

#[derive(Debug)]
struct Rows<K, V> {
    order: Vec<K>,
    rows: HashMap<K, V>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                order: Vec::new(),
                rows: HashMap::new(),
            }),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read().ok()?;
        inner.rows.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.rows.insert(key.clone(), value).is_none() {
                inner.order.push(key);
            }
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write().ok()?;
        let removed = inner.rows.remove(key)?;
        inner.order.retain(|k| k != key);
        Some(removed)
    }

    fn list(&self) -> Vec<V> {
        let inner = match self.inner.read() {
            Ok(i) => i,
            Err(_) => return vec![],
        };

        inner
            .order
            .iter()
            .filter_map(|k| inner.rows.get(k).cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.read().map(|i| i.rows.len()).unwrap_or(0)
    }
}
