//! Per-user state lives behind [`KeyValueStore`] so handlers never touch a
//! global map. [`MemoryStore`] keeps everything in process memory and forgets
//! it on restart.

use std::collections::HashMap;
use std::hash::Hash;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::BotResult;

#[async_trait]
pub trait KeyValueStore<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> BotResult<Option<V>>;

    /// Insert or overwrite the value for `key`.
    async fn set(&self, key: K, value: V) -> BotResult<()>;

    /// Remove `key`, returning the value it held.
    async fn delete(&self, key: &K) -> BotResult<Option<V>>;
}

#[derive(Debug)]
pub struct MemoryStore<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> KeyValueStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> BotResult<Option<V>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: K, value: V) -> BotResult<()> {
        self.entries.write().await.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &K) -> BotResult<Option<V>> {
        Ok(self.entries.write().await.remove(key))
    }
}
