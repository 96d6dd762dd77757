use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{PasteStore, StoreError, StoreResult};

/// Process-local store; contents are lost on exit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pastes: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub async fn len(&self) -> usize {
        self.pastes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pastes.lock().await.is_empty()
    }
}

impl PasteStore for MemoryStore {
    async fn insert(&self, slug: &str, content: &str) -> StoreResult<()> {
        match self.pastes.lock().await.entry(slug.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(entry) => {
                entry.insert(content.to_owned());
                Ok(())
            }
        }
    }

    async fn lookup(&self, slug: &str) -> StoreResult<Option<String>> {
        Ok(self.pastes.lock().await.get(slug).cloned())
    }
}
