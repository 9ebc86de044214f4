use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Mutual exclusion keyed by merchant reference. Redeliveries for the same
/// payment serialize on one async mutex for the duration of a reconcile call;
/// distinct references never contend. Keys are lowercased to match the
/// case-insensitive reference comparison used everywhere else.
#[derive(Default)]
pub struct ReferenceLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ReferenceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, reference: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("reference lock table poisoned");
            // Entries nobody holds or awaits are dead weight.
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(reference.to_ascii_lowercase())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
