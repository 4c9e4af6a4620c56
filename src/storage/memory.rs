use std::collections::HashMap;

/// Node-local key-value table.
///
/// Every node in the cluster holds a full replica of every key, so this
/// is a flat map with no partitioning dimension. It carries no lock of
/// its own: all access goes through the owning node's state lock, which
/// also covers the peer registry.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Looks up a key. `None` means the key was never written here;
    /// callers that speak the wire protocol flatten this to the empty
    /// string, so an absent key and a stored empty value are
    /// indistinguishable to clients.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// Inserts or overwrites in place. Entries are never deleted.
    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// Merges another store's contents into this one. Incoming values
    /// win on overlapping keys; used when adopting the seed node's
    /// snapshot during a cluster join.
    pub fn merge(&mut self, entries: HashMap<String, String>) {
        for (key, value) in entries {
            self.entries.insert(key, value);
        }
    }

    /// Copies out the full table, for the cluster-info snapshot.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
