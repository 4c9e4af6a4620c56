//! Storage Module Tests
//!
//! Validates the local key-value table mechanics: lookup, overwrite,
//! snapshot copies, and the remote-wins merge used during cluster join.
//!
//! *Note: replication and fan-out behavior live in the cluster module
//! and are exercised by the integration tests.*

#[cfg(test)]
mod tests {
    use crate::storage::memory::KeyValueStore;
    use std::collections::HashMap;

    #[test]
    fn test_new_store_is_empty() {
        let store = KeyValueStore::new();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let store = KeyValueStore::new();

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = KeyValueStore::new();

        store.insert("color".to_string(), "green".to_string());

        assert_eq!(store.get("color"), Some("green".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut store = KeyValueStore::new();

        store.insert("color".to_string(), "green".to_string());
        store.insert("color".to_string(), "blue".to_string());

        assert_eq!(
            store.get("color"),
            Some("blue".to_string()),
            "Later write should replace the earlier value"
        );
        assert_eq!(store.len(), 1, "Overwrite must not grow the table");
    }

    #[test]
    fn test_empty_string_value_is_storable() {
        let mut store = KeyValueStore::new();

        store.insert("blank".to_string(), String::new());

        // A stored empty string and an absent key differ only here, at
        // the map level; the wire protocol collapses both to "".
        assert_eq!(store.get("blank"), Some(String::new()));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut store = KeyValueStore::new();
        store.insert("a".to_string(), "1".to_string());

        let snapshot = store.snapshot();
        store.insert("b".to_string(), "2".to_string());

        assert_eq!(snapshot.len(), 1, "Snapshot should not see later writes");
        assert_eq!(snapshot.get("a"), Some(&"1".to_string()));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_remote_values_win() {
        let mut store = KeyValueStore::new();
        store.insert("shared".to_string(), "local".to_string());
        store.insert("mine".to_string(), "kept".to_string());

        let mut incoming = HashMap::new();
        incoming.insert("shared".to_string(), "remote".to_string());
        incoming.insert("theirs".to_string(), "new".to_string());

        store.merge(incoming);

        assert_eq!(
            store.get("shared"),
            Some("remote".to_string()),
            "Remote value should overwrite the local one"
        );
        assert_eq!(store.get("mine"), Some("kept".to_string()));
        assert_eq!(store.get("theirs"), Some("new".to_string()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut store = KeyValueStore::new();
        store.insert("a".to_string(), "1".to_string());

        store.merge(HashMap::new());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some("1".to_string()));
    }

    #[test]
    fn test_many_keys() {
        let mut store = KeyValueStore::new();

        for i in 0..100 {
            store.insert(format!("key-{:03}", i), format!("value-{}", i));
        }

        assert_eq!(store.len(), 100);
        for i in 0..100 {
            let key = format!("key-{:03}", i);
            assert_eq!(
                store.get(&key),
                Some(format!("value-{}", i)),
                "Key {} should exist",
                key
            );
        }
    }
}
