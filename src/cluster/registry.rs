use std::collections::HashMap;

use super::connector::PeerClient;

/// Address-keyed map of cluster peers.
///
/// Invariants:
/// - the node's own address is always present, mapped to `None`, the
///   sentinel that lets fan-out and join skip self;
/// - every other entry holds a live handle. There is no "known dead but
///   retained" state: a peer that fails with a refused connection is
///   removed outright and never reconnected for the life of the process.
pub struct PeerRegistry {
    local_address: String,
    peers: HashMap<String, Option<PeerClient>>,
}

impl PeerRegistry {
    pub fn new(local_address: String) -> Self {
        let mut peers = HashMap::new();
        peers.insert(local_address.clone(), None);
        Self {
            local_address,
            peers,
        }
    }

    pub fn local_address(&self) -> &str {
        &self.local_address
    }

    /// Registers a peer handle, replacing any previous one for the same
    /// address. A re-joining node simply swaps in its new connection.
    pub fn insert(&mut self, address: String, client: PeerClient) {
        self.peers.insert(address, Some(client));
    }

    /// Evicts a peer. Permanent: nothing ever re-adds an address except
    /// an explicit join from that node.
    pub fn remove(&mut self, address: &str) {
        self.peers.remove(address);
    }

    pub fn contains(&self, address: &str) -> bool {
        self.peers.contains_key(address)
    }

    /// Live handle for `address`, if one is registered. The self entry
    /// yields `None`, same as an unknown address.
    pub fn get(&self, address: &str) -> Option<PeerClient> {
        self.peers.get(address).and_then(|client| client.clone())
    }

    /// Every known address, self included. This is the list handed to
    /// joining nodes.
    pub fn addresses(&self) -> Vec<String> {
        self.peers.keys().cloned().collect()
    }

    /// Snapshot of the live handles, skipping the self entry. Handles
    /// are cheap clones; the registry stays the owner of record.
    pub fn connected(&self) -> Vec<(String, PeerClient)> {
        self.peers
            .iter()
            .filter_map(|(addr, client)| {
                client
                    .as_ref()
                    .map(|c| (addr.clone(), c.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
