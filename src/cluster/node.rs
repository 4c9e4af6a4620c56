use std::sync::Arc;

use tokio::sync::RwLock;

use super::connector::{PeerConnector, RpcError};
use super::protocol::ClusterInfoResponse;
use super::registry::PeerRegistry;
use crate::storage::memory::KeyValueStore;

/// Store and registry live behind one lock. Concurrent request handlers
/// all mutate through here, so the two structures share a single
/// mutual-exclusion domain: a write commit can never interleave with a
/// join insert or an eviction, and readers always see a consistent
/// pairing of store contents and peer list.
pub(crate) struct State {
    pub(crate) store: KeyValueStore,
    pub(crate) peers: PeerRegistry,
}

/// One cluster member: full store replica, peer registry, and the
/// connector used for every outbound call.
///
/// Lifecycle is bootstrapping -> serving. After `bootstrap` returns the
/// node handles reads, client writes and the intra-cluster RPCs
/// concurrently until the process exits; there is no shutdown path.
pub struct Node {
    address: String,
    pub(crate) connector: PeerConnector,
    pub(crate) state: RwLock<State>,
}

impl Node {
    /// Creates a node listening at `address`, sole member of its own
    /// cluster until `bootstrap` is pointed at a seed.
    pub fn new(address: String) -> anyhow::Result<Arc<Self>> {
        let connector = PeerConnector::new()?;
        let state = State {
            store: KeyValueStore::new(),
            peers: PeerRegistry::new(address.clone()),
        };
        Ok(Arc::new(Self {
            address,
            connector,
            state: RwLock::new(state),
        }))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Local read. Absent keys come back as the empty string; the
    /// protocol has no distinct not-found signal.
    pub async fn read(&self, key: &str) -> String {
        let state = self.state.read().await;
        state.store.get(key).unwrap_or_default()
    }

    /// Applies a write replicated from a peer. Unconditional overwrite,
    /// and deliberately no fan-out of its own: the originating node
    /// already reaches every member, so re-propagating here would echo
    /// through the mesh forever.
    pub async fn apply_replica(&self, key: String, value: String) {
        let mut state = self.state.write().await;
        state.store.insert(key, value);
    }

    /// Point-in-time snapshot of the store plus every known peer
    /// address (self included), handed to joining nodes. Best-effort:
    /// not atomic with respect to writes that land after the guard is
    /// released.
    pub async fn cluster_info(&self) -> ClusterInfoResponse {
        let state = self.state.read().await;
        ClusterInfoResponse {
            store: state.store.snapshot(),
            peers: state.peers.addresses(),
        }
    }

    /// Inbound join: a new node announced itself, register a handle to
    /// it. Overwrites any earlier handle for the same address, so a
    /// restarted node can re-join under its old name. A connector
    /// failure goes back to the caller as an RPC error.
    pub async fn accept_join(&self, address: &str) -> Result<(), RpcError> {
        let client = self.connector.connect(address)?;
        let mut state = self.state.write().await;
        tracing::info!("registering peer {}", address);
        state.peers.insert(address.to_string(), client);
        tracing::info!("cluster size now: {}", state.peers.len());
        Ok(())
    }

    /// Peer addresses currently known, self included.
    pub async fn peer_addresses(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.peers.addresses()
    }
}
