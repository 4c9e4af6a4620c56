use super::connector::RpcError;
use super::node::Node;

impl Node {
    /// Client-facing write: replicate to every peer, then commit.
    ///
    /// The write guard is held across the whole fan-out, so writes are
    /// serialized with each other, with replica applies and with joins.
    /// The fan-out itself is a sequential loop of independent calls;
    /// there is no coordination between peers and no rollback.
    ///
    /// Failure handling per peer:
    /// - refused connection: the peer is gone for good; evict it and
    ///   carry on with the rest;
    /// - anything else (timeout, bad status, transport error): abort
    ///   the write without committing locally and surface the error.
    ///   Peers written before the abort keep the new value while later
    ///   peers and the local store never see it.
    pub async fn write(&self, key: String, value: String) -> Result<(), RpcError> {
        let mut state = self.state.write().await;

        for (address, peer) in state.peers.connected() {
            tracing::info!("replicating to {}", address);

            match peer.server_write(&key, &value).await {
                Ok(()) => {}
                Err(err) if err.is_unreachable() => {
                    tracing::warn!("peer {} is disconnected, dropping peer", address);
                    state.peers.remove(&address);
                }
                Err(err) => {
                    tracing::error!("failed to replicate to {}: {}", address, err);
                    return Err(err);
                }
            }
        }

        state.store.insert(key, value);
        Ok(())
    }
}
