use anyhow::Context;

use super::node::Node;

impl Node {
    /// Brings this node into the cluster.
    ///
    /// Without a seed the node starts as the sole member of a fresh
    /// cluster and there is nothing to do; the registry already holds
    /// the self entry. With a seed:
    ///
    /// 1. build a handle to the seed and register it;
    /// 2. fetch the seed's cluster view (store snapshot + peer list);
    /// 3. adopt the store, remote values winning on overlap;
    /// 4. connect to every peer in the view we don't already know, and
    ///    introduce ourselves to all of them so each member registers
    ///    us back, restoring full-mesh symmetry with the cluster grown
    ///    by one.
    ///
    /// Every failure in this sequence is fatal to the caller. Serving
    /// with a partially joined membership view would leave the cluster
    /// permanently asymmetric, so the process must not come up at all.
    pub async fn bootstrap(&self, seed: Option<&str>) -> anyhow::Result<()> {
        let seed = match seed {
            Some(seed) => seed,
            None => {
                tracing::info!("no seed given, starting a new cluster");
                return Ok(());
            }
        };

        tracing::info!("joining cluster via {}", seed);

        let seed_client = self
            .connector
            .connect(seed)
            .with_context(|| format!("failed to connect to seed {}", seed))?;

        {
            let mut state = self.state.write().await;
            state.peers.insert(seed.to_string(), seed_client.clone());
        }

        let info = seed_client
            .cluster_info()
            .await
            .context("could not fetch cluster info from seed")?;

        tracing::info!(
            "cluster view: {} keys, {} peers",
            info.store.len(),
            info.peers.len()
        );

        let mut state = self.state.write().await;
        state.store.merge(info.store);

        for address in info.peers {
            // The view may list us if the seed already heard about this
            // node somehow; never connect to ourselves.
            if address == self.address() {
                continue;
            }

            let client = match state.peers.get(&address) {
                Some(client) => client,
                None => {
                    let client = self
                        .connector
                        .connect(&address)
                        .with_context(|| format!("failed to connect to peer {}", address))?;
                    state.peers.insert(address.clone(), client.clone());
                    client
                }
            };

            // Every peer in the view gets a join call, the seed
            // included. This is what makes membership symmetric: each
            // existing member registers the newcomer in turn.
            tracing::info!("contacting peer {}", address);
            client
                .join(self.address())
                .await
                .with_context(|| format!("failed to register with peer {}", address))?;
        }

        tracing::info!("cluster joined, {} members known", state.peers.len());
        Ok(())
    }
}
