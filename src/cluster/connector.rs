use std::net::SocketAddr;
use std::time::Duration;

use super::protocol::{
    ClusterInfoResponse, JoinRequest, ServerWriteRequest, ValueResponse, WriteRequest,
    ENDPOINT_CLUSTER_INFO, ENDPOINT_JOIN, ENDPOINT_READ, ENDPOINT_SERVER_WRITE, ENDPOINT_WRITE,
};

/// Deadline applied to every outbound call. There is no retry and no
/// backoff anywhere; a call either completes within this window or the
/// failure is handed to the caller.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(1);

/// Classified outcome of an outbound peer call.
///
/// Replication treats the variants very differently: `Unreachable`
/// evicts the peer and moves on, everything else aborts the write.
/// The classification is structural (transport-level connect failure
/// vs. anything after the connection), not a match on error text.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The connector could not produce a handle for this address.
    #[error("invalid peer address {0:?}")]
    InvalidAddress(String),

    /// TCP connect failed: the peer process is gone. Grounds for
    /// permanent eviction from the registry.
    #[error("peer unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Timeout, non-success status, body decode failure, or any other
    /// transport error. Never evicts; aborts the operation instead.
    #[error("rpc failed: {0}")]
    Failed(#[source] reqwest::Error),
}

impl RpcError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            RpcError::Unreachable(err)
        } else {
            RpcError::Failed(err)
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, RpcError::Unreachable(_))
    }
}

/// Produces RPC handles for peer addresses.
///
/// Stateless beyond the shared HTTP client; which handles are alive is
/// the peer registry's business, not the connector's.
#[derive(Clone)]
pub struct PeerConnector {
    http: reqwest::Client,
}

impl PeerConnector {
    pub fn new() -> anyhow::Result<Self> {
        // No connection pooling: a departed peer must show up as a
        // fresh connect failure, not as an error on a stale pooled
        // connection, or eviction would misclassify it.
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { http })
    }

    /// Builds a handle for `address`. The underlying connection is
    /// opened lazily on first use, so a handle to a dead peer is
    /// created successfully and fails on its first call.
    pub fn connect(&self, address: &str) -> Result<PeerClient, RpcError> {
        if address.parse::<SocketAddr>().is_err() {
            return Err(RpcError::InvalidAddress(address.to_string()));
        }
        Ok(PeerClient {
            address: address.to_string(),
            base_url: format!("http://{}", address),
            http: self.http.clone(),
        })
    }
}

/// Live RPC handle to one peer. Cheap to clone; the handle's lifetime
/// is tied to its entry in the peer registry.
#[derive(Clone)]
pub struct PeerClient {
    address: String,
    base_url: String,
    http: reqwest::Client,
}

impl PeerClient {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Pushes one replicated write to this peer.
    pub async fn server_write(&self, key: &str, value: &str) -> Result<(), RpcError> {
        let payload = ServerWriteRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        let response = self
            .http
            .post(format!("{}{}", self.base_url, ENDPOINT_SERVER_WRITE))
            .json(&payload)
            .timeout(RPC_TIMEOUT)
            .send()
            .await
            .map_err(RpcError::from_transport)?;

        response.error_for_status().map_err(RpcError::Failed)?;
        Ok(())
    }

    /// Registers `own_address` with this peer, so the peer holds a
    /// handle back to the caller.
    pub async fn join(&self, own_address: &str) -> Result<(), RpcError> {
        let payload = JoinRequest {
            address: own_address.to_string(),
        };
        let response = self
            .http
            .post(format!("{}{}", self.base_url, ENDPOINT_JOIN))
            .json(&payload)
            .timeout(RPC_TIMEOUT)
            .send()
            .await
            .map_err(RpcError::from_transport)?;

        response.error_for_status().map_err(RpcError::Failed)?;
        Ok(())
    }

    /// Fetches this peer's store snapshot and peer list.
    pub async fn cluster_info(&self) -> Result<ClusterInfoResponse, RpcError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, ENDPOINT_CLUSTER_INFO))
            .timeout(RPC_TIMEOUT)
            .send()
            .await
            .map_err(RpcError::from_transport)?;

        let response = response.error_for_status().map_err(RpcError::Failed)?;
        response
            .json::<ClusterInfoResponse>()
            .await
            .map_err(RpcError::Failed)
    }

    /// Client-side write, used by the CLI binary.
    pub async fn write(&self, key: &str, value: &str) -> Result<(), RpcError> {
        let payload = WriteRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        let response = self
            .http
            .post(format!("{}{}", self.base_url, ENDPOINT_WRITE))
            .json(&payload)
            .timeout(RPC_TIMEOUT)
            .send()
            .await
            .map_err(RpcError::from_transport)?;

        response.error_for_status().map_err(RpcError::Failed)?;
        Ok(())
    }

    /// Client-side read, used by the CLI binary.
    pub async fn read(&self, key: &str) -> Result<String, RpcError> {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            ENDPOINT_READ,
            urlencoding::encode(key)
        );
        let response = self
            .http
            .get(url)
            .timeout(RPC_TIMEOUT)
            .send()
            .await
            .map_err(RpcError::from_transport)?;

        let response = response.error_for_status().map_err(RpcError::Failed)?;
        let body = response
            .json::<ValueResponse>()
            .await
            .map_err(RpcError::Failed)?;
        Ok(body.value)
    }
}
