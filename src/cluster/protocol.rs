//! Cluster Network Protocol
//!
//! Defines the API endpoints and Data Transfer Objects (DTOs) used on
//! the node's RPC surface: the two client-facing operations (read,
//! write) and the three intra-cluster operations (server_write,
//! cluster_info, join).
//!
//! These structures are serialized via JSON and sent over HTTP.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- API Endpoints ---

/// Public endpoint for client reads; the key is appended as a path segment.
pub const ENDPOINT_READ: &str = "/read";
/// Public endpoint for client writes.
pub const ENDPOINT_WRITE: &str = "/write";
/// Internal endpoint for applying a replicated write (no re-propagation).
pub const ENDPOINT_SERVER_WRITE: &str = "/server_write";
/// Internal endpoint returning the store snapshot + peer list to a joining node.
pub const ENDPOINT_CLUSTER_INFO: &str = "/cluster_info";
/// Internal endpoint through which a joining node registers itself.
pub const ENDPOINT_JOIN: &str = "/join";

// --- Data Transfer Objects ---

/// Client write request, fanned out to every peer before the local commit.
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteRequest {
    pub key: String,
    pub value: String,
}

/// Replica apply pushed from the node that accepted the client write.
///
/// Receivers store the pair as-is and never propagate it further;
/// in a full mesh the originating node already reaches everyone, and
/// re-propagation would loop forever.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerWriteRequest {
    pub key: String,
    pub value: String,
}

/// Response for client reads.
///
/// An absent key is reported as the empty string; the protocol does
/// not distinguish "never written" from "stored empty value".
#[derive(Debug, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: String,
}

/// Standard acknowledgment for write, server_write and join.
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Best-effort point-in-time snapshot of one node's view of the cluster.
///
/// Returned to a joining node, which adopts `store` (remote values win
/// over its own) and then introduces itself to every address in `peers`.
/// The responder's own address is included in the list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterInfoResponse {
    /// Full copy of the responder's key-value table.
    pub store: HashMap<String, String>,
    /// Every peer address the responder knows, itself included.
    pub peers: Vec<String>,
}

/// Sent by a joining node so the receiver registers it as a peer.
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRequest {
    /// The joiner's listening address, e.g. `127.0.0.1:1989`.
    pub address: String,
}
