//! Local Storage Module
//!
//! Holds the in-memory key-value table backing one node. The store is a
//! full replica: there is no sharding, every node keeps every key.
//! Mutation happens from two directions only: client writes committed
//! after replication fan-out, and replica applies pushed by peers.

pub mod memory;

#[cfg(test)]
mod tests;
