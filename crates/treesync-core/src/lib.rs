//! A hierarchical, in-memory Merkle tree over arbitrary key/value payloads.
//!
//! Every node carries a digest summarizing its own payload and the digests
//! of its children. Clients that hold a previous snapshot can, with a
//! handful of requests against the [`query`] surface, determine exactly
//! which nodes changed since their last visit.
//!
//! This crate is the engine only: no I/O, no persistence, no locking. A
//! single logical writer is expected to serialize mutations and
//! [`SyncTree::refresh_tree`] calls; queries are read-only and may run
//! concurrently with one another. See `treesync-server` for the HTTP
//! adapter that provides that serialization.
//!
//! Digests are MD5 for speed and legacy client compatibility, not for
//! collision resistance against an adversary — this engine is not a
//! cryptographic authentication mechanism.

pub mod digest;
pub mod error;
pub mod info_node;
pub mod node;
pub mod query;
pub mod tree;

pub use digest::{digest, is_valid_digest, DEFAULT_DIGEST};
pub use error::TreeSyncError;
pub use info_node::InformationNode;
pub use node::{Node, SyncTriple};
pub use query::{check, check_children, fetch, get_parents, since, ChildrenReport, FetchEntry, SinceEntry};
pub use tree::SyncTree;
