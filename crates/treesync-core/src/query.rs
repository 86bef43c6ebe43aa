//! The sync query surface: read-only answers a client uses to diff
//! against a previously held snapshot. None of these touch the dirty set
//! or trigger a refresh — callers are expected to have refreshed already.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::TreeSyncError;
use crate::node::SyncTriple;
use crate::tree::SyncTree;

/// `fetch`'s per-pk result: the sync triple plus the node's payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchEntry {
    pub hash: SyncTriple,
    pub data: IndexMap<String, Value>,
}

/// `check_children`'s result for one parent pk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildrenReport {
    pub number_of_children: usize,
    pub hash: IndexMap<u64, SyncTriple>,
}

/// `since`'s per-pk result: the sync triple plus the time it last changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinceEntry {
    pub hash: SyncTriple,
    pub updated_time: f64,
}

/// Digests for each of `pks`. Fails whole if any pk is unknown.
pub fn check(tree: &SyncTree, pks: &[u64]) -> Result<IndexMap<u64, SyncTriple>, TreeSyncError> {
    let mut out = IndexMap::with_capacity(pks.len());
    for &pk in pks {
        let node = tree.get_node(pk)?;
        let _ = out.insert(pk, node.sync_triple());
    }
    Ok(out)
}

/// Digests and payload for each of `pks`. Fails whole if any pk is unknown.
pub fn fetch(tree: &SyncTree, pks: &[u64]) -> Result<IndexMap<u64, FetchEntry>, TreeSyncError> {
    let mut out = IndexMap::with_capacity(pks.len());
    for &pk in pks {
        let node = tree.get_node(pk)?;
        let _ = out.insert(
            pk,
            FetchEntry {
                hash: node.sync_triple(),
                data: node.payload().clone(),
            },
        );
    }
    Ok(out)
}

/// Digests of `pk`'s immediate children, in insertion order.
pub fn check_children(tree: &SyncTree, pk: u64) -> Result<ChildrenReport, TreeSyncError> {
    let node = tree.get_node(pk)?;
    let mut hash = IndexMap::with_capacity(node.children().len());
    for &child_pk in node.children() {
        let child = tree.get_node(child_pk)?;
        let _ = hash.insert(child_pk, child.sync_triple());
    }
    Ok(ChildrenReport {
        number_of_children: node.children().len(),
        hash,
    })
}

/// Ancestor chain for each of `pks`, root-excluded, nearest-ancestor-first
/// ("root-ward" order). Fails whole if any pk is unknown.
pub fn get_parents(tree: &SyncTree, pks: &[u64]) -> Result<IndexMap<u64, Vec<u64>>, TreeSyncError> {
    let mut out = IndexMap::with_capacity(pks.len());
    for &pk in pks {
        let _ = tree.get_node(pk)?;

        let mut chain = Vec::new();
        let mut cur = pk;
        loop {
            let parent = tree.get_node(cur)?.parent_pk();
            if tree.get_node(parent)?.parent_pk() == parent {
                break;
            }
            chain.push(parent);
            cur = parent;
        }
        let _ = out.insert(pk, chain);
    }
    Ok(out)
}

/// Every node with `update_time > t`, in pk order.
pub fn since(tree: &SyncTree, t: f64) -> IndexMap<u64, SinceEntry> {
    let mut out = IndexMap::new();
    for node in tree.get_nodes_after_time(t) {
        let _ = out.insert(
            node.pk(),
            SinceEntry {
                hash: node.sync_triple(),
                updated_time: node.update_time(),
            },
        );
    }
    out
}
