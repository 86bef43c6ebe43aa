use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::digest::{digest, DEFAULT_DIGEST};
use crate::error::TreeSyncError;
use crate::info_node::InformationNode;

/// `(combined, info, children)` digests — what every sync query returns.
pub type SyncTriple = (String, String, String);

/// One node of a [`crate::SyncTree`].
///
/// Children are referenced by primary key rather than owned directly: the
/// tree is the single arena that owns every `Node`, which keeps the
/// structure free of reference cycles (the natural Rust translation of the
/// parent/child object graph this engine is specified against).
#[derive(Debug, Clone)]
pub struct Node {
    pk: u64,
    parent: u64,
    children: Vec<u64>,
    info: InformationNode,
    children_hash: String,
    hash: String,
    depth: u32,
    update_time: f64,
}

impl Node {
    pub(crate) fn new_root(pk: u64, info: InformationNode) -> Self {
        Self {
            pk,
            parent: pk,
            children: Vec::new(),
            info,
            children_hash: DEFAULT_DIGEST.to_owned(),
            hash: DEFAULT_DIGEST.to_owned(),
            depth: 0,
            update_time: 0.0,
        }
    }

    pub(crate) fn new_child(pk: u64, parent: u64, depth: u32, info: InformationNode) -> Self {
        Self {
            pk,
            parent,
            children: Vec::new(),
            info,
            children_hash: DEFAULT_DIGEST.to_owned(),
            hash: DEFAULT_DIGEST.to_owned(),
            depth,
            update_time: 0.0,
        }
    }

    pub const fn pk(&self) -> u64 {
        self.pk
    }

    pub const fn parent_pk(&self) -> u64 {
        self.parent
    }

    pub fn children(&self) -> &[u64] {
        &self.children
    }

    pub const fn depth(&self) -> u32 {
        self.depth
    }

    pub const fn update_time(&self) -> f64 {
        self.update_time
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn info_hash(&self) -> &str {
        self.info.info_hash()
    }

    pub fn children_hash(&self) -> &str {
        &self.children_hash
    }

    pub fn info(&self) -> &InformationNode {
        &self.info
    }

    pub fn payload(&self) -> &IndexMap<String, Value> {
        self.info.payload()
    }

    pub fn sync_triple(&self) -> SyncTriple {
        (self.hash.clone(), self.info_hash().to_owned(), self.children_hash.clone())
    }

    pub fn get_attr(&self, key: &str) -> Result<&Value, TreeSyncError> {
        self.info.get(key)
    }

    /// Delegates to the owned [`InformationNode`] and enqueues `self.pk` for
    /// the next [`crate::SyncTree::refresh_tree`] pass.
    pub(crate) fn set_attr(
        &mut self,
        dirty: &mut HashSet<u64>,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), TreeSyncError> {
        self.info.set(key, value)?;
        let _ = dirty.insert(self.pk);
        Ok(())
    }

    pub(crate) fn del_attr(&mut self, dirty: &mut HashSet<u64>, key: &str) -> Result<(), TreeSyncError> {
        self.info.delete(key)?;
        let _ = dirty.insert(self.pk);
        Ok(())
    }

    pub(crate) fn replace_payload(
        &mut self,
        dirty: &mut HashSet<u64>,
        payload: IndexMap<String, Value>,
    ) -> Result<(), TreeSyncError> {
        self.info.replace_payload(payload)?;
        let _ = dirty.insert(self.pk);
        Ok(())
    }

    pub(crate) fn add_child_pk(&mut self, dirty: &mut HashSet<u64>, child_pk: u64) {
        self.children.push(child_pk);
        let _ = dirty.insert(self.pk);
    }

    /// Node/child removal is not modeled; represent deletions with a
    /// `deleted=true` payload attribute instead.
    pub fn remove_child(&self) -> Result<(), TreeSyncError> {
        Err(TreeSyncError::Unsupported("remove_child"))
    }

    /// Local rehash step of the refresh pass: recomputes `children_hash`
    /// from the already-stable `hash` of each child, then `hash` from
    /// `children_hash ‖ info_hash`. If `hash` changed, advances
    /// `update_time` and enqueues the parent for the same pass — unless
    /// this node is the self-parented root.
    pub(crate) fn rehash(&mut self, child_hashes: &[String], now: f64, dirty: &mut HashSet<u64>) -> bool {
        let old_hash = self.hash.clone();

        self.children_hash = if child_hashes.is_empty() {
            DEFAULT_DIGEST.to_owned()
        } else {
            digest(child_hashes.concat().as_bytes())
        };
        self.hash = digest(format!("{}{}", self.children_hash, self.info_hash()).as_bytes());

        let changed = self.hash != old_hash;
        if changed {
            self.update_time = now;
            if self.parent != self.pk {
                let _ = dirty.insert(self.parent);
            }
        }
        changed
    }
}
