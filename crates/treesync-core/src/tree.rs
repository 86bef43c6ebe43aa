use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::TreeSyncError;
use crate::info_node::InformationNode;
use crate::node::Node;

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Owns every [`Node`] in the tree, assigns primary keys, routes mutations,
/// and reconciles digests with [`SyncTree::refresh_tree`].
///
/// All mutation methods only enqueue the affected pk(s) in the dirty set —
/// digests and `update_time` are only ever updated by `refresh_tree`.
#[derive(Debug)]
pub struct SyncTree {
    nodes: HashMap<u64, Node>,
    next_pk: u64,
    dirty: HashSet<u64>,
}

impl SyncTree {
    /// Creates the tree with a self-parented root at pk 0. Fails with
    /// [`TreeSyncError::EmptyRoot`] if `root_payload` is empty.
    pub fn new(root_payload: IndexMap<String, Value>) -> Result<Self, TreeSyncError> {
        if root_payload.is_empty() {
            return Err(TreeSyncError::EmptyRoot);
        }
        let info = InformationNode::new(0, root_payload)?;
        let root = Node::new_root(0, info);

        let mut nodes = HashMap::new();
        let _ = nodes.insert(0, root);

        Ok(Self {
            nodes,
            next_pk: 0,
            dirty: HashSet::new(),
        })
    }

    pub const fn root_pk(&self) -> u64 {
        0
    }

    pub fn get_node(&self, pk: u64) -> Result<&Node, TreeSyncError> {
        self.nodes.get(&pk).ok_or(TreeSyncError::UnknownKey { pk })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // a tree always has at least its root
    }

    /// Assigns `pk = next_pk + 1`, attaches under `parent_pk`, and enqueues
    /// both parent and child in the dirty set.
    pub fn add_node(&mut self, parent_pk: u64, payload: IndexMap<String, Value>) -> Result<u64, TreeSyncError> {
        let parent_depth = self.get_node(parent_pk)?.depth();

        self.next_pk += 1;
        let pk = self.next_pk;

        let info = InformationNode::new(pk, payload)?;
        let node = Node::new_child(pk, parent_pk, parent_depth + 1, info);
        let _ = self.nodes.insert(pk, node);

        let Self { nodes, dirty, .. } = self;
        nodes
            .get_mut(&parent_pk)
            .ok_or(TreeSyncError::UnknownKey { pk: parent_pk })?
            .add_child_pk(dirty, pk);
        let _ = dirty.insert(pk);

        Ok(pk)
    }

    pub fn get_attr(&self, pk: u64, key: &str) -> Result<&Value, TreeSyncError> {
        self.get_node(pk)?.get_attr(key)
    }

    pub fn set_attr(&mut self, pk: u64, key: impl Into<String>, value: Value) -> Result<(), TreeSyncError> {
        let dirty = &mut self.dirty;
        self.nodes
            .get_mut(&pk)
            .ok_or(TreeSyncError::UnknownKey { pk })?
            .set_attr(dirty, key, value)
    }

    pub fn del_attr(&mut self, pk: u64, key: &str) -> Result<(), TreeSyncError> {
        let dirty = &mut self.dirty;
        self.nodes
            .get_mut(&pk)
            .ok_or(TreeSyncError::UnknownKey { pk })?
            .del_attr(dirty, key)
    }

    pub fn replace_payload(&mut self, pk: u64, payload: IndexMap<String, Value>) -> Result<(), TreeSyncError> {
        let dirty = &mut self.dirty;
        self.nodes
            .get_mut(&pk)
            .ok_or(TreeSyncError::UnknownKey { pk })?
            .replace_payload(dirty, payload)
    }

    /// Reconciles every pending mutation in one bottom-up pass:
    ///
    /// 1. Collect the work set — every dirty pk plus its ancestor chain up
    ///    to (but excluding) the root's self-parent edge.
    /// 2. Sort the work set by depth, deepest first.
    /// 3. Rehash each node in that order, so every parent sees its
    ///    children's final digests before it rehashes itself.
    /// 4. Clear the dirty set.
    pub fn refresh_tree(&mut self) {
        if self.dirty.is_empty() {
            return;
        }

        let mut work: HashSet<u64> = HashSet::new();
        for &start in &self.dirty.clone() {
            let mut cur = start;
            loop {
                if !work.insert(cur) {
                    break;
                }
                let Some(node) = self.nodes.get(&cur) else {
                    break;
                };
                if node.parent_pk() == cur {
                    break;
                }
                cur = node.parent_pk();
            }
        }

        let mut ordered: Vec<u64> = work.into_iter().collect();
        ordered.sort_unstable_by_key(|pk| Reverse(self.nodes[pk].depth()));

        let now = now_secs();
        for pk in ordered {
            let child_hashes: Vec<String> = self.nodes[&pk]
                .children()
                .iter()
                .map(|child_pk| self.nodes[child_pk].hash().to_owned())
                .collect();

            let Self { nodes, dirty, .. } = self;
            if let Some(node) = nodes.get_mut(&pk) {
                let _ = node.rehash(&child_hashes, now, dirty);
            }
        }

        self.dirty.clear();
    }

    /// Every node with `update_time > t`, ordered by pk.
    pub fn get_nodes_after_time(&self, t: f64) -> Vec<&Node> {
        let mut result: Vec<&Node> = self.nodes.values().filter(|n| n.update_time() > t).collect();
        result.sort_unstable_by_key(Node::pk);
        result
    }
}
