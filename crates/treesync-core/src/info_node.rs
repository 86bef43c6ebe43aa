use indexmap::IndexMap;
use serde_json::Value;

use crate::digest::digest;
use crate::error::TreeSyncError;

/// A node's payload (attribute name -> value) plus the digest summarizing it.
///
/// `info_hash` is recomputed eagerly on every mutation, so it is always
/// `DIGEST(canonical(pk, payload))` by the time a caller observes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationNode {
    pk: u64,
    payload: IndexMap<String, Value>,
    info_hash: String,
}

impl InformationNode {
    pub fn new(pk: u64, payload: IndexMap<String, Value>) -> Result<Self, TreeSyncError> {
        let mut node = Self {
            pk,
            payload,
            info_hash: String::new(),
        };
        node.recompute_hash()?;
        Ok(node)
    }

    pub const fn pk(&self) -> u64 {
        self.pk
    }

    pub const fn payload(&self) -> &IndexMap<String, Value> {
        &self.payload
    }

    pub fn info_hash(&self) -> &str {
        &self.info_hash
    }

    /// Inserts or overwrites `key`, recomputing `info_hash` before returning.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), TreeSyncError> {
        let _ = self.payload.insert(key.into(), value);
        self.recompute_hash()
    }

    /// Fails with [`TreeSyncError::MissingAttribute`] if `key` is absent.
    pub fn get(&self, key: &str) -> Result<&Value, TreeSyncError> {
        self.payload
            .get(key)
            .ok_or_else(|| TreeSyncError::MissingAttribute {
                pk: self.pk,
                key: key.to_owned(),
            })
    }

    /// Removes `key`, recomputing `info_hash`. Fails with
    /// [`TreeSyncError::MissingAttribute`] if `key` was already absent.
    pub fn delete(&mut self, key: &str) -> Result<(), TreeSyncError> {
        self.payload
            .shift_remove(key)
            .ok_or_else(|| TreeSyncError::MissingAttribute {
                pk: self.pk,
                key: key.to_owned(),
            })?;
        self.recompute_hash()
    }

    pub fn replace_pk(&mut self, new_pk: u64) -> Result<(), TreeSyncError> {
        self.pk = new_pk;
        self.recompute_hash()
    }

    pub fn replace_payload(&mut self, new_payload: IndexMap<String, Value>) -> Result<(), TreeSyncError> {
        self.payload = new_payload;
        self.recompute_hash()
    }

    fn recompute_hash(&mut self) -> Result<(), TreeSyncError> {
        let canonical = self.canonical_form()?;
        self.info_hash = digest(canonical.as_bytes());
        Ok(())
    }

    /// `pk` in decimal, followed by a stable rendering of the payload that
    /// preserves insertion order — digests are only comparable across
    /// processes that agree on this choice.
    fn canonical_form(&self) -> Result<String, TreeSyncError> {
        let payload_repr = serde_json::to_string(&self.payload)
            .map_err(|e| TreeSyncError::DigestFailure(e.to_string()))?;
        Ok(format!("{}{payload_repr}", self.pk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    #[test]
    fn info_digest_stability() {
        // Same pk and payload must produce the same info digest; a changed pk must not.
        let a = InformationNode::new(7, payload(&[("name", json!("Byld")), ("cat", json!("CSE"))])).unwrap();
        let b = InformationNode::new(7, payload(&[("name", json!("Byld")), ("cat", json!("CSE"))])).unwrap();
        assert_eq!(a.info_hash(), b.info_hash());
        assert_eq!(a.info_hash().len(), 32);

        let c = InformationNode::new(8, payload(&[("name", json!("Byld")), ("cat", json!("CSE"))])).unwrap();
        assert_ne!(a.info_hash(), c.info_hash());
    }

    #[test]
    fn delete_affects_info_digest_then_fails_on_repeat() {
        // Deleting a key changes the digest; deleting it again is an error.
        let mut node = InformationNode::new(7, payload(&[("name", json!("Byld")), ("cat", json!("CSE"))])).unwrap();
        let before = node.info_hash().to_owned();

        node.delete("name").unwrap();
        assert_ne!(node.info_hash(), before);
        assert_eq!(node.info_hash().len(), 32);

        let err = node.delete("name").unwrap_err();
        assert!(matches!(err, TreeSyncError::MissingAttribute { .. }));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut node = InformationNode::new(1, IndexMap::new()).unwrap();
        node.set("x", json!(1)).unwrap();
        assert_eq!(node.get("x").unwrap(), &json!(1));
    }

    #[test]
    fn get_missing_key_fails() {
        let node = InformationNode::new(1, IndexMap::new()).unwrap();
        assert!(matches!(node.get("nope"), Err(TreeSyncError::MissingAttribute { .. })));
    }

    #[test]
    fn restoring_previous_value_restores_previous_hash() {
        // A mutation that returns the payload to a previous value restores
        // the previous info_hash exactly.
        let mut node = InformationNode::new(1, payload(&[("x", json!(1))])).unwrap();
        let original = node.info_hash().to_owned();

        node.set("x", json!(2)).unwrap();
        assert_ne!(node.info_hash(), original);

        node.set("x", json!(1)).unwrap();
        assert_eq!(node.info_hash(), original);
    }

    #[test]
    fn reading_never_changes_hash() {
        let node = InformationNode::new(1, payload(&[("x", json!(1))])).unwrap();
        let before = node.info_hash().to_owned();
        let _ = node.get("x").unwrap();
        assert_eq!(node.info_hash(), before);
    }
}
