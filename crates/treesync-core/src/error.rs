use thiserror::Error;

/// Behavioral error taxonomy for the sync-tree engine.
///
/// The core never logs or retries; every variant here is surfaced to the
/// caller (in practice, the HTTP adapter) to convert into a response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TreeSyncError {
    /// A [`crate::SyncTree`] was constructed with an empty or absent root payload.
    #[error("tree must be initialised with root node data")]
    EmptyRoot,

    /// A lookup by primary key found nothing.
    #[error("could not find pk: {pk}")]
    UnknownKey { pk: u64 },

    /// `get`/`delete` was called on a payload key that does not exist.
    #[error("missing attribute {key:?} on pk {pk}")]
    MissingAttribute { pk: u64, key: String },

    /// `add_child` was given something that isn't a [`crate::Node`].
    ///
    /// Unreachable through the public API — the type system already rejects
    /// non-`Node` arguments — kept for parity with the behavioral taxonomy
    /// this engine is specified against.
    #[error("child must be a Node")]
    InvalidChild,

    /// A structurally unsupported operation was attempted (node/child removal).
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A payload value could not be turned into bytes for hashing.
    #[error("could not hash value: {0}")]
    DigestFailure(String),
}
