//! # Stores
//!
//! Pluggable serializers between on-disk documents and [`Tree`]s. The orchestrator
//! reads through an input store and emits through an output store, which may differ
//! (decrypting a YAML file to JSON, for example).
//!
//! ## Modules
//!
//! - [`json`] - JSON documents with metadata under a top-level `"sops"` key

pub mod json;

pub use json::JsonStore;

use crate::tree::{Tree, TreeBranch, TreeValue};
use thiserror::Error;

/// Reads encrypted documents and writes plaintext output.
pub trait Store {
    /// Parse an encrypted document, metadata included.
    fn load_encrypted_file(&self, bytes: &[u8]) -> Result<Tree, StoreError>;

    /// Serialize whole documents, without metadata.
    fn emit_plain_file(&self, branches: &[TreeBranch]) -> Result<Vec<u8>, StoreError>;

    /// Serialize a single value that is not a document.
    fn emit_value(&self, value: &TreeValue) -> Result<Vec<u8>, StoreError>;
}

/// Failure reported by a [`Store`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("sops metadata not found")]
    MetadataNotFound,

    #[error("invalid sops metadata: {0}")]
    InvalidMetadata(String),

    #[error("value cannot be represented in this format: {0}")]
    Unrepresentable(String),
}
