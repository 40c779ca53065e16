// src/lib.rs

//! Decrypt-side orchestration for structured secrets documents.
//!
//! [`decrypt`] loads an encrypted document, decrypts it, optionally merges its numbered
//! predecessor layers (see [`resolve_layers`]) and emits either the whole document or a
//! single extracted node.

pub mod aliases;
pub mod builders;
pub mod cipher;
pub mod consts;
pub mod decryptor;
pub mod error;
pub mod keyservice;
pub mod layers;
pub mod stores;
pub mod tree;

// High-level API
pub use builders::DecryptOpts;
pub use decryptor::{decrypt, extract};
pub use error::SopsError;
pub use layers::resolve_layers;

// Collaborator seams
pub use aliases::DataKey;
pub use cipher::{Cipher, CipherError};
pub use keyservice::{KeyServiceClient, KeyServiceError, MasterKey};
pub use stores::{JsonStore, Store, StoreError};
pub use tree::{parse_tree_path, PathSegment, Tree, TreeBranch, TreeValue};
