// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt(&opts)?` for the full pipeline.
//! Helpers: `extract`, `load_encrypted_file_with_bug_fixes`, `decrypt_tree` for custom flows.

pub(crate) mod common;
pub(crate) mod decrypt;
pub(crate) mod extract;

pub use common::{
    decrypt_tree, load_encrypted_file_with_bug_fixes, DecryptTreeOpts, GenericDecryptOpts,
};
pub use decrypt::decrypt;
pub use extract::extract;
