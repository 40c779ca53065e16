//! src/decryptor/common.rs
//! Loading and tree decryption shared by the main document and its layers

use crate::aliases::DataKey;
use crate::cipher::Cipher;
use crate::consts::DEFAULT_UNENCRYPTED_SUFFIX;
use crate::error::SopsError;
use crate::keyservice::{get_data_key, KeyServiceClient};
use crate::stores::Store;
use crate::tree::{Tree, TreeValue};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Where and how to load an encrypted document.
pub struct GenericDecryptOpts<'a> {
    pub input_store: &'a dyn Store,
    pub input_path: &'a Path,
}

/// A loaded tree and what is needed to decrypt it in place.
pub struct DecryptTreeOpts<'a> {
    pub tree: &'a mut Tree,
    pub cipher: &'a dyn Cipher,
    pub key_services: &'a [Box<dyn KeyServiceClient>],
    pub ignore_mac: bool,
}

/// Read and parse an encrypted document, then apply fix-ups for documents written
/// by older tool versions.
pub fn load_encrypted_file_with_bug_fixes(
    opts: &GenericDecryptOpts<'_>,
) -> Result<Tree, SopsError> {
    let bytes = fs::read(opts.input_path).map_err(|source| SopsError::ReadInput {
        path: opts.input_path.to_path_buf(),
        source,
    })?;

    let mut tree = opts.input_store.load_encrypted_file(&bytes)?;
    tree.file_path = opts.input_path.to_path_buf();
    apply_bug_fixes(&mut tree);
    Ok(tree)
}

/// Documents that predate the configurable suffix were written with the default one.
fn apply_bug_fixes(tree: &mut Tree) {
    if tree.metadata.unencrypted_suffix.is_none() {
        debug!(
            file = %tree.file_path.display(),
            version = %tree.metadata.version,
            "no unencrypted suffix recorded, assuming default"
        );
        tree.metadata.unencrypted_suffix = Some(DEFAULT_UNENCRYPTED_SUFFIX.to_string());
    }
}

/// Unwrap the data key, decrypt the tree in place and verify its MAC.
///
/// Returns the data key so callers can reuse it.
pub fn decrypt_tree(opts: DecryptTreeOpts<'_>) -> Result<DataKey, SopsError> {
    let DecryptTreeOpts {
        tree,
        cipher,
        key_services,
        ignore_mac,
    } = opts;

    let data_key = get_data_key(&tree.metadata.master_keys, key_services)?;
    let computed = tree.decrypt(&data_key, cipher)?;

    if ignore_mac {
        warn!(file = %tree.file_path.display(), "skipping MAC verification");
        return Ok(data_key);
    }

    let encrypted_mac = tree.metadata.mac.as_deref().ok_or(SopsError::MacNotFound)?;
    let stored = match cipher
        .decrypt(encrypted_mac, &data_key, &tree.metadata.last_modified)
        .map_err(|source| SopsError::Decrypt {
            location: "sops.mac".into(),
            source,
        })? {
        TreeValue::String(mac) => mac,
        other => other.to_string(),
    };

    if stored != computed {
        return Err(SopsError::MacMismatch { stored, computed });
    }

    debug!(file = %tree.file_path.display(), "MAC verified");
    Ok(data_key)
}
