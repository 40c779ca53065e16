//! src/decryptor/decrypt.rs
//! Decrypt pipeline: load and decrypt, merge layers, then extract or emit

use crate::builders::DecryptOpts;
use crate::decryptor::common::{
    decrypt_tree, load_encrypted_file_with_bug_fixes, DecryptTreeOpts, GenericDecryptOpts,
};
use crate::decryptor::extract::extract;
use crate::error::SopsError;
use crate::layers::resolve_layers;
use tracing::{debug, info};

/// Decrypt the document at `opts.input_path` and serialize the result.
///
/// Stages run in order and the first failure aborts the call; no partial output is
/// ever returned. With `opts.layers`, predecessor documents are merged before
/// extraction. With a non-empty `opts.extract`, only that node is emitted.
///
/// # Errors
///
/// - Layer resolution errors ([`SopsError::MissingLayer`] and friends)
/// - Load and decrypt errors, including [`SopsError::MacMismatch`] unless `ignore_mac`
/// - [`SopsError::Truncate`] when the extraction path does not resolve
/// - [`SopsError::DumpingFile`] / [`SopsError::DumpingValue`] when the output store fails
pub fn decrypt(opts: &DecryptOpts<'_>) -> Result<Vec<u8>, SopsError> {
    let mut tree = load_encrypted_file_with_bug_fixes(&GenericDecryptOpts {
        input_store: opts.input_store,
        input_path: &opts.input_path,
    })?;
    debug!(file = %opts.input_path.display(), "loaded encrypted file");

    decrypt_tree(DecryptTreeOpts {
        tree: &mut tree,
        cipher: opts.cipher,
        key_services: opts.key_services,
        ignore_mac: opts.ignore_mac,
    })?;

    if opts.layers {
        let layers = resolve_layers(&opts.input_path)?;
        info!(
            file = %opts.input_path.display(),
            layers = layers.len(),
            "decrypting layers"
        );
        tree.decrypt_layers(opts.input_store, opts.cipher, opts.key_services, &layers)?;
    }

    if !opts.extract.is_empty() {
        return extract(&mut tree, &opts.extract, opts.output_store);
    }

    opts.output_store
        .emit_plain_file(&tree.branches)
        .map_err(SopsError::DumpingFile)
}
