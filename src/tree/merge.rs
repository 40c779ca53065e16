//! Layered merge: folding decrypted predecessor documents into the current one.
//!
//! Keys already present win over keys from a layer; nested branches merge recursively
//! and keys only a layer knows about are appended. Layers are applied in the order
//! given, so with a nearest-first chain the precedence is N > N-1 > ... > 1.

use super::{Tree, TreeBranch, TreeValue};
use crate::cipher::Cipher;
use crate::decryptor::common::{
    decrypt_tree, load_encrypted_file_with_bug_fixes, DecryptTreeOpts, GenericDecryptOpts,
};
use crate::error::SopsError;
use crate::keyservice::KeyServiceClient;
use crate::stores::Store;
use std::path::PathBuf;
use tracing::debug;

impl Tree {
    /// Load, decrypt and merge every layer in `layers`, in order.
    ///
    /// Layers are always MAC-verified. The first failing layer aborts the merge; layers
    /// merged before it remain merged, but callers discard the tree on error.
    pub fn decrypt_layers(
        &mut self,
        store: &dyn Store,
        cipher: &dyn Cipher,
        key_services: &[Box<dyn KeyServiceClient>],
        layers: &[PathBuf],
    ) -> Result<(), SopsError> {
        for layer_path in layers {
            let mut layer = load_encrypted_file_with_bug_fixes(&GenericDecryptOpts {
                input_store: store,
                input_path: layer_path,
            })?;
            decrypt_tree(DecryptTreeOpts {
                tree: &mut layer,
                cipher,
                key_services,
                ignore_mac: false,
            })?;

            debug!(layer = %layer_path.display(), "merging layer");
            self.merge_layer(layer);
        }
        Ok(())
    }

    /// Merge the first branch of `layer` beneath this tree's first branch.
    pub fn merge_layer(&mut self, layer: Tree) {
        let Some(incoming) = layer.branches.into_iter().next() else {
            return;
        };
        match self.branches.first_mut() {
            Some(current) => current.merge_missing(incoming),
            None => self.branches.push(incoming),
        }
    }
}

impl TreeBranch {
    /// Add every key of `other` that this branch lacks, recursing into shared branches.
    pub fn merge_missing(&mut self, other: TreeBranch) {
        for item in other.0 {
            match self.get_mut(&item.key) {
                Some(TreeValue::Branch(mine)) => {
                    if let TreeValue::Branch(theirs) = item.value {
                        mine.merge_missing(theirs);
                    }
                }
                Some(_) => {}
                None => self.0.push(item),
            }
        }
    }
}
