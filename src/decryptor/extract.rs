//! src/decryptor/extract.rs
//! Sub-tree extraction, one emission strategy per value shape

use crate::error::SopsError;
use crate::stores::Store;
use crate::tree::{PathSegment, Tree, TreeValue, TruncateError};
use tracing::debug;

/// Emit only the node at `path` inside the tree's first branch.
///
/// - A branch replaces the first branch and the whole tree goes through
///   [`Store::emit_plain_file`], so document-level framing is kept.
/// - A string is returned as raw bytes, never quoted or escaped.
/// - Any other scalar goes through [`Store::emit_value`].
pub fn extract(
    tree: &mut Tree,
    path: &[PathSegment],
    output_store: &dyn Store,
) -> Result<Vec<u8>, SopsError> {
    let root = tree.branches.first().ok_or(TruncateError::NoDocument)?;

    match root.truncate(path)? {
        TreeValue::Branch(branch) => {
            debug!(len = branch.len(), "extracted branch");
            tree.branches[0] = branch;
            output_store
                .emit_plain_file(&tree.branches)
                .map_err(SopsError::DumpingFile)
        }
        TreeValue::String(raw) => {
            debug!("extracted string");
            Ok(raw.into_bytes())
        }
        value => {
            debug!(kind = value.kind(), "extracted value");
            output_store
                .emit_value(&value)
                .map_err(SopsError::DumpingValue)
        }
    }
}
