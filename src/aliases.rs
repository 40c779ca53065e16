//! # Type Aliases
//!
//! Named types for the values that flow between the layer resolver and the
//! orchestrator, plus the one secret this crate ever holds: the document data key.
//!
//! ## Types
//!
//! - [`LayerChain`] - predecessor document paths, nearest layer first
//! - [`ExtractionPath`] - segments addressing a node inside a document tree
//! - [`DataKey`] - unwrapped data key, a [`secure-gate`](https://github.com/Slurp9187/secure-gate)
//!   dynamic secret zeroized on drop
//!
//! ## Usage
//!
//! [`DataKey`] requires an explicit `.expose_secret()` to reach its bytes, so a key
//! never ends up in a log line or a `{:?}` by accident.

use crate::tree::PathSegment;
use secure_gate::dynamic_alias;
use std::path::PathBuf;

/// Ordered layer paths, strictly descending by layer number.
pub type LayerChain = Vec<PathBuf>;

/// Ordered path segments, applied from the document root.
pub type ExtractionPath = Vec<PathSegment>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(pub DataKey, Vec<u8>); // produced by a key service, consumed by a cipher
