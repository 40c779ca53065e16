//! # Document Tree
//!
//! In-memory form of a secrets document: one or more ordered branches of keyed items,
//! plus the metadata needed to decrypt them.
//!
//! ## Modules
//!
//! - [`decrypt`] - in-place leaf decryption and MAC digest
//! - [`merge`] - layered merge of predecessor documents
//! - [`path`] - parsing of `["key"][0]` extraction paths
//! - [`truncate`] - navigation to a node by path

pub(crate) mod decrypt;
pub(crate) mod merge;
pub mod path;
pub mod truncate;

pub use path::parse_tree_path;
pub use truncate::{PathSegment, TruncateError};

use crate::consts::DEFAULT_UNENCRYPTED_SUFFIX;
use crate::keyservice::MasterKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A decrypted or still-encrypted document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    /// Top-level documents. Most formats carry exactly one.
    pub branches: Vec<TreeBranch>,
    pub metadata: Metadata,
    /// Where the document was loaded from, if it came from disk.
    pub file_path: PathBuf,
}

/// Document-level metadata stored alongside the encrypted values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Encrypted MAC over every plaintext leaf.
    #[serde(default)]
    pub mac: Option<String>,
    /// Timestamp of the last write, used as additional data for the MAC.
    #[serde(default, rename = "lastmodified")]
    pub last_modified: String,
    /// Keys ending in this suffix hold plaintext, along with everything beneath them.
    #[serde(default)]
    pub unencrypted_suffix: Option<String>,
    /// Version of the tool that wrote the document.
    #[serde(default)]
    pub version: String,
    /// Wrapped copies of the data key.
    #[serde(default, rename = "keys")]
    pub master_keys: Vec<MasterKey>,
}

impl Metadata {
    /// The suffix in effect, falling back to [`DEFAULT_UNENCRYPTED_SUFFIX`].
    #[must_use]
    pub fn unencrypted_suffix(&self) -> &str {
        self.unencrypted_suffix
            .as_deref()
            .unwrap_or(DEFAULT_UNENCRYPTED_SUFFIX)
    }
}

/// An ordered mapping of keys to values. Key order is preserved on output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeBranch(pub Vec<TreeItem>);

#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    pub key: String,
    pub value: TreeValue,
}

/// Every shape a node in the tree can take.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Branch(TreeBranch),
    Array(Vec<TreeValue>),
    String(String),
    Int(i64),
    /// Integer above `i64::MAX`.
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl TreeBranch {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a key, keeping insertion order.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TreeValue>) -> Self {
        self.0.push(TreeItem {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.0.iter().find(|item| item.key == key).map(|item| &item.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TreeValue> {
        self.0
            .iter_mut()
            .find(|item| item.key == key)
            .map(|item| &mut item.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeItem> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TreeValue {
    /// Name of the variant, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            TreeValue::Branch(_) => "branch",
            TreeValue::Array(_) => "array",
            TreeValue::String(_) => "string",
            TreeValue::Int(_) | TreeValue::Uint(_) => "integer",
            TreeValue::Float(_) => "float",
            TreeValue::Bool(_) => "boolean",
            TreeValue::Null => "null",
        }
    }

    /// Bytes a scalar contributes to the document MAC. `None` for containers.
    #[must_use]
    pub fn digest_bytes(&self) -> Option<Vec<u8>> {
        match self {
            TreeValue::Branch(_) | TreeValue::Array(_) => None,
            TreeValue::String(s) => Some(s.as_bytes().to_vec()),
            TreeValue::Int(i) => Some(i.to_string().into_bytes()),
            TreeValue::Uint(u) => Some(u.to_string().into_bytes()),
            TreeValue::Float(f) => Some(f.to_string().into_bytes()),
            TreeValue::Bool(true) => Some(b"True".to_vec()),
            TreeValue::Bool(false) => Some(b"False".to_vec()),
            TreeValue::Null => Some(Vec::new()),
        }
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeValue::String(s) => f.write_str(s),
            TreeValue::Int(i) => write!(f, "{i}"),
            TreeValue::Uint(u) => write!(f, "{u}"),
            TreeValue::Float(x) => write!(f, "{x}"),
            TreeValue::Bool(b) => write!(f, "{b}"),
            TreeValue::Null => f.write_str("null"),
            TreeValue::Branch(b) => write!(f, "<branch of {} keys>", b.len()),
            TreeValue::Array(a) => write!(f, "<array of {} items>", a.len()),
        }
    }
}

impl From<TreeBranch> for TreeValue {
    fn from(branch: TreeBranch) -> Self {
        TreeValue::Branch(branch)
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<i64> for TreeValue {
    fn from(i: i64) -> Self {
        TreeValue::Int(i)
    }
}

impl From<f64> for TreeValue {
    fn from(x: f64) -> Self {
        TreeValue::Float(x)
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Bool(b)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        TreeValue::Array(items)
    }
}
