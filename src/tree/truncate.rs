//! Navigation to a single node of a branch along a path of keys and indices.

use super::{TreeBranch, TreeValue};
use std::fmt;
use thiserror::Error;

/// One step of an extraction path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Select the value stored under this key of a branch.
    Key(String),
    /// Select the element at this position of an array.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "[{key:?}]"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Why a path does not resolve inside a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TruncateError {
    #[error("the document has no branches")]
    NoDocument,

    #[error("component ['{0}'] not found")]
    KeyNotFound(String),

    #[error("component ['{key}'] is a key, but tree part is a {found}")]
    NotABranch { key: String, found: &'static str },

    #[error("component [{index}] is integer, but tree part is a {found}")]
    NotAnArray { index: usize, found: &'static str },

    #[error("component [{0}] accesses out of bounds")]
    OutOfBounds(usize),
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Branch(&'a TreeBranch),
    Value(&'a TreeValue),
}

impl<'a> Node<'a> {
    fn of(value: &'a TreeValue) -> Self {
        match value {
            TreeValue::Branch(branch) => Node::Branch(branch),
            other => Node::Value(other),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Branch(_) => "branch",
            Node::Value(value) => value.kind(),
        }
    }
}

impl TreeBranch {
    /// Walk `path` from this branch and return a copy of the node found there.
    ///
    /// An empty path returns the whole branch.
    pub fn truncate(&self, path: &[PathSegment]) -> Result<TreeValue, TruncateError> {
        let mut current = Node::Branch(self);

        for segment in path {
            current = match (segment, current) {
                (PathSegment::Key(key), Node::Branch(branch)) => branch
                    .get(key)
                    .map(Node::of)
                    .ok_or_else(|| TruncateError::KeyNotFound(key.clone()))?,
                (PathSegment::Key(key), node) => {
                    return Err(TruncateError::NotABranch {
                        key: key.clone(),
                        found: node.kind(),
                    })
                }
                (PathSegment::Index(index), Node::Value(TreeValue::Array(items))) => items
                    .get(*index)
                    .map(Node::of)
                    .ok_or(TruncateError::OutOfBounds(*index))?,
                (PathSegment::Index(index), node) => {
                    return Err(TruncateError::NotAnArray {
                        index: *index,
                        found: node.kind(),
                    })
                }
            };
        }

        Ok(match current {
            Node::Branch(branch) => TreeValue::Branch(branch.clone()),
            Node::Value(value) => value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    fn sample() -> TreeBranch {
        TreeBranch::new()
            .with(
                "db",
                TreeBranch::new().with("user", "admin").with("password", "s3cr3t"),
            )
            .with(
                "hosts",
                vec![TreeValue::from("a.example"), TreeValue::from("b.example")],
            )
            .with("port", 5432i64)
    }

    #[test]
    fn resolves_keys_and_indices() {
        let tree = sample();
        assert_eq!(
            tree.truncate(&[key("db"), key("password")]).unwrap(),
            TreeValue::from("s3cr3t")
        );
        assert_eq!(
            tree.truncate(&[key("hosts"), PathSegment::Index(1)]).unwrap(),
            TreeValue::from("b.example")
        );
        assert!(matches!(
            tree.truncate(&[key("db")]).unwrap(),
            TreeValue::Branch(b) if b.len() == 2
        ));
    }

    #[test]
    fn empty_path_returns_the_branch() {
        let tree = sample();
        assert_eq!(tree.truncate(&[]).unwrap(), TreeValue::Branch(tree.clone()));
    }

    #[test]
    fn reports_each_failure_cause() {
        let tree = sample();
        assert_eq!(
            tree.truncate(&[key("nope")]).unwrap_err(),
            TruncateError::KeyNotFound("nope".into())
        );
        assert_eq!(
            tree.truncate(&[key("port"), key("x")]).unwrap_err(),
            TruncateError::NotABranch {
                key: "x".into(),
                found: "integer"
            }
        );
        assert_eq!(
            tree.truncate(&[key("db"), PathSegment::Index(0)]).unwrap_err(),
            TruncateError::NotAnArray {
                index: 0,
                found: "branch"
            }
        );
        assert_eq!(
            tree.truncate(&[key("hosts"), PathSegment::Index(2)]).unwrap_err(),
            TruncateError::OutOfBounds(2)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            TruncateError::KeyNotFound("db".into()).to_string(),
            "component ['db'] not found"
        );
        assert_eq!(
            TruncateError::OutOfBounds(3).to_string(),
            "component [3] accesses out of bounds"
        );
    }
}
