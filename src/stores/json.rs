//! src/stores/json.rs
//! JSON store: key order preserved end to end

use super::{Store, StoreError};
use crate::tree::{Metadata, Tree, TreeBranch, TreeItem, TreeValue};
use serde_json::{Map, Number, Value};
use std::path::PathBuf;

/// Key under which the metadata lives in an encrypted JSON document.
pub const METADATA_KEY: &str = "sops";

/// Reads `{ ..., "sops": { ... } }` documents and writes pretty-printed plaintext.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Store for JsonStore {
    fn load_encrypted_file(&self, bytes: &[u8]) -> Result<Tree, StoreError> {
        let map = match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => map,
            other => return Err(StoreError::NotAMapping(json_kind(&other))),
        };

        let mut metadata = None;
        let mut branch = TreeBranch::new();
        for (key, value) in map {
            if key == METADATA_KEY {
                metadata = Some(value);
            } else {
                branch.0.push(TreeItem {
                    key,
                    value: from_json(value),
                });
            }
        }

        let metadata: Metadata = serde_json::from_value(metadata.ok_or(StoreError::MetadataNotFound)?)
            .map_err(|e| StoreError::InvalidMetadata(e.to_string()))?;

        Ok(Tree {
            branches: vec![branch],
            metadata,
            file_path: PathBuf::new(),
        })
    }

    fn emit_plain_file(&self, branches: &[TreeBranch]) -> Result<Vec<u8>, StoreError> {
        let mut out = Vec::new();
        for branch in branches {
            serde_json::to_writer_pretty(&mut out, &branch_to_json(branch)?)?;
            out.push(b'\n');
        }
        Ok(out)
    }

    fn emit_value(&self, value: &TreeValue) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(&to_json(value)?)?)
    }
}

fn from_json(value: Value) -> TreeValue {
    match value {
        Value::Null => TreeValue::Null,
        Value::Bool(b) => TreeValue::Bool(b),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => TreeValue::Int(i),
            (None, Some(u), _) => TreeValue::Uint(u),
            (None, None, Some(x)) => TreeValue::Float(x),
            (None, None, None) => TreeValue::String(n.to_string()),
        },
        Value::String(s) => TreeValue::String(s),
        Value::Array(items) => TreeValue::Array(items.into_iter().map(from_json).collect()),
        Value::Object(map) => TreeValue::Branch(TreeBranch(
            map.into_iter()
                .map(|(key, value)| TreeItem {
                    key,
                    value: from_json(value),
                })
                .collect(),
        )),
    }
}

fn to_json(value: &TreeValue) -> Result<Value, StoreError> {
    Ok(match value {
        TreeValue::Branch(branch) => branch_to_json(branch)?,
        TreeValue::Array(items) => Value::Array(items.iter().map(to_json).collect::<Result<_, _>>()?),
        TreeValue::String(s) => Value::String(s.clone()),
        TreeValue::Int(i) => Value::Number((*i).into()),
        TreeValue::Uint(u) => Value::Number((*u).into()),
        TreeValue::Float(x) => Number::from_f64(*x)
            .map(Value::Number)
            .ok_or_else(|| StoreError::Unrepresentable(x.to_string()))?,
        TreeValue::Bool(b) => Value::Bool(*b),
        TreeValue::Null => Value::Null,
    })
}

fn branch_to_json(branch: &TreeBranch) -> Result<Value, StoreError> {
    let mut map = Map::new();
    for item in branch.iter() {
        map.insert(item.key.clone(), to_json(&item.value)?);
    }
    Ok(Value::Object(map))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
