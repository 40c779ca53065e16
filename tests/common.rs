//! tests/common.rs
//! Shared fixtures: a reversible test cipher, a static key service and helpers that
//! write encrypted JSON documents with a valid MAC.
#![allow(dead_code)] // Each test file uses a different subset

use serde_json::{json, Map, Value};
use sha2::{Digest, Sha512};
use sops_layers::{
    Cipher, CipherError, DataKey, JsonStore, KeyServiceClient, KeyServiceError, MasterKey, Store,
    StoreError, TreeBranch, TreeValue,
};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_ID: &str = "age1testrecipient";
pub const WRAPPED_KEY: &str = "wrapped-data-key";
pub const DATA_KEY: &[u8] = b"0123456789abcdef0123456789abcdef";
pub const LAST_MODIFIED: &str = "2024-05-01T12:00:00Z";
pub const UNENCRYPTED_SUFFIX: &str = "_unencrypted";

/// Ciphertexts look like `ENC[<type>:<hex(plaintext ^ key)>:<additional data>]`.
pub struct TestCipher;

impl Cipher for TestCipher {
    fn decrypt(
        &self,
        ciphertext: &str,
        key: &DataKey,
        additional_data: &str,
    ) -> Result<TreeValue, CipherError> {
        let malformed = || CipherError::Malformed(ciphertext.to_string());
        let inner = ciphertext
            .strip_prefix("ENC[")
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(malformed)?;
        let mut parts = inner.splitn(3, ':');
        let (kind, data, aad) = match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(data), Some(aad)) => (kind, data, aad),
            _ => return Err(malformed()),
        };
        if aad != additional_data {
            return Err(CipherError::Authentication(format!(
                "additional data {additional_data:?} does not match"
            )));
        }

        let bytes = xor(&hex::decode(data).map_err(|_| malformed())?, key.expose_secret());
        let plain = String::from_utf8(bytes).map_err(|_| malformed())?;
        match kind {
            "str" => Ok(TreeValue::String(plain)),
            "int" => plain.parse().map(TreeValue::Int).map_err(|_| malformed()),
            "float" => plain.parse().map(TreeValue::Float).map_err(|_| malformed()),
            "bool" => Ok(TreeValue::Bool(plain == "True")),
            _ => Err(malformed()),
        }
    }
}

/// Unwraps [`WRAPPED_KEY`] for [`KEY_ID`] and nothing else.
pub struct StaticKeyService;

impl KeyServiceClient for StaticKeyService {
    fn decrypt(&self, key: &MasterKey) -> Result<DataKey, KeyServiceError> {
        if key.id != KEY_ID {
            return Err(KeyServiceError::UnknownKey(key.id.clone()));
        }
        if key.enc != WRAPPED_KEY {
            return Err(KeyServiceError::Rejected {
                key_id: key.id.clone(),
                reason: "bad wrapping".into(),
            });
        }
        Ok(DataKey::new(DATA_KEY.to_vec()))
    }
}

pub fn key_services() -> Vec<Box<dyn KeyServiceClient>> {
    vec![Box::new(StaticKeyService)]
}

fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

fn digest_repr(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            (None, None) => n.as_f64().unwrap().to_string(),
        }),
        Value::Bool(true) => Some("True".into()),
        Value::Bool(false) => Some("False".into()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Encrypt a scalar the way [`TestCipher`] expects.
pub fn seal(value: &Value, aad: &str) -> String {
    let (kind, plain) = match value {
        Value::String(s) => ("str", s.clone()),
        Value::Number(n) if n.is_i64() => ("int", n.to_string()),
        Value::Number(n) => ("float", n.as_f64().unwrap().to_string()),
        Value::Bool(b) => ("bool", if *b { "True" } else { "False" }.to_string()),
        other => panic!("cannot seal {other}"),
    };
    format!("ENC[{kind}:{}:{aad}]", hex::encode(xor(plain.as_bytes(), DATA_KEY)))
}

fn encrypt_value(value: &Value, path: &mut Vec<String>, plaintext: bool, digest: &mut Sha512) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, inner) in map {
                path.push(key.clone());
                let plaintext = plaintext || key.ends_with(UNENCRYPTED_SUFFIX);
                out.insert(key.clone(), encrypt_value(inner, path, plaintext, digest));
                path.pop();
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| encrypt_value(item, path, plaintext, digest))
                .collect(),
        ),
        scalar => {
            if let Some(repr) = digest_repr(scalar) {
                digest.update(repr.as_bytes());
            }
            if plaintext || scalar.is_null() {
                scalar.clone()
            } else {
                let aad: String = path.iter().map(|k| format!("{k}:")).collect();
                Value::String(seal(scalar, &aad))
            }
        }
    }
}

/// Encrypt every leaf of `plain` and attach metadata with a valid MAC.
pub fn encrypt_document(plain: &Value) -> Value {
    let mut digest = Sha512::new();
    let mut encrypted = encrypt_value(plain, &mut Vec::new(), false, &mut digest);
    let mac = hex::encode_upper(digest.finalize());

    encrypted.as_object_mut().unwrap().insert(
        "sops".into(),
        json!({
            "mac": seal(&Value::String(mac), LAST_MODIFIED),
            "lastmodified": LAST_MODIFIED,
            "unencrypted_suffix": UNENCRYPTED_SUFFIX,
            "version": "3.8.1",
            "keys": [{ "id": KEY_ID, "enc": WRAPPED_KEY }],
        }),
    );
    encrypted
}

pub fn write_json(dir: &Path, name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(doc).unwrap())
        .unwrap_or_else(|e| panic!("Failed to write {path:?}: {e}"));
    path
}

/// Write `plain` encrypted, with a valid MAC, as `dir/name`.
pub fn write_document(dir: &Path, name: &str, plain: Value) -> PathBuf {
    write_json(dir, name, &encrypt_document(&plain))
}

/// Counts which emitter the orchestrator used, delegating to [`JsonStore`].
#[derive(Default)]
pub struct RecordingStore {
    pub plain_file_calls: Cell<usize>,
    pub value_calls: Cell<usize>,
}

impl Store for RecordingStore {
    fn load_encrypted_file(&self, bytes: &[u8]) -> Result<sops_layers::Tree, StoreError> {
        JsonStore.load_encrypted_file(bytes)
    }

    fn emit_plain_file(&self, branches: &[TreeBranch]) -> Result<Vec<u8>, StoreError> {
        self.plain_file_calls.set(self.plain_file_calls.get() + 1);
        JsonStore.emit_plain_file(branches)
    }

    fn emit_value(&self, value: &TreeValue) -> Result<Vec<u8>, StoreError> {
        self.value_calls.set(self.value_calls.get() + 1);
        JsonStore.emit_value(value)
    }
}

/// Output store whose emitters always fail.
pub struct BrokenStore;

impl Store for BrokenStore {
    fn load_encrypted_file(&self, bytes: &[u8]) -> Result<sops_layers::Tree, StoreError> {
        JsonStore.load_encrypted_file(bytes)
    }

    fn emit_plain_file(&self, _: &[TreeBranch]) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Unrepresentable("disk full".into()))
    }

    fn emit_value(&self, _: &TreeValue) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Unrepresentable("disk full".into()))
    }
}
