//! # Key Services
//!
//! Clients able to unwrap a document's data key from one of its master keys. Several
//! clients may be configured; [`get_data_key`] tries them in order for every master key
//! listed in the document metadata and stops at the first success.

use crate::aliases::DataKey;
use crate::error::SopsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A wrapped copy of the data key, as recorded in the document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterKey {
    /// Identifier of the key that wrapped the data key (ARN, fingerprint, URI...).
    pub id: String,
    /// The wrapped data key, in whatever encoding the owning key service uses.
    pub enc: String,
}

impl MasterKey {
    pub fn new(id: impl Into<String>, enc: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enc: enc.into(),
        }
    }
}

/// Handle to a service that can unwrap master keys. Calls are synchronous.
pub trait KeyServiceClient {
    fn decrypt(&self, key: &MasterKey) -> Result<DataKey, KeyServiceError>;
}

/// Failure reported by a [`KeyServiceClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyServiceError {
    /// The service does not hold the master key.
    #[error("key {0} is not managed by this service")]
    UnknownKey(String),

    /// The service holds the key but refused or failed to unwrap it.
    #[error("key {key_id} could not be unwrapped: {reason}")]
    Rejected { key_id: String, reason: String },
}

/// Unwrap the data key using the first master key any client accepts.
///
/// Master keys are tried in metadata order; for each, clients are tried in the order
/// given. Every failure is collected into the returned error.
pub fn get_data_key(
    master_keys: &[MasterKey],
    key_services: &[Box<dyn KeyServiceClient>],
) -> Result<DataKey, SopsError> {
    if master_keys.is_empty() {
        return Err(SopsError::DataKey {
            details: "no master keys in metadata".into(),
        });
    }
    if key_services.is_empty() {
        return Err(SopsError::DataKey {
            details: "no key services configured".into(),
        });
    }

    let mut failures = Vec::new();
    for master_key in master_keys {
        for (index, client) in key_services.iter().enumerate() {
            match client.decrypt(master_key) {
                Ok(data_key) => {
                    debug!(key_id = %master_key.id, service = index, "unwrapped data key");
                    return Ok(data_key);
                }
                Err(err) => {
                    debug!(key_id = %master_key.id, service = index, error = %err, "key service failed");
                    failures.push(format!("{}: {err}", master_key.id));
                }
            }
        }
    }

    Err(SopsError::DataKey {
        details: failures.join("; "),
    })
}
