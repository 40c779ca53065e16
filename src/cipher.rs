//! # Cipher
//!
//! The value-level decryption primitive. The tree walker hands every encrypted leaf
//! to a [`Cipher`] together with the document's data key and the leaf's additional
//! data; the cipher returns the typed plaintext.
//!
//! The algorithm itself is not part of this crate. Implementations bind a concrete
//! AEAD (and its ciphertext encoding) behind this trait.

use crate::aliases::DataKey;
use crate::tree::TreeValue;
use thiserror::Error;

/// Decrypts a single encoded ciphertext into a typed tree value.
pub trait Cipher {
    /// Decrypt `ciphertext` with `key`, authenticating `additional_data`.
    ///
    /// `additional_data` is the colon-joined key path of the value (for example
    /// `db:password:`), or the metadata's last-modified timestamp for the MAC.
    fn decrypt(
        &self,
        ciphertext: &str,
        key: &DataKey,
        additional_data: &str,
    ) -> Result<TreeValue, CipherError>;
}

/// Failure reported by a [`Cipher`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The ciphertext is not in the encoding this cipher understands.
    #[error("malformed ciphertext: {0}")]
    Malformed(String),

    /// The ciphertext failed authentication (wrong key or tampered additional data).
    #[error("authentication failed: {0}")]
    Authentication(String),
}
