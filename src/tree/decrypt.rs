//! In-place decryption of every leaf of a [`Tree`].
//!
//! Each string leaf is decrypted with additional data built from the keys leading to it
//! (`outer:inner:`). Values beneath a key carrying the unencrypted suffix are left as-is.
//! Every scalar, decrypted or not, feeds a SHA-512 digest in walk order; the digest is
//! what the stored MAC is checked against.

use super::{Tree, TreeBranch, TreeValue};
use crate::aliases::DataKey;
use crate::cipher::Cipher;
use crate::consts::ADDITIONAL_DATA_SEPARATOR;
use crate::error::SopsError;
use sha2::{Digest, Sha512};

struct Walk<'a> {
    cipher: &'a dyn Cipher,
    key: &'a DataKey,
    suffix: &'a str,
    digest: Sha512,
}

impl Tree {
    /// Decrypt every branch in place and return the MAC computed over the plaintext,
    /// as upper-case hex.
    pub fn decrypt(&mut self, key: &DataKey, cipher: &dyn Cipher) -> Result<String, SopsError> {
        let suffix = self.metadata.unencrypted_suffix().to_string();
        let mut walk = Walk {
            cipher,
            key,
            suffix: &suffix,
            digest: Sha512::new(),
        };

        let mut path = Vec::new();
        for branch in &mut self.branches {
            walk.branch(branch, &mut path, false)?;
        }

        Ok(hex::encode_upper(walk.digest.finalize()))
    }
}

impl Walk<'_> {
    fn branch(
        &mut self,
        branch: &mut TreeBranch,
        path: &mut Vec<String>,
        plaintext: bool,
    ) -> Result<(), SopsError> {
        for item in &mut branch.0 {
            let plaintext = plaintext || item.key.ends_with(self.suffix);
            path.push(item.key.clone());
            let result = self.value(&mut item.value, path, plaintext);
            path.pop();
            result?;
        }
        Ok(())
    }

    fn value(
        &mut self,
        value: &mut TreeValue,
        path: &mut Vec<String>,
        plaintext: bool,
    ) -> Result<(), SopsError> {
        match value {
            TreeValue::Branch(branch) => self.branch(branch, path, plaintext),
            // Array elements share the additional data of the key holding the array.
            TreeValue::Array(items) => items
                .iter_mut()
                .try_for_each(|item| self.value(item, path, plaintext)),
            TreeValue::String(ciphertext) if !plaintext => {
                let additional_data = additional_data(path);
                let decrypted = self
                    .cipher
                    .decrypt(ciphertext, self.key, &additional_data)
                    .map_err(|source| SopsError::Decrypt {
                        location: additional_data,
                        source,
                    })?;
                self.absorb(&decrypted);
                *value = decrypted;
                Ok(())
            }
            scalar => {
                self.absorb(scalar);
                Ok(())
            }
        }
    }

    fn absorb(&mut self, value: &TreeValue) {
        if let Some(bytes) = value.digest_bytes() {
            self.digest.update(&bytes);
        }
    }
}

/// `a:b:c:` for the path `[a, b, c]`.
pub(crate) fn additional_data(path: &[String]) -> String {
    let mut out = String::new();
    for key in path {
        out.push_str(key);
        out.push(ADDITIONAL_DATA_SEPARATOR);
    }
    out
}
