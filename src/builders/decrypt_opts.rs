//! src/builders/decrypt_opts.rs
//! Decrypt pipeline configuration: builder with safe defaults

use crate::aliases::ExtractionPath;
use crate::cipher::Cipher;
use crate::keyservice::KeyServiceClient;
use crate::stores::Store;
use crate::tree::PathSegment;
use std::path::PathBuf;

/// Everything one [`decrypt`](crate::decrypt) call needs.
///
/// Defaults: MAC verified, no layered decryption, full-document output, no key
/// services. Collaborators are borrowed; the options never own a cipher or store.
pub struct DecryptOpts<'a> {
    pub cipher: &'a dyn Cipher,
    pub input_store: &'a dyn Store,
    pub output_store: &'a dyn Store,
    pub input_path: PathBuf,
    /// Merge the numbered predecessor documents of `input_path`.
    pub layers: bool,
    /// Proceed even if the MAC is missing or does not match.
    pub ignore_mac: bool,
    /// Emit only the node at this path. Empty means the whole document.
    pub extract: ExtractionPath,
    pub key_services: &'a [Box<dyn KeyServiceClient>],
}

impl<'a> DecryptOpts<'a> {
    #[must_use]
    pub fn new(
        cipher: &'a dyn Cipher,
        input_store: &'a dyn Store,
        output_store: &'a dyn Store,
        input_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cipher,
            input_store,
            output_store,
            input_path: input_path.into(),
            layers: false,
            ignore_mac: false,
            extract: Vec::new(),
            key_services: &[],
        }
    }

    #[must_use]
    pub fn with_layers(mut self, layers: bool) -> Self {
        self.layers = layers;
        self
    }

    #[must_use]
    pub fn with_ignore_mac(mut self, ignore_mac: bool) -> Self {
        self.ignore_mac = ignore_mac;
        self
    }

    #[must_use]
    pub fn with_extract(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.extract = path.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_key_services(mut self, key_services: &'a [Box<dyn KeyServiceClient>]) -> Self {
        self.key_services = key_services;
        self
    }
}
