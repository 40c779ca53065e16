//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All pipeline operations return [`Result<T, SopsError>`](SopsError). The messages are
//! written to be shown to an end user as-is, and [`SopsError::exit_code`] maps each
//! variant to a stable process exit status.

use crate::cipher::CipherError;
use crate::consts::codes;
use crate::stores::StoreError;
use crate::tree::TruncateError;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for every stage of the decrypt pipeline.
#[derive(Error, Debug)]
pub enum SopsError {
    /// The document name does not end in a run of decimal digits.
    #[error("could not extract layer from {}", .path.display())]
    LayerUndetectable { path: PathBuf },

    /// The trailing digit run does not fit in a layer number.
    #[error("could not parse layer {raw}: {source}")]
    LayerUnparsable {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    /// A layer in the expected chain is absent from the filesystem.
    ///
    /// Resolution is all-or-nothing: no partial chain accompanies this error.
    #[error("missing layer \"{}\": {source}", .path.display())]
    MissingLayer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input document could not be read from disk.
    #[error("error reading {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input store could not parse the document.
    #[error("error loading file: {0}")]
    Store(#[from] StoreError),

    /// No key service could unwrap any of the document's master keys.
    #[error("could not retrieve data key: {details}")]
    DataKey { details: String },

    /// A single value failed to decrypt.
    #[error("could not decrypt value at '{location}': {source}")]
    Decrypt {
        location: String,
        #[source]
        source: CipherError,
    },

    /// The MAC stored in the metadata does not match the decrypted content.
    #[error("MAC mismatch. File has {stored}, computed {computed}")]
    MacMismatch { stored: String, computed: String },

    /// The document carries no MAC and verification was not bypassed.
    #[error("no MAC was found on the input file, verification failed")]
    MacNotFound,

    /// The extraction path does not resolve inside the document.
    #[error("error truncating tree: {0}")]
    Truncate(#[from] TruncateError),

    /// The output store failed to emit a full document.
    #[error("Error dumping file: {0}")]
    DumpingFile(#[source] StoreError),

    /// The output store failed to emit a bare value.
    #[error("Error dumping tree: {0}")]
    DumpingValue(#[source] StoreError),

    /// An extraction path string is not of the form `["key"][0]...`.
    #[error("invalid tree path format '{path}': {reason}")]
    InvalidTreePath { path: String, reason: String },
}

impl SopsError {
    /// Process exit status a CLI should use for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            SopsError::LayerUndetectable { .. }
            | SopsError::LayerUnparsable { .. }
            | SopsError::MissingLayer { .. }
            | SopsError::Truncate(_) => codes::ERROR_GENERIC,
            SopsError::ReadInput { .. } | SopsError::Store(_) => codes::COULD_NOT_READ_INPUT_FILE,
            SopsError::DataKey { .. } => codes::COULD_NOT_RETRIEVE_KEY,
            SopsError::Decrypt { .. } => codes::ERROR_DECRYPTING_TREE,
            SopsError::MacMismatch { .. } => codes::MAC_MISMATCH,
            SopsError::MacNotFound => codes::MAC_NOT_FOUND,
            SopsError::DumpingFile(_) | SopsError::DumpingValue(_) => codes::ERROR_DUMPING_TREE,
            SopsError::InvalidTreePath { .. } => codes::INVALID_TREE_PATH_FORMAT,
        }
    }

    /// `true` for output-store serialization failures, as opposed to decryption failures.
    #[must_use]
    pub const fn is_dumping(&self) -> bool {
        matches!(self, SopsError::DumpingFile(_) | SopsError::DumpingValue(_))
    }
}
