//! # Constants
//!
//! This module defines constants shared by the loader, the tree walker and the error
//! type: the default unencrypted suffix and the process exit codes.

/// Key suffix marking values that are stored in plaintext.
///
/// Documents written by older tool versions omit the suffix from their metadata and
/// implicitly use this one; the loader restores it.
pub const DEFAULT_UNENCRYPTED_SUFFIX: &str = "_unencrypted";

/// Separator appended after every key when building a value's additional data.
pub const ADDITIONAL_DATA_SEPARATOR: char = ':';

/// Process exit codes, one per error class a CLI front-end can report.
///
/// The numbering follows the established sops exit status table so scripts that
/// inspect `$?` keep working.
pub mod codes {
    pub const ERROR_GENERIC: i32 = 1;
    pub const COULD_NOT_READ_INPUT_FILE: i32 = 2;
    pub const ERROR_DUMPING_TREE: i32 = 4;
    pub const ERROR_DECRYPTING_TREE: i32 = 25;
    pub const MAC_MISMATCH: i32 = 51;
    pub const MAC_NOT_FOUND: i32 = 52;
    pub const INVALID_TREE_PATH_FORMAT: i32 = 91;
    pub const COULD_NOT_RETRIEVE_KEY: i32 = 128;
}
