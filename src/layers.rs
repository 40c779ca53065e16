//! # Layer Resolution
//!
//! A layered document's name ends in its layer number: `secrets003.yaml` is layer 3
//! and builds on `secrets002.yaml` and `secrets001.yaml`. This module infers that
//! chain from a single path.
//!
//! Only the trailing digit run of the name (extension excluded) counts, and it is the
//! only part rewritten. Its width is kept: every predecessor is rendered zero-padded to
//! the same number of digits.

use crate::aliases::LayerChain;
use crate::error::SopsError;
use std::fs;
use std::path::{is_separator, Path, PathBuf};
use tracing::debug;

/// Resolve the predecessor layers of `path`, nearest first.
///
/// For layer N the result holds layers N-1 down to 1; layer 0 or 1 yields an empty
/// chain. Every layer must exist: the first missing one fails the whole resolution and
/// no partial chain is returned.
///
/// # Errors
///
/// - [`SopsError::LayerUndetectable`] - the name does not end in digits
/// - [`SopsError::LayerUnparsable`] - the digits do not fit a layer number
/// - [`SopsError::MissingLayer`] - a predecessor file does not exist
///
/// # Example
///
/// ```
/// use sops_layers::resolve_layers;
/// # let dir = tempfile::tempdir()?;
/// # std::fs::write(dir.path().join("app01.json"), "{}")?;
///
/// let layers = resolve_layers(dir.path().join("app02.json"))?;
/// assert_eq!(layers, vec![dir.path().join("app01.json")]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve_layers(path: impl AsRef<Path>) -> Result<LayerChain, SopsError> {
    let path = path.as_ref();
    let undetectable = || SopsError::LayerUndetectable {
        path: path.to_path_buf(),
    };

    let full = path.to_str().ok_or_else(undetectable)?;
    let (base, ext) = split_extension(full);
    let raw = trailing_digits(base);
    if raw.is_empty() {
        return Err(undetectable());
    }

    let layer: u64 = raw.parse().map_err(|source| SopsError::LayerUnparsable {
        raw: raw.to_string(),
        source,
    })?;

    let template = LayerTemplate::new(base, raw, ext);
    let mut layers = Vec::new();
    for i in (1..layer).rev() {
        let layer_path = PathBuf::from(template.render(i));
        fs::metadata(&layer_path).map_err(|source| SopsError::MissingLayer {
            path: layer_path.clone(),
            source,
        })?;
        debug!(layer = i, path = %layer_path.display(), "found layer");
        layers.push(layer_path);
    }

    Ok(layers)
}

/// The input path cut just before its trailing digit run, ready to be rejoined around a
/// differently numbered layer.
struct LayerTemplate<'a> {
    prefix: &'a str,
    width: usize,
    ext: &'a str,
}

impl<'a> LayerTemplate<'a> {
    fn new(base: &'a str, raw: &str, ext: &'a str) -> Self {
        Self {
            prefix: &base[..base.len() - raw.len()],
            width: raw.len(),
            ext,
        }
    }

    fn render(&self, layer: u64) -> String {
        format!(
            "{prefix}{layer:0width$}{ext}",
            prefix = self.prefix,
            width = self.width,
            ext = self.ext
        )
    }
}

/// Split at the last `.` of the final path component. The extension keeps its dot and
/// is empty when the final component has none.
fn split_extension(path: &str) -> (&str, &str) {
    let name_start = path.rfind(is_separator).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => path.split_at(name_start + dot),
        None => (path, ""),
    }
}

/// The maximal run of ASCII digits at the end of `s`.
fn trailing_digits(s: &str) -> &str {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(s.len(), |(i, _)| i);
    &s[start..]
}
