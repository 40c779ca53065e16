//! Parsing of extraction paths written as `["key"][0]['other']`.
//!
//! Quoted components select keys, bare non-negative integers select array indices.
//! Quotes are not escaped: a component runs until the matching closing quote.

use super::PathSegment;
use crate::aliases::ExtractionPath;
use crate::error::SopsError;
use std::iter::Peekable;
use std::str::CharIndices;

/// Parse an extraction path. The empty string yields an empty path.
///
/// # Example
///
/// ```
/// use sops_layers::tree::{parse_tree_path, PathSegment};
///
/// let path = parse_tree_path(r#"["db"]["hosts"][0]"#)?;
/// assert_eq!(
///     path,
///     vec![
///         PathSegment::Key("db".into()),
///         PathSegment::Key("hosts".into()),
///         PathSegment::Index(0),
///     ]
/// );
/// # Ok::<(), sops_layers::SopsError>(())
/// ```
pub fn parse_tree_path(input: &str) -> Result<ExtractionPath, SopsError> {
    let invalid = |reason: String| SopsError::InvalidTreePath {
        path: input.to_string(),
        reason,
    };

    let mut segments = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '[' {
            return Err(invalid(format!("expected '[' at offset {pos}, found {c:?}")));
        }

        let segment = match chars.peek().copied() {
            Some((_, quote @ ('"' | '\''))) => {
                chars.next();
                let key = take_until(&mut chars, quote)
                    .ok_or_else(|| invalid(format!("unterminated {quote} in component")))?;
                PathSegment::Key(key)
            }
            Some(_) => {
                let digits = take_while_digit(&mut chars);
                if digits.is_empty() {
                    return Err(invalid(
                        "components must be quoted keys or non-negative integers".into(),
                    ));
                }
                let index = digits
                    .parse::<usize>()
                    .map_err(|e| invalid(format!("invalid index {digits}: {e}")))?;
                PathSegment::Index(index)
            }
            None => return Err(invalid("unterminated '['".into())),
        };

        match chars.next() {
            Some((_, ']')) => segments.push(segment),
            Some((pos, c)) => {
                return Err(invalid(format!("expected ']' at offset {pos}, found {c:?}")))
            }
            None => return Err(invalid("unterminated '['".into())),
        }
    }

    Ok(segments)
}

fn take_until(chars: &mut Peekable<CharIndices<'_>>, end: char) -> Option<String> {
    let mut out = String::new();
    for (_, c) in chars.by_ref() {
        if c == end {
            return Some(out);
        }
        out.push(c);
    }
    None
}

fn take_while_digit(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut out = String::new();
    while let Some((_, c)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
        out.push(c);
    }
    out
}
