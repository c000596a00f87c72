//! Variable-name policy applied on top of the raw store.
//!
//! The store keeps every line; deciding which name a value is exported
//! under and which duplicate wins happens here.

use std::collections::BTreeMap;

use crate::core::constants;
use crate::error::{Result, ValidationError};

/// How stored names map to exported names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Export names exactly as stored.
    #[default]
    Verbatim,
    /// Drop a trailing `_SEGMENT` of at most `max_len` characters.
    StripSuffix { max_len: usize },
}

impl NamePolicy {
    /// Strip with the default suffix length.
    pub fn strip_suffix() -> Self {
        Self::StripSuffix {
            max_len: constants::DEFAULT_SUFFIX_MAX_LEN,
        }
    }

    /// Exported name for a stored name.
    pub fn apply<'a>(&self, name: &'a str) -> &'a str {
        match self {
            Self::Verbatim => name,
            Self::StripSuffix { max_len } => strip_suffix(name, *max_len),
        }
    }
}

/// Remove the last `_`-separated segment when it is at most `max_len`
/// characters long.
///
/// `API_KEY_TEST` becomes `API_KEY`; `API` and `DATABASE_PASSWORD` (with
/// `max_len` 5) are returned unchanged.
pub fn strip_suffix(name: &str, max_len: usize) -> &str {
    match name.rsplit_once('_') {
        Some((head, tail)) if tail.chars().count() <= max_len => head,
        _ => name,
    }
}

/// Collapse ordered pairs into a map; later names overwrite earlier ones.
pub fn collapse<K, V, I>(pairs: I) -> BTreeMap<K, V>
where
    K: Ord,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().collect()
}

/// Validate a variable name before it is written.
///
/// Names must be usable as environment variables:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError::InvalidName` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: String| ValidationError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let first = name
        .chars()
        .next()
        .ok_or_else(|| invalid("cannot be empty".to_string()))?;

    if first.is_ascii_digit() {
        return Err(invalid("cannot start with a digit".to_string()).into());
    }

    if let Some((i, ch)) = name
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(invalid(format!(
            "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
            ch,
            i + 1
        ))
        .into());
    }

    Ok(())
}
