//! Path safety for the archive download route.
//!
//! Whatever path the client puts after `/zip`, only the final component is
//! trusted. The sanitized name is always joined fresh under the served root,
//! so traversal sequences and embedded separators can never escape it.

use std::path::{Component, Path};

use crate::errors::RuntimeError;

/// Extracts the basename of a client-supplied entry reference.
///
/// Inputs without a usable final component (empty string, `/`, anything
/// terminating in `..`) and non-UTF-8 names are rejected as invalid input
/// rather than passed through.
pub fn sanitize_entry_name(raw: &str) -> Result<String, RuntimeError> {
    let name = Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(RuntimeError::InvalidInput)?;

    // file_name() never yields "..", "/" or an empty string, but make the
    // invariant explicit before the result is joined under the served root.
    debug_assert!(matches!(
        Path::new(name).components().next(),
        Some(Component::Normal(_))
    ));

    Ok(name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_entry_name("/a.txt").unwrap(), "a.txt");
        assert_eq!(sanitize_entry_name("a.txt").unwrap(), "a.txt");
        assert_eq!(sanitize_entry_name("/sub").unwrap(), "sub");
    }

    #[test]
    fn discards_embedded_directories() {
        assert_eq!(sanitize_entry_name("/foo/bar/baz.txt").unwrap(), "baz.txt");
        assert_eq!(sanitize_entry_name("foo///baz.txt").unwrap(), "baz.txt");
    }

    #[test]
    fn confines_traversal_sequences() {
        assert_eq!(
            sanitize_entry_name("/../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(sanitize_entry_name("..%2Fetc").unwrap(), "..%2Fetc");
    }

    #[test]
    fn rejects_inputs_without_a_basename() {
        assert!(sanitize_entry_name("").is_err());
        assert!(sanitize_entry_name("/").is_err());
        assert!(sanitize_entry_name("..").is_err());
        assert!(sanitize_entry_name("/foo/..").is_err());
    }

    #[test]
    fn trailing_slash_resolves_to_last_component() {
        assert_eq!(sanitize_entry_name("/sub/").unwrap(), "sub");
    }
}
