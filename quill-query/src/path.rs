//! Field paths that tie a struct field to its place in the remote schema.
//!
//! A path such as `.spu.serial` does two jobs. Its first segment (`spu`) is
//! the argument key used when the field is written into a request, and the
//! whole path folds into a nested selection (`spu{serial}`) when the field is
//! requested back in the response.
//!
//! ```rust
//! use quill_query::FieldPath;
//!
//! let path = FieldPath::parse(".spu.serial").unwrap();
//! assert_eq!(path.base_path().unwrap(), "spu");
//! assert_eq!(path.hierarchy_name(), "spu{serial}");
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::{QueryError, QueryResult};

/// Marker every path starts with.
pub const ROOT_MARKER: char = '.';

/// Separator between nested field segments.
pub const FIELD_SEPARATOR: char = '.';

const STRUCTURAL_DELIMITERS: [char; 3] = ['.', '[', ']'];

/// A field path annotation.
///
/// Generated code builds these with [`FieldPath::new_static`] after the
/// derive macro has checked the path with [`validate`]; runtime callers use
/// [`FieldPath::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    path: Cow<'static, str>,
    mandatory: bool,
}

impl FieldPath {
    /// Create a path from a static string without validating it.
    #[inline]
    pub const fn new_static(path: &'static str, mandatory: bool) -> Self {
        Self {
            path: Cow::Borrowed(path),
            mandatory,
        }
    }

    /// Parse and validate a path.
    pub fn parse(path: impl Into<Cow<'static, str>>) -> QueryResult<Self> {
        let path = path.into();
        validate(&path)?;
        Ok(Self {
            path,
            mandatory: false,
        })
    }

    /// Mark the field as mandatory.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// The raw path string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Whether the remote schema requires this field.
    ///
    /// Advisory only; nothing in this crate enforces it.
    #[inline]
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The first field segment after the root marker.
    pub fn base_path(&self) -> QueryResult<&str> {
        base_path(&self.path)
    }

    /// The path rewritten as a nested selection, e.g. `.a.b.c` -> `a{b{c}}`.
    pub fn hierarchy_name(&self) -> String {
        hierarchy_name(&self.path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Check that `path` starts with the root marker and names at least one field.
pub fn validate(path: &str) -> QueryResult<()> {
    base_path(path).map(|_| ())
}

/// Extract the first field segment of `path`.
pub fn base_path(path: &str) -> QueryResult<&str> {
    let rest = path
        .strip_prefix(ROOT_MARKER)
        .ok_or_else(|| QueryError::malformed_path(path, "path must start with `.`"))?;

    rest.split(STRUCTURAL_DELIMITERS)
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| QueryError::malformed_path(path, "path has no field segment after the root"))
}

/// Fold `path` into nested selection syntax.
///
/// Anything other than ASCII letters, digits and the field separator is
/// dropped first, so `.items[*].name` becomes `items{name}`.
pub fn hierarchy_name(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == FIELD_SEPARATOR)
        .collect();

    cleaned
        .split(FIELD_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .rev()
        .fold(String::new(), |inner, segment| {
            if inner.is_empty() {
                segment.to_string()
            } else {
                format!("{}{{{}}}", segment, inner)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path() {
        let path = FieldPath::parse(".spu.serial").unwrap();
        assert_eq!(path.base_path().unwrap(), "spu");
    }

    #[test]
    fn test_base_path_with_index() {
        assert_eq!(base_path(".foo[*].bar").unwrap(), "foo");
        assert_eq!(base_path(".foo.bar[*]").unwrap(), "foo");
        assert_eq!(base_path(".uuid").unwrap(), "uuid");
    }

    #[test]
    fn test_missing_root_marker() {
        let err = FieldPath::parse("spu.serial").unwrap_err();
        assert!(err.is_malformed_path());
    }

    #[test]
    fn test_root_only() {
        assert!(FieldPath::parse(".").unwrap_err().is_malformed_path());
        assert!(FieldPath::parse("").unwrap_err().is_malformed_path());
        assert!(FieldPath::parse(".[0]").unwrap_err().is_malformed_path());
    }

    #[test]
    fn test_hierarchy_name() {
        assert_eq!(hierarchy_name(".spu.serial"), "spu{serial}");
        assert_eq!(hierarchy_name(".a.b.c"), "a{b{c}}");
        assert_eq!(hierarchy_name(".uuid"), "uuid");
    }

    #[test]
    fn test_hierarchy_name_strips_indexers() {
        assert_eq!(hierarchy_name(".foo.bar[*]"), "foo{bar}");
        assert_eq!(hierarchy_name(".items[*].name"), "items{name}");
    }

    #[test]
    fn test_new_static_is_unchecked() {
        let path = FieldPath::new_static("broken", true);
        assert!(path.is_mandatory());
        assert!(path.base_path().is_err());
    }

    #[test]
    fn test_display() {
        let path = FieldPath::parse(".vv.location").unwrap();
        assert_eq!(path.to_string(), ".vv.location");
    }
}
