//! Named arguments of one request operation.
//!
//! ```rust
//! use quill_query::ParameterSet;
//!
//! let mut params = ParameterSet::new();
//! params.insert("first", 20).unwrap();
//! params.insert_optional("after", None::<String>).unwrap();
//! params.insert("location", "Lab 3").unwrap();
//!
//! assert_eq!(params.len(), 2);
//! assert_eq!(params.serialize().unwrap(), r#"first:20,location:"Lab 3""#);
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::{QueryError, QueryResult};
use crate::format::Formatter;
use crate::value::{ToValue, Value};

/// Ordered, uniquely named request arguments.
///
/// Entries render in insertion order. Entries whose value renders empty
/// are left out of the output entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<SmolStr, Value>,
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Add an argument.
    ///
    /// With `optional` set, an absent value is skipped as if never added.
    /// Fails if `name` is already present.
    pub fn add(
        &mut self,
        name: impl Into<SmolStr>,
        value: impl ToValue,
        optional: bool,
    ) -> QueryResult<&mut Self> {
        let name = name.into();
        let value = value.to_value();

        if optional && value.is_absent() {
            return Ok(self);
        }
        if self.entries.contains_key(&name) {
            return Err(QueryError::duplicate_key(name.as_str()));
        }

        self.entries.insert(name, value);
        Ok(self)
    }

    /// Add a required argument.
    pub fn insert(&mut self, name: impl Into<SmolStr>, value: impl ToValue) -> QueryResult<&mut Self> {
        self.add(name, value, false)
    }

    /// Add an argument that is skipped when absent.
    pub fn insert_optional(
        &mut self,
        name: impl Into<SmolStr>,
        value: impl ToValue,
    ) -> QueryResult<&mut Self> {
        self.add(name, value, true)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<SmolStr>, value: impl ToValue) -> QueryResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Builder form of [`insert_optional`](Self::insert_optional).
    pub fn with_optional(mut self, name: impl Into<SmolStr>, value: impl ToValue) -> QueryResult<Self> {
        self.insert_optional(name, value)?;
        Ok(self)
    }

    /// Look up an argument by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Check whether an argument is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of stored arguments, including ones that will render empty.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no arguments are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as `name:value,...` with the default formatter.
    ///
    /// Returns an empty string when no argument renders.
    pub fn serialize(&self) -> QueryResult<String> {
        self.serialize_with(&Formatter::new())
    }

    /// Render with a specific formatter.
    pub fn serialize_with(&self, formatter: &Formatter) -> QueryResult<String> {
        formatter.serialize_set(self, 0)
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a SmolStr, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, SmolStr, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;
    use crate::value::ObjectField;

    #[test]
    fn test_preserves_insertion_order() {
        let params = ParameterSet::new()
            .with("zeta", 1)
            .and_then(|p| p.with("alpha", 2))
            .and_then(|p| p.with("mid", 3))
            .unwrap();
        assert_eq!(params.serialize().unwrap(), "zeta:1,alpha:2,mid:3");
    }

    #[test]
    fn test_duplicate_key() {
        let mut params = ParameterSet::new();
        params.insert("uuid", "a").unwrap();
        let err = params.insert("uuid", "b").unwrap_err();
        assert!(err.is_duplicate_key());
        assert_eq!(params.get("uuid"), Some(&Value::Text("a".into())));
    }

    #[test]
    fn test_optional_absent_is_skipped() {
        let mut params = ParameterSet::new();
        params.insert_optional("after", None::<String>).unwrap();
        params.insert_optional("archived", Value::OptionalBool(None)).unwrap();
        assert!(params.is_empty());
        assert!(!params.contains("after"));

        // Skipped entries never claim the name.
        params.insert("after", "cursor").unwrap();
        assert_eq!(params.serialize().unwrap(), "after:\"cursor\"");
    }

    #[test]
    fn test_optional_present_is_kept() {
        let mut params = ParameterSet::new();
        params.insert_optional("archived", Some(false)).unwrap();
        assert_eq!(params.serialize().unwrap(), "archived:false");
    }

    #[test]
    fn test_required_absent_is_stored_but_not_rendered() {
        let mut params = ParameterSet::new();
        params.insert("filter", None::<i32>).unwrap();
        params.insert("first", 5).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.serialize().unwrap(), "first:5");
    }

    #[test]
    fn test_empty_set_serializes_empty() {
        assert_eq!(ParameterSet::new().serialize().unwrap(), "");

        let mut params = ParameterSet::new();
        params.insert("a", Value::Null).unwrap();
        assert_eq!(params.serialize().unwrap(), "");
    }

    #[test]
    fn test_empty_object_entry_dropped() {
        let empty = Value::Object(vec![ObjectField::new(
            FieldPath::new_static(".location", false),
            Value::Null,
        )]);
        let mut params = ParameterSet::new();
        params.insert("filter", empty).unwrap();
        params.insert("first", 10).unwrap();
        assert_eq!(params.serialize().unwrap(), "first:10");
    }

    #[test]
    fn test_nested_set() {
        let inner = ParameterSet::new().with("limit", 3).unwrap();
        let outer = ParameterSet::new().with("page", inner).unwrap();
        assert_eq!(outer.serialize().unwrap(), "page:{limit:3}");
    }

    #[test]
    fn test_iter() {
        let params = ParameterSet::new().with("a", 1).unwrap();
        let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a"]);
    }
}
