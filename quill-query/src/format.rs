//! Rendering of [`Value`]s as literals of the target query syntax.
//!
//! The output is compared byte for byte by the remote parser, so every rule
//! here is part of the wire protocol:
//!
//! | value                | literal                          |
//! |----------------------|----------------------------------|
//! | `Text`, `Id`         | `"..."`, only `"` escaped        |
//! | `Bool`, `OptionalBool` | `true` / `false`               |
//! | `Timestamp`          | `"2024-03-01T12:30:45.123Z"`     |
//! | `Number`             | `42`, `-1.5`                     |
//! | `Enum`               | member name, unquoted            |
//! | `Sequence`           | `[a,b]`                          |
//! | `Set`, `Object`      | `{key:value,...}`                |
//!
//! Absent values (`Null`, `OptionalBool(None)`, objects with no non-empty
//! field) render as the empty string, and every container drops empty
//! children. A nested `Set` keeps its braces even when no entry renders. Nesting deeper than [`MAX_DEPTH`] also renders as empty unless
//! the formatter uses [`DepthPolicy::Error`].
//!
//! ```rust
//! use quill_query::{Formatter, Value};
//!
//! let f = Formatter::new();
//! assert_eq!(f.format(&Value::from("he said \"hi\""), 0).unwrap(), r#""he said \"hi\"""#);
//! assert_eq!(f.format(&Value::Sequence(vec![Value::Null]), 0).unwrap(), "[]");
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::params::ParameterSet;
use crate::quill_trace;
use crate::value::{ObjectField, Value};

/// Deepest nesting level that is still rendered.
pub const MAX_DEPTH: usize = 10;

/// What to do with values nested deeper than [`MAX_DEPTH`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthPolicy {
    /// Render them as absent.
    #[default]
    Truncate,
    /// Fail with `MaxDepthExceeded`.
    Error,
}

/// How string contents are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapePolicy {
    /// Escape `"` only. This is what the remote service expects.
    #[default]
    QuotesOnly,
    /// Escape `"`, `\` and control characters per the GraphQL string grammar.
    Full,
}

/// Value formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    depth_policy: DepthPolicy,
    escape: EscapePolicy,
}

impl Formatter {
    /// Formatter with the default (wire-compatible) policies.
    pub const fn new() -> Self {
        Self {
            depth_policy: DepthPolicy::Truncate,
            escape: EscapePolicy::QuotesOnly,
        }
    }

    /// Formatter that fails instead of truncating deep values.
    pub const fn strict() -> Self {
        Self {
            depth_policy: DepthPolicy::Error,
            escape: EscapePolicy::QuotesOnly,
        }
    }

    /// Set the depth policy.
    pub const fn with_depth_policy(mut self, policy: DepthPolicy) -> Self {
        self.depth_policy = policy;
        self
    }

    /// Set the escape policy.
    pub const fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    /// The depth policy in use.
    pub fn depth_policy(&self) -> DepthPolicy {
        self.depth_policy
    }

    /// The escape policy in use.
    pub fn escape_policy(&self) -> EscapePolicy {
        self.escape
    }

    /// Render `value` found at nesting level `depth`.
    ///
    /// An empty result means "absent"; callers drop it.
    pub fn format(&self, value: &Value, depth: usize) -> QueryResult<String> {
        if depth > MAX_DEPTH {
            return match self.depth_policy {
                DepthPolicy::Truncate => {
                    quill_trace!(depth, kind = value.kind(), "Dropping value nested past max depth");
                    Ok(String::new())
                }
                DepthPolicy::Error => Err(QueryError::max_depth_exceeded(MAX_DEPTH)),
            };
        }

        match value {
            Value::Null => Ok(String::new()),
            Value::Text(s) => Ok(self.quote(s)),
            Value::Id(id) => Ok(self.quote(&id.hyphenated().to_string())),
            Value::OptionalBool(None) => Ok(String::new()),
            Value::OptionalBool(Some(b)) | Value::Bool(b) => Ok(b.to_string()),
            Value::Timestamp(ts) => Ok(self.quote(&format_timestamp(ts))),
            Value::Number(n) => n.to_literal(),
            Value::Enum(name) => Ok(name.to_string()),
            Value::Sequence(items) => self.format_sequence(items, depth),
            Value::Set(set) => {
                let inner = self.serialize_set(set, depth + 1)?;
                Ok(format!("{{{}}}", inner))
            }
            Value::Object(fields) => {
                let inner = self.format_fields(fields, depth)?;
                Ok(wrap_object(inner))
            }
        }
    }

    /// Render the entries of `set` as `name:value` pairs at `depth`.
    ///
    /// This is the body of an argument list without the surrounding
    /// parentheses or braces.
    pub fn serialize_set(&self, set: &ParameterSet, depth: usize) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(set.len());
        for (name, value) in set.iter() {
            let text = self.format(value, depth)?;
            if !text.is_empty() {
                parts.push(format!("{}:{}", name, text));
            }
        }
        Ok(parts.join(","))
    }

    fn format_sequence(&self, items: &[Value], depth: usize) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let text = self.format(item, depth + 1)?;
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(format!("[{}]", parts.join(",")))
    }

    fn format_fields(&self, fields: &[ObjectField], depth: usize) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let text = self.format(&field.value, depth + 1)?;
            if !text.is_empty() {
                parts.push(format!("{}:{}", field.path.base_path()?, text));
            }
        }
        Ok(parts.join(","))
    }

    fn quote(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        match self.escape {
            EscapePolicy::QuotesOnly => {
                for c in s.chars() {
                    if c == '"' {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
            EscapePolicy::Full => {
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        '\u{08}' => out.push_str("\\b"),
                        '\u{0C}' => out.push_str("\\f"),
                        c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
                        c => out.push(c),
                    }
                }
            }
        }
        out.push('"');
        out
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-03-01T12:30:45.123Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn wrap_object(inner: String) -> String {
    if inner.is_empty() {
        inner
    } else {
        format!("{{{}}}", inner)
    }
}

/// Render `value` at depth 0 with the default formatter.
pub fn format_value(value: &Value) -> QueryResult<String> {
    Formatter::new().format(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;
    use crate::value::Number;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn fmt(value: &Value) -> String {
        Formatter::new().format(value, 0).unwrap()
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from(1i64), |inner, _| Value::Sequence(vec![inner]))
    }

    #[test]
    fn test_text_quotes_escaped() {
        assert_eq!(fmt(&Value::from("he said \"hi\"")), r#""he said \"hi\"""#);
        assert_eq!(fmt(&Value::from("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn test_text_backslash_untouched_by_default() {
        assert_eq!(fmt(&Value::from("a\\b\nc")), "\"a\\b\nc\"");
    }

    #[test]
    fn test_text_full_escape() {
        let f = Formatter::new().with_escape(EscapePolicy::Full);
        let out = f.format(&Value::from("a\\b\n\"c\"\u{1}"), 0).unwrap();
        assert_eq!(out, r#""a\\b\n\"c\"\u0001""#);
    }

    #[test]
    fn test_uuid() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(fmt(&Value::Id(id)), "\"67e55044-10b1-426f-9247-bb680e5fe0c8\"");
    }

    #[test]
    fn test_booleans() {
        assert_eq!(fmt(&Value::Bool(true)), "true");
        assert_eq!(fmt(&Value::Bool(false)), "false");
        assert_eq!(fmt(&Value::OptionalBool(Some(false))), "false");
        assert_eq!(fmt(&Value::OptionalBool(None)), "");
    }

    #[test]
    fn test_timestamp_millis_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(fmt(&Value::Timestamp(ts)), "\"2024-03-01T12:30:45.123Z\"");

        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(fmt(&Value::Timestamp(whole)), "\"2024-01-01T00:00:00.000Z\"");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(fmt(&Value::from(42i64)), "42");
        assert_eq!(fmt(&Value::from(-7i32)), "-7");
        assert_eq!(fmt(&Value::from(1.5f64)), "1.5");
        assert_eq!(fmt(&Value::from(3.0f64)), "3");
        assert_eq!(fmt(&Value::Number(Number::UInt(u64::MAX))), "18446744073709551615");
        assert_eq!(fmt(&Value::from(1_000_000i64)), "1000000");
    }

    #[test]
    fn test_non_finite_float_unsupported() {
        let err = Formatter::new().format(&Value::from(f64::NAN), 0).unwrap_err();
        assert!(err.is_value_error());
    }

    #[test]
    fn test_enum_verbatim() {
        assert_eq!(fmt(&Value::enum_member("ACTIVE")), "ACTIVE");
        assert_eq!(fmt(&Value::enum_member("InProgress")), "InProgress");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(fmt(&Value::Sequence(vec![])), "[]");
        assert_eq!(fmt(&Value::Sequence(vec![Value::Null, Value::OptionalBool(None)])), "[]");
        assert_eq!(
            fmt(&Value::Sequence(vec![Value::from(1i64), Value::Null, Value::from("x")])),
            "[1,\"x\"]"
        );
    }

    #[test]
    fn test_nested_set() {
        let mut set = ParameterSet::new();
        set.insert("first", 10i64).unwrap();
        set.insert("skip", Value::Null).unwrap();
        assert_eq!(fmt(&Value::Set(set)), "{first:10}");
        assert_eq!(fmt(&Value::Set(ParameterSet::new())), "{}");
    }

    #[test]
    fn test_nested_set_entries_count_toward_depth() {
        let set = ParameterSet::new().with("first", 1i64).unwrap();
        let f = Formatter::new();
        assert_eq!(f.format(&Value::Set(set.clone()), MAX_DEPTH - 1).unwrap(), "{first:1}");
        assert_eq!(f.format(&Value::Set(set.clone()), MAX_DEPTH).unwrap(), "{}");
        assert!(Formatter::strict().format(&Value::Set(set), MAX_DEPTH).is_err());
    }

    #[test]
    fn test_empty_nested_set_keeps_braces() {
        let page = ParameterSet::new().with("skip", Value::Null).unwrap();
        let params = ParameterSet::new()
            .with("page", page)
            .unwrap()
            .with("first", 1i64)
            .unwrap();
        assert_eq!(params.serialize().unwrap(), "page:{},first:1");

        let params = ParameterSet::new().with("page", ParameterSet::new()).unwrap();
        assert_eq!(params.serialize().unwrap(), "page:{}");
    }

    #[test]
    fn test_object_uses_base_path() {
        let fields = vec![
            ObjectField::new(FieldPath::new_static(".spu.serial", false), Value::from("S1")),
            ObjectField::new(FieldPath::new_static(".location", false), Value::Null),
            ObjectField::new(FieldPath::new_static(".count", false), Value::from(2i64)),
        ];
        assert_eq!(fmt(&Value::Object(fields)), "{spu:\"S1\",count:2}");
    }

    #[test]
    fn test_empty_object_is_absent() {
        let fields = vec![ObjectField::new(FieldPath::new_static(".a", false), Value::Null)];
        assert_eq!(fmt(&Value::Object(fields)), "");
        assert_eq!(fmt(&Value::Object(vec![])), "");
    }

    #[test]
    fn test_object_with_malformed_path_fails() {
        let fields = vec![ObjectField::new(FieldPath::new_static("a", false), Value::from(1i64))];
        let err = Formatter::new().format(&Value::Object(fields), 0).unwrap_err();
        assert!(err.is_malformed_path());
    }

    #[test]
    fn test_null() {
        assert_eq!(fmt(&Value::Null), "");
    }

    #[test]
    fn test_depth_limit_truncates() {
        let f = Formatter::new();
        assert_eq!(f.format(&Value::from(1i64), MAX_DEPTH).unwrap(), "1");
        assert_eq!(f.format(&Value::from(1i64), MAX_DEPTH + 1).unwrap(), "");
        assert_eq!(f.format(&Value::from("x"), 50).unwrap(), "");

        // Innermost scalar sits at depth 10: still rendered.
        assert_eq!(f.format(&nested(10), 0).unwrap(), "[[[[[[[[[[1]]]]]]]]]]");
        // One more level pushes it past the limit and every list empties out.
        assert_eq!(f.format(&nested(11), 0).unwrap(), "[[[[[[[[[[[]]]]]]]]]]]");
    }

    #[test]
    fn test_depth_limit_strict() {
        let f = Formatter::strict();
        let err = f.format(&nested(11), 0).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::MaxDepthExceeded);
        assert!(f.format(&nested(10), 0).is_ok());
    }

    #[test]
    fn test_format_value_helper() {
        assert_eq!(format_value(&Value::Bool(true)).unwrap(), "true");
    }
}
