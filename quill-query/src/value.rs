//! The closed set of value kinds a request argument can hold.
//!
//! Every Rust value headed for a request is converted into a [`Value`] once,
//! through [`ToValue`], and the formatter matches on the variant. There is
//! one variant per literal rule of the target query syntax.
//!
//! ```rust
//! use quill_query::{ToValue, Value};
//!
//! assert_eq!("hi".to_value(), Value::Text("hi".into()));
//! assert_eq!(Some(3u8).to_value(), Value::from(3i64));
//! assert_eq!(None::<bool>.to_value(), Value::Null);
//! ```

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{QueryError, QueryResult};
use crate::params::ParameterSet;
use crate::path::FieldPath;

/// A value ready to be formatted into request text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; formats to nothing.
    Null,
    /// Quoted string.
    Text(String),
    /// Quoted UUID.
    Id(Uuid),
    /// Tri-state boolean; `None` formats to nothing.
    ///
    /// Only built explicitly through [`Value::optional_bool`]. The blanket
    /// `Option<T>` conversion maps `Option<bool>` to `Bool` or `Null`,
    /// which render identically.
    OptionalBool(Option<bool>),
    /// Boolean.
    Bool(bool),
    /// Quoted timestamp.
    Timestamp(DateTime<Utc>),
    /// Integer or float.
    Number(Number),
    /// Enum member name, rendered verbatim.
    Enum(Cow<'static, str>),
    /// List of values.
    Sequence(Vec<Value>),
    /// Nested named arguments.
    Set(ParameterSet),
    /// Annotated object fields.
    Object(Vec<ObjectField>),
}

/// One annotated field of an object value.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    /// Where the field lives in the remote schema.
    pub path: FieldPath,
    /// The field's value.
    pub value: Value,
}

impl ObjectField {
    /// Pair a path with a value.
    pub fn new(path: FieldPath, value: Value) -> Self {
        Self { path, value }
    }
}

/// Numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer too large for `i64`.
    UInt(u64),
    /// Floating point.
    Float(f64),
}

impl Number {
    /// Render as a base-10 literal.
    ///
    /// Non-finite floats have no literal form.
    pub fn to_literal(&self) -> QueryResult<String> {
        match *self {
            Self::Int(v) => Ok(v.to_string()),
            Self::UInt(v) => Ok(v.to_string()),
            Self::Float(v) if v.is_finite() => Ok(v.to_string()),
            Self::Float(v) => Err(QueryError::unsupported_value(
                "float",
                format!("{} has no literal representation", v),
            )),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

impl Value {
    /// Whether this value counts as absent for omit-if-absent parameters.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::OptionalBool(None))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Id(_) => "id",
            Self::OptionalBool(_) => "optional bool",
            Self::Bool(_) => "bool",
            Self::Timestamp(_) => "timestamp",
            Self::Number(_) => "number",
            Self::Enum(_) => "enum",
            Self::Sequence(_) => "sequence",
            Self::Set(_) => "set",
            Self::Object(_) => "object",
        }
    }

    /// Tri-state boolean from an `Option<bool>`.
    pub fn optional_bool(value: Option<bool>) -> Self {
        Self::OptionalBool(value)
    }

    /// Enum member by name.
    pub fn enum_member(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Enum(name.into())
    }

    /// Convert a JSON document. Objects become nested parameter sets.
    pub fn from_json(json: serde_json::Value) -> QueryResult<Self> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Self::Number(Number::Int(v))
                } else if let Some(v) = n.as_u64() {
                    Self::Number(Number::UInt(v))
                } else if let Some(v) = n.as_f64() {
                    Self::Number(Number::Float(v))
                } else {
                    return Err(QueryError::unsupported_value("number", n.to_string()));
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<QueryResult<_>>()?,
            ),
            serde_json::Value::Object(map) => {
                let mut set = ParameterSet::with_capacity(map.len());
                for (key, value) in map {
                    set.insert(key, Self::from_json(value)?)?;
                }
                Self::Set(set)
            }
        })
    }

    /// Convert anything serde can serialize, going through JSON.
    pub fn from_serde<T: Serialize + ?Sized>(value: &T) -> QueryResult<Self> {
        let json = serde_json::to_value(value).map_err(|e| {
            QueryError::unsupported_value(std::any::type_name::<T>(), e.to_string()).with_source(e)
        })?;
        Self::from_json(json)
    }
}

/// Conversion into a [`Value`].
///
/// Implemented for scalars, strings, UUIDs, timestamps, collections and
/// options here, and for annotated structs and enums by
/// `#[derive(GqlObject)]` and `#[derive(GqlEnum)]`.
pub trait ToValue {
    /// Convert to a value.
    fn to_value(&self) -> Value;
}

/// A struct whose fields carry [`FieldPath`] annotations.
///
/// Normally derived:
///
/// ```rust,ignore
/// #[derive(GqlObject)]
/// struct VvFilter {
///     #[gql(path = ".location")]
///     location: Option<String>,
///     #[gql(path = ".spu.serial")]
///     serial: Option<String>,
/// }
/// ```
pub trait GqlObject {
    /// Name of the type in the remote schema.
    const TYPE_NAME: &'static str;

    /// Annotated field paths, in declaration order.
    fn field_paths() -> &'static [FieldPath];

    /// Current field values, in the same order as [`field_paths`](Self::field_paths).
    fn field_values(&self) -> Vec<Value>;

    /// Response selection for every annotated field.
    fn selection() -> Vec<String> {
        Self::field_paths().iter().map(FieldPath::hierarchy_name).collect()
    }

    /// The object as a [`Value::Object`].
    fn to_object_value(&self) -> Value {
        Value::Object(
            Self::field_paths()
                .iter()
                .cloned()
                .zip(self.field_values())
                .map(|(path, value)| ObjectField::new(path, value))
                .collect(),
        )
    }
}

/// A fieldless enum whose member names match the remote schema.
pub trait GqlEnum {
    /// Name of the enum type in the remote schema.
    const TYPE_NAME: &'static str;

    /// All member names, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Name of this member.
    fn variant_name(&self) -> &'static str;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for ParameterSet {
    fn to_value(&self) -> Value {
        Value::Set(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for smol_str::SmolStr {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for Uuid {
    fn to_value(&self) -> Value {
        Value::Id(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl ToValue for DateTime<FixedOffset> {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.with_timezone(&Utc))
    }
}

/// Naive timestamps are taken to be UTC.
impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

macro_rules! impl_to_value_int {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::Number(Number::Int(i64::from(*self)))
                }
            }
        )*
    };
}

impl_to_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Number(Number::Int(*self as i64))
    }
}

impl ToValue for u64 {
    fn to_value(&self) -> Value {
        match i64::try_from(*self) {
            Ok(v) => Value::Number(Number::Int(v)),
            Err(_) => Value::Number(Number::UInt(*self)),
        }
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        (*self as u64).to_value()
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Float(*self))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        // Widening adds binary noise (0.1f32 -> 0.10000000149011612), so go
        // through the shortest decimal form instead.
        let widened = self.to_string().parse().unwrap_or(f64::from(*self));
        Value::Number(Number::Float(widened))
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        // Conversion from JSON only fails on duplicate keys, which a JSON
        // map cannot hold.
        Value::from_json(self.clone()).unwrap_or(Value::Null)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Int(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(Number::Int(i64::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<ParameterSet> for Value {
    fn from(v: ParameterSet) -> Self {
        Self::Set(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
