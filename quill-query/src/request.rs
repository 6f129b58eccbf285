//! Request assembly.
//!
//! A request is one operation of one kind:
//!
//! ```text
//! kind{name}
//! kind{name{fields}}
//! kind{name(params)}
//! kind{name(params){fields}}
//! ```
//!
//! ```rust
//! use quill_query::{OperationKind, ParameterSet, Request, assemble};
//!
//! assert_eq!(
//!     assemble::<&str>(OperationKind::Query, "userCount", None, None).unwrap(),
//!     "query{userCount}"
//! );
//!
//! let request = Request::query("loginState").field("org").build().unwrap();
//! assert_eq!(request, "query{loginState{org}}");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{QueryError, QueryResult};
use crate::format::Formatter;
use crate::params::ParameterSet;
use crate::payload::GraphQlPayload;
use crate::quill_debug;
use crate::value::{GqlObject, ToValue};

/// The three request categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Read.
    Query,
    /// Write.
    Mutation,
    /// Subscribe.
    Subscription,
}

impl OperationKind {
    /// The keyword that opens a request of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for OperationKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            _ => Err(QueryError::unknown_operation_kind(s)),
        }
    }
}

/// Assemble a request string with the default formatter.
pub fn assemble<S: AsRef<str>>(
    kind: OperationKind,
    name: &str,
    parameters: Option<&ParameterSet>,
    fields: Option<&[S]>,
) -> QueryResult<String> {
    assemble_with(&Formatter::new(), kind, name, parameters, fields)
}

/// Assemble a request string with a specific formatter.
pub fn assemble_with<S: AsRef<str>>(
    formatter: &Formatter,
    kind: OperationKind,
    name: &str,
    parameters: Option<&ParameterSet>,
    fields: Option<&[S]>,
) -> QueryResult<String> {
    if name.is_empty() {
        return Err(QueryError::missing_operation_name().with_operation(kind.keyword()));
    }

    let params = match parameters {
        Some(set) => set
            .serialize_with(formatter)
            .map_err(|e| e.with_operation(name))?,
        None => String::new(),
    };
    let fields = fields
        .map(|fields| {
            fields
                .iter()
                .map(|field| field.as_ref())
                .collect::<Vec<&str>>()
                .join(",")
        })
        .unwrap_or_default();

    let keyword = kind.keyword();
    let request = match (params.is_empty(), fields.is_empty()) {
        (true, true) => format!("{}{{{}}}", keyword, name),
        (true, false) => format!("{}{{{}{{{}}}}}", keyword, name, fields),
        (false, true) => format!("{}{{{}({})}}", keyword, name, params),
        (false, false) => format!("{}{{{}({}){{{}}}}}", keyword, name, params, fields),
    };

    quill_debug!(kind = keyword, operation = name, request = %request, "Assembled request");
    Ok(request)
}

/// Builder for one request operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    kind: OperationKind,
    name: SmolStr,
    parameters: Option<ParameterSet>,
    fields: Vec<String>,
    formatter: Formatter,
}

impl Request {
    /// Start a request of `kind` calling `name`.
    pub fn new(kind: OperationKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            parameters: None,
            fields: Vec::new(),
            formatter: Formatter::new(),
        }
    }

    /// Start a query.
    pub fn query(name: impl Into<SmolStr>) -> Self {
        Self::new(OperationKind::Query, name)
    }

    /// Start a mutation.
    pub fn mutation(name: impl Into<SmolStr>) -> Self {
        Self::new(OperationKind::Mutation, name)
    }

    /// Start a subscription.
    pub fn subscription(name: impl Into<SmolStr>) -> Self {
        Self::new(OperationKind::Subscription, name)
    }

    /// Replace the argument set.
    pub fn parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Add one required argument.
    pub fn param(mut self, name: impl Into<SmolStr>, value: impl ToValue) -> QueryResult<Self> {
        self.parameters
            .get_or_insert_with(ParameterSet::new)
            .insert(name, value)?;
        Ok(self)
    }

    /// Add one argument that is skipped when absent.
    pub fn optional_param(mut self, name: impl Into<SmolStr>, value: impl ToValue) -> QueryResult<Self> {
        self.parameters
            .get_or_insert_with(ParameterSet::new)
            .insert_optional(name, value)?;
        Ok(self)
    }

    /// Request one response field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Request several response fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Request every annotated field of `T`.
    pub fn select<T: GqlObject>(self) -> Self {
        self.fields(T::selection())
    }

    /// Use a specific formatter.
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested response fields.
    pub fn requested_fields(&self) -> &[String] {
        &self.fields
    }

    /// Argument set, if any.
    pub fn parameter_set(&self) -> Option<&ParameterSet> {
        self.parameters.as_ref()
    }

    /// Render the request string.
    pub fn build(&self) -> QueryResult<String> {
        assemble_with(
            &self.formatter,
            self.kind,
            &self.name,
            self.parameters.as_ref(),
            Some(self.fields.as_slice()),
        )
    }

    /// Render and wrap in a transport payload.
    pub fn payload(&self) -> QueryResult<GraphQlPayload> {
        Ok(GraphQlPayload::new(self.build()?))
    }
}
