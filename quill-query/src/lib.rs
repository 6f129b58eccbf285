//! # quill-query
//!
//! Request construction and value serialization for the Quill GraphQL client.
//!
//! This crate turns typed request descriptions into request strings:
//! - Field paths that map struct fields to argument keys and nested selections
//! - A closed [`Value`] model with a formatter that renders query literals
//! - Ordered, uniquely named parameter sets
//! - Request assembly for queries, mutations and subscriptions
//! - AND-chaining of single-purpose filter objects
//!
//! Everything here is synchronous and pure; sending the request is left to
//! the caller's transport.
//!
//! ## Field Paths
//!
//! ```rust
//! use quill_query::FieldPath;
//!
//! let path = FieldPath::parse(".spu.serial").unwrap();
//! assert_eq!(path.base_path().unwrap(), "spu");
//! assert_eq!(path.hierarchy_name(), "spu{serial}");
//! ```
//!
//! ## Values
//!
//! ```rust
//! use quill_query::{Formatter, ToValue};
//!
//! let f = Formatter::new();
//! assert_eq!(f.format(&true.to_value(), 0).unwrap(), "true");
//! assert_eq!(f.format(&vec![1, 2, 3].to_value(), 0).unwrap(), "[1,2,3]");
//! assert_eq!(f.format(&"say \"x\"".to_value(), 0).unwrap(), r#""say \"x\"""#);
//! ```
//!
//! ## Requests
//!
//! ```rust
//! use quill_query::{ParameterSet, Request};
//!
//! let params = ParameterSet::new().with("first", 10).unwrap();
//! let request = Request::query("vvList")
//!     .parameters(params)
//!     .fields(["uuid", "location"])
//!     .build()
//!     .unwrap();
//! assert_eq!(request, "query{vvList(first:10){uuid,location}}");
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use quill_query::{ErrorCode, Request};
//!
//! let err = Request::query("").build().unwrap_err();
//! assert_eq!(err.code, ErrorCode::MissingOperationName);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod params;
pub mod path;
pub mod payload;
pub mod request;
pub mod value;

pub use config::{FormatterConfig, LoggingConfig, QuillConfig};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult, Suggestion};
pub use filter::{Chain, FilterNode, combine, combine_cloned};
pub use format::{DepthPolicy, EscapePolicy, Formatter, MAX_DEPTH, format_timestamp, format_value};
pub use params::ParameterSet;
pub use path::FieldPath;
pub use payload::GraphQlPayload;
pub use request::{OperationKind, Request, assemble, assemble_with};
pub use value::{GqlEnum, GqlObject, Number, ObjectField, ToValue, Value};
