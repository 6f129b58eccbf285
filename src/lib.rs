//! # Quill
//!
//! Typed GraphQL request construction with compile-time field discovery.
//!
//! Quill provides:
//! - Derive macros that turn annotated structs into arguments and selections
//! - A formatter that renders values as query literals
//! - Ordered parameter sets and request assembly for queries, mutations and subscriptions
//! - AND-chaining of filter objects
//!
//! ## Quick Start
//!
//! ```rust
//! use quill::prelude::*;
//!
//! #[derive(GqlObject, GqlFilter, Default)]
//! #[gql(name = "VVFilter")]
//! struct VvFilter {
//!     #[gql(path = ".location")]
//!     location: Option<String>,
//!     #[gql(path = ".and", and)]
//!     and: Option<Box<VvFilter>>,
//! }
//!
//! #[derive(GqlObject)]
//! struct Vv {
//!     #[gql(field)]
//!     uuid: String,
//!     #[gql(path = ".spu.serial")]
//!     serial: String,
//! }
//!
//! # fn main() -> quill::QueryResult<()> {
//! let filter = VvFilter { location: Some("Berlin".into()), ..Default::default() };
//! let request = Request::query("vvList")
//!     .param("filter", filter)?
//!     .select::<Vv>()
//!     .build()?;
//!
//! assert_eq!(request, r#"query{vvList(filter:{location:"Berlin"}){uuid,spu{serial}}}"#);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Request construction, values and formatting.
pub mod query {
    pub use quill_query::*;
}

/// Configuration loaded from `quill.toml`.
pub mod config {
    pub use quill_query::config::*;
}

/// Logging setup.
pub mod logging {
    pub use quill_query::logging::*;
}

// Re-export derive macros
pub use quill_codegen::{GqlEnum, GqlFilter, GqlObject};

// Re-export key types at the crate root
pub use quill_query::{
    DepthPolicy, ErrorCode, EscapePolicy, FieldPath, FilterNode, Formatter, GqlEnum, GqlObject,
    GraphQlPayload, MAX_DEPTH, Number, ObjectField, OperationKind, ParameterSet, QueryError, QueryResult,
    QuillConfig, Request, ToValue, Value, assemble, assemble_with, combine, combine_cloned,
    format_value,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        FieldPath, FilterNode, Formatter, GqlEnum, GqlFilter, GqlObject, OperationKind,
        ParameterSet, QueryError, QueryResult, Request, ToValue, Value, combine,
    };
}
