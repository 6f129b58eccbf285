//! Procedural macros for Quill.
//!
//! This crate provides compile-time field discovery for Quill request
//! types. Field paths are checked while the macro expands, so a malformed
//! path is a compile error rather than a runtime one.
//!
//! # Macros
//!
//! - [`GqlObject`] - Annotated struct fields become parameters and selections
//! - [`GqlEnum`] - Fieldless enums render as bare enum members
//! - [`GqlFilter`] - Filter structs that link into AND chains
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(quill::GqlObject, quill::GqlFilter)]
//! #[gql(name = "VVFilter")]
//! struct VvFilter {
//!     #[gql(path = ".location")]
//!     location: Option<String>,
//!     #[gql(path = ".spu.serial")]
//!     serial: Option<String>,
//!     #[gql(path = ".and", and)]
//!     and: Option<Box<VvFilter>>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generators;

/// Derive `GqlObject` and `ToValue` for a struct with named fields.
///
/// Only annotated fields take part; everything else is invisible to the
/// formatter and to selection sets.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[gql(name = "TypeName")]` - Type name in the remote schema (defaults to the Rust name)
/// - `#[gql(crate = "path")]` - Path to the runtime crate (defaults to `::quill`)
///
/// ## Field-level
/// - `#[gql(path = ".a.b")]` - Field path; must start with `.`
/// - `#[gql(field)]` - Use `.camelCaseFieldName` as the path
/// - `#[gql(mandatory)]` - Mark the path as mandatory (advisory)
///
/// # Example
///
/// ```rust,ignore
/// #[derive(quill::GqlObject)]
/// struct Vv {
///     #[gql(field)]
///     uuid: uuid::Uuid,
///
///     #[gql(path = ".spu.serial", mandatory)]
///     serial: String,
///
///     // not sent, not selected
///     cached_at: std::time::Instant,
/// }
/// ```
#[proc_macro_derive(GqlObject, attributes(gql))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generators::derive_object_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `GqlEnum` and `ToValue` for a fieldless enum.
///
/// Each variant renders as its own name, unquoted.
#[proc_macro_derive(GqlEnum, attributes(gql))]
pub fn derive_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generators::derive_enum_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `FilterNode` for a struct with an `#[gql(and)]` link field.
///
/// The link field must have type `Option<Box<Self>>`.
#[proc_macro_derive(GqlFilter, attributes(gql))]
pub fn derive_filter(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generators::derive_filter_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
