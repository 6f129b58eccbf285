//! Code generators for the Quill derive macros.

mod enum_gen;
mod filter;
mod object;

pub use enum_gen::derive_enum_impl;
pub use filter::derive_filter_impl;
pub use object::derive_object_impl;

use convert_case::{Case, Casing};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Field, Fields, LitStr, Token};

/// Struct- or enum-level attributes parsed from `#[gql(...)]`.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Name of the type in the remote schema.
    pub type_name: Option<String>,
    /// Path of the runtime crate in generated code.
    pub crate_path: Option<syn::Path>,
}

impl ContainerAttrs {
    /// Runtime crate path, `::quill` unless overridden.
    pub fn runtime(&self) -> TokenStream {
        match &self.crate_path {
            Some(path) => quote! { #path },
            None => quote! { ::quill },
        }
    }
}

/// Parse container-level `#[gql(...)]` attributes.
pub fn parse_container_attrs(input: &DeriveInput) -> Result<ContainerAttrs, syn::Error> {
    let mut attrs = ContainerAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("gql") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.type_name = Some(value.value());
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.crate_path = Some(value.parse()?);
            } else {
                return Err(meta.error("unknown container attribute; expected `name` or `crate`"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// Field-level attributes parsed from `#[gql(...)]`.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Explicit field path and the span of its literal.
    pub path: Option<(String, Span)>,
    /// Derive the path from the field name (`.camelCaseName`).
    pub auto: bool,
    /// Advisory mandatory flag.
    pub mandatory: bool,
    /// The field links to the next filter in an AND chain.
    pub and: bool,
}

impl FieldAttrs {
    /// Resolve the field path, if the field is annotated at all.
    pub fn resolve_path(&self, field: &Field) -> Result<Option<(String, Span)>, syn::Error> {
        match (&self.path, self.auto) {
            (Some(_), true) => Err(syn::Error::new_spanned(
                field,
                "use either `path = \"...\"` or `field`, not both",
            )),
            (Some(path), false) => Ok(Some(path.clone())),
            (None, true) => {
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;
                let name = syn::ext::IdentExt::unraw(ident).to_string();
                Ok(Some((format!(".{}", name.to_case(Case::Camel)), ident.span())))
            }
            (None, false) => {
                if self.mandatory {
                    return Err(syn::Error::new_spanned(
                        field,
                        "`mandatory` needs a `path` or `field` annotation",
                    ));
                }
                Ok(None)
            }
        }
    }
}

/// Parse field-level `#[gql(...)]` attributes.
pub fn parse_field_attrs(field: &Field) -> Result<FieldAttrs, syn::Error> {
    let mut attrs = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("gql") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.path = Some((value.value(), value.span()));
            } else if meta.path.is_ident("field") {
                attrs.auto = true;
            } else if meta.path.is_ident("mandatory") {
                attrs.mandatory = true;
            } else if meta.path.is_ident("and") {
                attrs.and = true;
            } else {
                return Err(meta.error(
                    "unknown field attribute; expected `path`, `field`, `mandatory` or `and`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// The named fields of a struct, or an error naming the derive.
pub fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a Punctuated<Field, Token![,]>, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{} derive only supports structs with named fields", derive),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{} derive only supports structs", derive),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn test_default_runtime_path() {
        let input: DeriveInput = parse_quote! {
            struct Plain { a: i32 }
        };
        let attrs = parse_container_attrs(&input).unwrap();
        assert_eq!(attrs.runtime().to_string().replace(' ', ""), "::quill");
    }

    #[test]
    fn test_custom_runtime_path() {
        let input: DeriveInput = parse_quote! {
            #[gql(name = "VVFilter", crate = "quill_query")]
            struct Plain { a: i32 }
        };
        let attrs = parse_container_attrs(&input).unwrap();
        assert_eq!(attrs.type_name.as_deref(), Some("VVFilter"));
        assert_eq!(attrs.runtime().to_string(), "quill_query");
    }

    #[test]
    fn test_auto_path_is_camel_case() {
        let field: Field = parse_quote! {
            #[gql(field)]
            serial_number: Option<String>
        };
        let attrs = parse_field_attrs(&field).unwrap();
        let (path, _) = attrs.resolve_path(&field).unwrap().unwrap();
        assert_eq!(path, ".serialNumber");
    }

    #[test]
    fn test_path_and_field_conflict() {
        let field: Field = parse_quote! {
            #[gql(path = ".x", field)]
            x: i32
        };
        let attrs = parse_field_attrs(&field).unwrap();
        assert!(attrs.resolve_path(&field).is_err());
    }

    #[test]
    fn test_unknown_field_attribute() {
        let field: Field = parse_quote! {
            #[gql(column = "x")]
            x: i32
        };
        assert!(parse_field_attrs(&field).is_err());
    }

    #[test]
    fn test_unannotated_field() {
        let field: Field = parse_quote! { x: i32 };
        let attrs = parse_field_attrs(&field).unwrap();
        assert!(attrs.resolve_path(&field).unwrap().is_none());
    }
}
