//! Implementation of the `#[derive(GqlObject)]` macro.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{DeriveInput, Ident, LitStr};

use super::{named_fields, parse_container_attrs, parse_field_attrs};

/// Parse and generate code for the `#[derive(GqlObject)]` macro.
pub fn derive_object_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let fields = named_fields(input, "GqlObject")?;

    let container = parse_container_attrs(input)?;
    let runtime = container.runtime();
    let type_name = container
        .type_name
        .clone()
        .unwrap_or_else(|| name.to_string());

    let mut annotated = Vec::new();
    for field in fields {
        if let Some(info) = parse_field(field)? {
            annotated.push(info);
        }
    }

    let paths: Vec<_> = annotated
        .iter()
        .map(|f| {
            let path = LitStr::new(&f.path, f.span);
            let mandatory = f.mandatory;
            quote! { #runtime::FieldPath::new_static(#path, #mandatory) }
        })
        .collect();

    let values: Vec<_> = annotated
        .iter()
        .map(|f| {
            let ident = &f.name;
            quote! { #runtime::ToValue::to_value(&self.#ident) }
        })
        .collect();

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#runtime::ToValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #runtime::GqlObject for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            fn field_paths() -> &'static [#runtime::FieldPath] {
                const FIELD_PATHS: &[#runtime::FieldPath] = &[#(#paths),*];
                FIELD_PATHS
            }

            fn field_values(&self) -> ::std::vec::Vec<#runtime::Value> {
                ::std::vec![#(#values),*]
            }
        }

        impl #impl_generics #runtime::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> #runtime::Value {
                #runtime::GqlObject::to_object_value(self)
            }
        }
    })
}

/// An annotated field.
#[derive(Debug)]
struct FieldInfo {
    name: Ident,
    path: String,
    span: Span,
    mandatory: bool,
}

/// Parse a field; `None` for fields without a path annotation.
fn parse_field(field: &syn::Field) -> Result<Option<FieldInfo>, syn::Error> {
    let name = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;

    let attrs = parse_field_attrs(field)?;
    let Some((path, span)) = attrs.resolve_path(field)? else {
        return Ok(None);
    };

    quill_query::path::validate(&path)
        .map_err(|e| syn::Error::new(span, format!("invalid field path: {}", e.message)))?;

    Ok(Some(FieldInfo {
        name,
        path,
        span,
        mandatory: attrs.mandatory,
    }))
}
