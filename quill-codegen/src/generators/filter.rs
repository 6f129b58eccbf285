//! Implementation of the `#[derive(GqlFilter)]` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, GenericArgument, PathArguments, Type};

use super::{named_fields, parse_container_attrs, parse_field_attrs};

/// Generate `FilterNode` for a struct with one `#[gql(and)]` link field.
///
/// The link field must be `Option<Box<Self>>`. Combine with
/// `#[derive(GqlObject)]` and a `path` on the same field to have the link
/// serialized as a nested argument.
pub fn derive_filter_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let fields = named_fields(input, "GqlFilter")?;

    let container = parse_container_attrs(input)?;
    let runtime = container.runtime();

    let mut link = None;
    for field in fields {
        if !parse_field_attrs(field)?.and {
            continue;
        }
        if link.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "only one field can be marked `#[gql(and)]`",
            ));
        }
        if !is_boxed_option(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "the `#[gql(and)]` field must be `Option<Box<Self>>`",
            ));
        }
        link = field.ident.clone();
    }

    let Some(link) = link else {
        return Err(syn::Error::new_spanned(
            input,
            "GqlFilter derive needs a field marked `#[gql(and)]`",
        ));
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #runtime::FilterNode for #name #ty_generics #where_clause {
            fn and(&self) -> ::std::option::Option<&Self> {
                self.#link.as_deref()
            }

            fn with_and(mut self, next: Self) -> Self {
                self.#link = ::std::option::Option::Some(::std::boxed::Box::new(next));
                self
            }
        }
    })
}

/// Check if a type is `Option<Box<T>>`.
fn is_boxed_option(ty: &Type) -> bool {
    let Some(inner) = first_generic_of(ty, "Option") else {
        return false;
    };
    first_generic_of(inner, "Box").is_some()
}

/// The first type argument of `Outer<T>`, matching on the last path segment.
fn first_generic_of<'a>(ty: &'a Type, outer: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != outer {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
