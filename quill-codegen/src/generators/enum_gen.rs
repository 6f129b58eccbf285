//! Implementation of the `#[derive(GqlEnum)]` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::parse_container_attrs;

/// Generate `GqlEnum` and `ToValue` for a fieldless enum.
///
/// Variants render under their Rust name, so a variant spelled the way the
/// remote schema spells it is passed through verbatim.
pub fn derive_enum_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "GqlEnum derive only supports enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "GqlEnum derive needs at least one variant",
        ));
    }

    let container = parse_container_attrs(input)?;
    let runtime = container.runtime();
    let type_name = container
        .type_name
        .clone()
        .unwrap_or_else(|| name.to_string());

    let mut names = Vec::with_capacity(data.variants.len());
    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "GqlEnum variants cannot carry data",
            ));
        }
        let ident = &variant.ident;
        let member = ident.unraw().to_string();
        arms.push(quote! { Self::#ident => #member });
        names.push(member);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #runtime::GqlEnum for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn variant_name(&self) -> &'static str {
                match self {
                    #(#arms),*
                }
            }
        }

        impl #impl_generics #runtime::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> #runtime::Value {
                #runtime::Value::enum_member(#runtime::GqlEnum::variant_name(self))
            }
        }
    })
}
