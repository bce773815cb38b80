use crate::variant::{level_accessor, Declaration, Variant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse_macro_input;

/// Variants marked `#[no_source]` carry only their declared fields. Every other
/// variant also stores the rendered source error in `err`, and gets a
/// constructor named after the variant that accepts the source last.
pub fn traceable_impl(input: TokenStream) -> TokenStream {
    let Declaration { name, variants } = parse_macro_input!(input as Declaration);

    let definitions = variants.iter().map(definition);
    let constructors = variants.iter().filter_map(constructor);
    let level = level_accessor(variants.iter().map(|variant| {
        let carries_payload = !variant.has_flag("no_source") || !variant.fields.is_empty();
        (variant.wildcard_pattern(carries_payload), &variant.level)
    }));

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum #name {
            #(#definitions,)*
        }

        impl #name {
            #level

            #(#constructors)*
        }
    }
    .into()
}

fn definition(variant: &Variant) -> TokenStream2 {
    let docs = &variant.docs;
    let message = &variant.message;
    let name = &variant.name;
    let mut fields = variant.field_definitions();
    if !variant.has_flag("no_source") {
        fields.push(quote! { err: String });
    }

    if fields.is_empty() {
        quote! {
            #(#docs)*
            #[error(#message)]
            #name
        }
    } else {
        quote! {
            #(#docs)*
            #[error(#message)]
            #name { #(#fields,)* }
        }
    }
}

fn constructor(variant: &Variant) -> Option<TokenStream2> {
    let with_source = !variant.has_flag("no_source");
    if !with_source && variant.fields.is_empty() {
        return None;
    }

    let name = &variant.name;
    let params = variant
        .fields
        .iter()
        .map(|(field, ty)| quote! { #field: impl Into<#ty> });
    let assignments = variant
        .fields
        .iter()
        .map(|(field, _)| quote! { #field: #field.into() });

    Some(if with_source {
        quote! {
            #[allow(non_snake_case, dead_code)]
            pub fn #name(#(#params,)* source: impl std::fmt::Display) -> Self {
                Self::#name {
                    #(#assignments,)*
                    err: source.to_string(),
                }
            }
        }
    } else {
        quote! {
            #[allow(non_snake_case, dead_code)]
            pub fn #name(#(#params),*) -> Self {
                Self::#name {
                    #(#assignments,)*
                }
            }
        }
    })
}
