use crate::variant::{level_accessor, Declaration};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

pub fn loggable_impl(input: TokenStream) -> TokenStream {
    let Declaration { name, variants } = parse_macro_input!(input as Declaration);

    let definitions = variants.iter().map(|variant| {
        let docs = &variant.docs;
        let message = &variant.message;
        let variant_name = &variant.name;
        let fields = variant.field_definitions();
        if fields.is_empty() {
            quote! {
                #(#docs)*
                #[error(#message)]
                #variant_name
            }
        } else {
            quote! {
                #(#docs)*
                #[error(#message)]
                #variant_name { #(#fields,)* }
            }
        }
    });

    let level = level_accessor(variants.iter().map(|variant| {
        (
            variant.wildcard_pattern(!variant.fields.is_empty()),
            &variant.level,
        )
    }));

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum #name {
            #(#definitions,)*
        }

        impl #name {
            #level
        }
    }
    .into()
}
