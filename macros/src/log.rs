use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Expr, Token};

struct LogInput {
    entry: Expr,
    debug_info: Option<Expr>,
}

impl Parse for LogInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let entry = input.parse::<Expr>()?;
        let debug_info = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            Some(input.parse::<Expr>()?)
        } else {
            None
        };
        Ok(LogInput { entry, debug_info })
    }
}

pub fn log_impl(input: TokenStream) -> TokenStream {
    let LogInput { entry, debug_info } = parse_macro_input!(input as LogInput);

    let (binding, arguments) = match debug_info {
        Some(debug_info) => (
            quote! { let debug_info = #debug_info; },
            quote! { message = %message, debug = ?debug_info },
        ),
        None => (quote! {}, quote! { "{}", message }),
    };
    let dispatch = dispatch_by_level(&arguments);

    quote! {
        {
            let entry = &#entry;
            let level = entry.level();
            let message = entry.to_string();
            #binding
            #dispatch
        }
    }
    .into()
}

// tracing needs the level as a constant at each call site.
fn dispatch_by_level(arguments: &TokenStream2) -> TokenStream2 {
    let arms = [
        (quote! { ERROR }, quote! { error }),
        (quote! { WARN }, quote! { warn }),
        (quote! { INFO }, quote! { info }),
        (quote! { DEBUG }, quote! { debug }),
        (quote! { TRACE }, quote! { trace }),
    ]
    .into_iter()
    .map(|(level, emit)| quote! { tracing::Level::#level => tracing::#emit!(#arguments) });

    quote! {
        match level {
            #(#arms,)*
        }
    }
}
