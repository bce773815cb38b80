mod log;
mod loggable;
mod traceable;
mod variant;

use proc_macro::TokenStream;

/// Emits a `loggable!`/`traceable!` value through `tracing` at the level the
/// variant declares. An optional second argument is attached as a debug field.
#[proc_macro]
pub fn log(input: TokenStream) -> TokenStream {
    log::log_impl(input)
}

#[proc_macro]
pub fn loggable(input: TokenStream) -> TokenStream {
    loggable::loggable_impl(input)
}

#[proc_macro]
pub fn traceable(input: TokenStream) -> TokenStream {
    traceable::traceable_impl(input)
}
