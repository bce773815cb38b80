use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Attribute, Expr, Ident, LitStr, Result, Token, Type};

/// `Name { <variant>* }` as accepted by both `loggable!` and `traceable!`.
pub struct Declaration {
    pub name: Ident,
    pub variants: Vec<Variant>,
}

/// `#[error("..")] Name { field: Type, .. } => level`
pub struct Variant {
    pub docs: Vec<Attribute>,
    pub flags: Vec<Attribute>,
    pub message: LitStr,
    pub name: Ident,
    pub fields: Vec<(Ident, Type)>,
    pub level: Expr,
}

impl Parse for Declaration {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<Ident>()?;

        let content;
        braced!(content in input);

        let mut variants = Vec::new();
        while !content.is_empty() {
            variants.push(content.parse::<Variant>()?);
            if content.peek(Token![,]) {
                content.parse::<Token![,]>()?;
            }
        }

        Ok(Declaration { name, variants })
    }
}

impl Parse for Variant {
    fn parse(input: ParseStream) -> Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;

        let mut docs = Vec::new();
        let mut flags = Vec::new();
        let mut message = None;
        for attribute in attributes {
            if attribute.path().is_ident("doc") {
                docs.push(attribute);
            } else if attribute.path().is_ident("error") {
                message = Some(attribute.parse_args::<LitStr>()?);
            } else {
                flags.push(attribute);
            }
        }
        let message =
            message.ok_or_else(|| input.error("expected #[error(\"...\")] on every variant"))?;

        let name = input.parse::<Ident>()?;

        let mut fields = Vec::new();
        if input.peek(syn::token::Brace) {
            let body;
            braced!(body in input);
            while !body.is_empty() {
                let field = body.parse::<Ident>()?;
                body.parse::<Token![:]>()?;
                let ty = body.parse::<Type>()?;
                fields.push((field, ty));
                if body.peek(Token![,]) {
                    body.parse::<Token![,]>()?;
                }
            }
        }

        input.parse::<Token![=>]>()?;
        let level = input.parse::<Expr>()?;

        Ok(Variant {
            docs,
            flags,
            message,
            name,
            fields,
            level,
        })
    }
}

impl Variant {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|attribute| attribute.path().is_ident(flag))
    }

    /// Pattern that matches this variant regardless of its payload.
    pub fn wildcard_pattern(&self, carries_payload: bool) -> TokenStream2 {
        let name = &self.name;
        if carries_payload {
            quote! { Self::#name { .. } }
        } else {
            quote! { Self::#name }
        }
    }

    pub fn field_definitions(&self) -> Vec<TokenStream2> {
        self.fields
            .iter()
            .map(|(field, ty)| quote! { #field: #ty })
            .collect()
    }
}

/// `level()` accessor shared by both generators.
pub fn level_accessor<'a>(arms: impl Iterator<Item = (TokenStream2, &'a Expr)>) -> TokenStream2 {
    let arms = arms.map(|(pattern, level)| quote! { #pattern => #level });
    quote! {
        #[allow(dead_code)]
        pub fn level(&self) -> tracing::Level {
            match self {
                #(#arms,)*
            }
        }
    }
}
