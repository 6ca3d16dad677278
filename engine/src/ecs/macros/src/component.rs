use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

pub fn derive_component(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the type name we are annotating, carrying any generics through to the impl.
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // `::rusty_ecs` resolves inside the crate because of `extern crate self as rusty_ecs;` in
    // lib.rs, and outside the crate through the normal dependency.
    TokenStream::from(quote! {
        impl #impl_generics ::rusty_ecs::ecs::Component for #name #ty_generics #where_clause {
        }
    })
}
