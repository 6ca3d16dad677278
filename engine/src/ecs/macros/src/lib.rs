mod component;
mod system;

use proc_macro::TokenStream;

#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}

/// Derive a `System` whose `update` is the default no-op. Useful for marker systems and tests.
#[proc_macro_derive(System)]
pub fn derive_system(item: TokenStream) -> TokenStream {
    system::derive_system(item)
}
