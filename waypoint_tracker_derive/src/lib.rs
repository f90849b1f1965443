//! Define procedural macro to build services from their config entries
extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod config;

/// Implement `FromServiceConfig` for a struct with named fields. Each field is read from the
/// service configuration parameter of the same name, starting from `Default::default()`. Fields
/// marked `#[service_config(skip)]` are never read from the config.
#[proc_macro_derive(FromServiceConfig, attributes(service_config))]
pub fn derive_from_service_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::expand_derive_from_service_config(&input)
        .unwrap_or_else(to_compile_errors)
        .into()
}

fn to_compile_errors(errors: Vec<syn::Error>) -> proc_macro2::TokenStream {
    let compile_errors = errors.iter().map(syn::Error::to_compile_error);
    quote!(#(#compile_errors)*)
}
