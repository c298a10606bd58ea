//! Procedural macros for `envfill`.
//!
//! `#[derive(EnvFill)]` turns a named-field struct into an `EnvFill`
//! implementation by building its field table at compile time. Field types
//! are classified into the closed descriptor set; known out-of-set types
//! become `Unsupported` descriptors that only fail when actually populated,
//! while unrecognised path types are treated as nested structures and must
//! implement `EnvFill` themselves.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod field_type;
mod parse;
#[cfg(test)]
mod tests;

/// Derive macro for the `envfill::EnvFill` trait.
///
/// Each field may carry `#[envfill(default = "...")]` to declare the text
/// used when its environment variable is absent or empty. Fields without
/// the attribute are never assigned. Nested structures are recursed into
/// whether or not they carry a default.
#[proc_macro_derive(EnvFill, attributes(envfill))]
pub fn derive_env_fill(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as DeriveInput);
    expand::derive(&parsed)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
