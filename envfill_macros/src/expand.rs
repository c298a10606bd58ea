//! Expansion of the `EnvFill` derive into a field table.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Ident};

use crate::field_type::{self, TypeShape};
use crate::parse;

/// Builds the `EnvFill` implementation for `input`.
pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "EnvFill can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "EnvFill requires named fields",
        ));
    };
    let entries = fields
        .named
        .iter()
        .map(field_entry)
        .collect::<syn::Result<Vec<_>>>()?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::envfill::EnvFill for #ident #ty_generics #where_clause {
            const FIELDS: &'static [::envfill::FieldSpec<Self>] = &[#(#entries),*];
        }
    })
}

fn field_entry(field: &Field) -> syn::Result<TokenStream> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "EnvFill requires named fields"));
    };
    let attrs = parse::field_attrs(field)?;
    let name = ident.unraw().to_string();
    let shape = field_type::classify(&field.ty, true);
    // A chained `with_default` call blocks expected-type propagation into
    // the constructor, so closures that touch `target` then need its type
    // spelled out for inference.
    let annotated = attrs.default.is_some();
    let mut entry = if matches!(shape, TypeShape::Nested) {
        nested_entry(ident, &name, annotated)
    } else {
        scalar_entry(ident, &name, &shape, annotated)
    };
    if let Some(text) = attrs.default {
        entry = quote! { #entry.with_default(#text) };
    }
    Ok(entry)
}

fn target_param(annotated: bool) -> TokenStream {
    if annotated {
        quote!(target: &mut Self)
    } else {
        quote!(target)
    }
}

fn nested_entry(ident: &Ident, name: &str, annotated: bool) -> TokenStream {
    let target = target_param(annotated);
    quote! {
        ::envfill::FieldSpec::nested(#name, |#target, nested_prefix, delimiters| {
            ::envfill::populate(&mut target.#ident, nested_prefix, delimiters)
        })
    }
}

fn scalar_entry(ident: &Ident, name: &str, shape: &TypeShape, annotated: bool) -> TokenStream {
    let descriptor = field_type::descriptor_tokens(shape);
    if !shape.convertible() {
        // Conversion rejects the descriptor before any setter could run.
        return quote! {
            ::envfill::FieldSpec::scalar(#name, #descriptor, |_target, _value| {
                ::core::result::Result::Ok(())
            })
        };
    }
    let extract = extract_expr(shape, &quote!(value));
    let target = target_param(annotated);
    quote! {
        ::envfill::FieldSpec::scalar(#name, #descriptor, |#target, value| {
            target.#ident = #extract;
            ::core::result::Result::Ok(())
        })
    }
}

fn extract_expr(shape: &TypeShape, source: &TokenStream) -> TokenStream {
    match shape {
        TypeShape::Text => quote!(#source.into_string()?),
        TypeShape::Bool => quote!(#source.into_bool()?),
        TypeShape::Int { extractor, .. } | TypeShape::Float { extractor, .. } => {
            let method = format_ident!("{extractor}");
            quote!(#source.#method()?)
        }
        TypeShape::Bytes => quote!(#source.into_bytes()?),
        TypeShape::Optional(inner) => {
            let inner_expr = extract_expr(inner, source);
            quote!(::core::option::Option::Some(#inner_expr))
        }
        TypeShape::Sequence(element) => {
            let element_expr = extract_expr(element, &quote!(element));
            quote! {
                #source
                    .into_seq()?
                    .into_iter()
                    .map(|element| ::core::result::Result::Ok(#element_expr))
                    .collect::<::core::result::Result<_, ::envfill::EnvFillError>>()?
            }
        }
        TypeShape::Mapping(key, value) => {
            let key_expr = extract_expr(key, &quote!(key));
            let value_expr = extract_expr(value, &quote!(value));
            quote! {
                #source
                    .into_map()?
                    .into_iter()
                    .map(|(key, value)| ::core::result::Result::Ok((#key_expr, #value_expr)))
                    .collect::<::core::result::Result<_, ::envfill::EnvFillError>>()?
            }
        }
        TypeShape::Unsupported(_) | TypeShape::Nested => {
            quote!(::core::compile_error!("envfill: field type cannot be extracted"))
        }
    }
}
