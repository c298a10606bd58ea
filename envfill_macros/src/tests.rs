//! Unit tests for derive expansion and type classification.

use anyhow::{Context, Result, anyhow, bail, ensure};
use quote::quote;
use rstest::rstest;
use syn::{Data, DeriveInput, Type, parse_quote};

use crate::field_type::{TypeShape, classify};
use crate::{expand, parse};

fn expand_input(input: &DeriveInput) -> Result<String> {
    let tokens = expand::derive(input).map_err(|err| anyhow!("derive failed: {err}"))?;
    Ok(tokens.to_string())
}

fn first_field(input: &DeriveInput) -> Result<&syn::Field> {
    let Data::Struct(data) = &input.data else {
        bail!("expected a struct input");
    };
    data.fields.iter().next().context("struct has no fields")
}

#[rstest]
fn expands_scalar_field_with_default() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            #[envfill(default = "8080")]
            api_port: i64,
        }
    };
    let actual = expand_input(&input)?;
    let expected = quote! {
        #[automatically_derived]
        impl ::envfill::EnvFill for Server {
            const FIELDS: &'static [::envfill::FieldSpec<Self>] = &[
                ::envfill::FieldSpec::scalar(
                    "api_port",
                    ::envfill::TypeSpec::Int(::envfill::IntWidth::I64),
                    |target, value| {
                        target.api_port = value.into_i64()?;
                        ::core::result::Result::Ok(())
                    }
                )
                .with_default("8080")
            ];
        }
    };
    ensure!(
        actual == expected.to_string(),
        "generated tokens differ: {actual} != {expected}"
    );
    Ok(())
}

#[rstest]
fn expands_nested_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Outer {
            inner: Inner,
        }
    };
    let actual = expand_input(&input)?;
    let expected = quote! {
        #[automatically_derived]
        impl ::envfill::EnvFill for Outer {
            const FIELDS: &'static [::envfill::FieldSpec<Self>] = &[
                ::envfill::FieldSpec::nested("inner", |target, nested_prefix, delimiters| {
                    ::envfill::populate(&mut target.inner, nested_prefix, delimiters)
                })
            ];
        }
    };
    ensure!(
        actual == expected.to_string(),
        "generated tokens differ: {actual} != {expected}"
    );
    Ok(())
}

#[rstest]
fn classifies_scalars() -> Result<()> {
    let text: Type = parse_quote!(String);
    ensure!(matches!(classify(&text, true), TypeShape::Text));
    let flag: Type = parse_quote!(bool);
    ensure!(matches!(classify(&flag, true), TypeShape::Bool));
    let narrow: Type = parse_quote!(i16);
    ensure!(matches!(
        classify(&narrow, true),
        TypeShape::Int {
            width: "I16",
            extractor: "into_i16",
        }
    ));
    let single: Type = parse_quote!(f32);
    ensure!(matches!(
        classify(&single, true),
        TypeShape::Float {
            width: "F32",
            extractor: "into_f32",
        }
    ));
    Ok(())
}

#[rstest]
fn classifies_vec_u8_as_bytes() -> Result<()> {
    let bytes: Type = parse_quote!(Vec<u8>);
    ensure!(matches!(classify(&bytes, true), TypeShape::Bytes));
    Ok(())
}

#[rstest]
fn classifies_collections_recursively() -> Result<()> {
    let seq: Type = parse_quote!(Vec<String>);
    ensure!(matches!(
        classify(&seq, true),
        TypeShape::Sequence(element) if matches!(*element, TypeShape::Text)
    ));
    let map: Type = parse_quote!(HashMap<String, i64>);
    ensure!(matches!(
        classify(&map, true),
        TypeShape::Mapping(key, value)
            if matches!(*key, TypeShape::Text) && matches!(*value, TypeShape::Int { .. })
    ));
    let optional: Type = parse_quote!(Option<i32>);
    ensure!(matches!(
        classify(&optional, true),
        TypeShape::Optional(inner) if matches!(*inner, TypeShape::Int { .. })
    ));
    Ok(())
}

#[rstest]
fn unknown_paths_nest_only_at_top_level() -> Result<()> {
    let nested: Type = parse_quote!(WorkerConfig);
    ensure!(matches!(classify(&nested, true), TypeShape::Nested));
    let seq_of_structs: Type = parse_quote!(Vec<WorkerConfig>);
    ensure!(matches!(
        classify(&seq_of_structs, true),
        TypeShape::Sequence(element) if matches!(&*element, TypeShape::Unsupported(name) if name == "WorkerConfig")
    ));
    let optional_struct: Type = parse_quote!(Option<WorkerConfig>);
    ensure!(matches!(
        classify(&optional_struct, true),
        TypeShape::Optional(inner) if matches!(&*inner, TypeShape::Unsupported(_))
    ));
    Ok(())
}

#[rstest]
#[case::unsigned(parse_quote!(u32))]
#[case::wide(parse_quote!(i128))]
#[case::character(parse_quote!(char))]
#[case::reference(parse_quote!(&'static str))]
#[case::tuple(parse_quote!((i32, i32)))]
fn out_of_set_types_are_unsupported(#[case] ty: Type) -> Result<()> {
    ensure!(matches!(classify(&ty, true), TypeShape::Unsupported(_)));
    Ok(())
}

#[rstest]
fn unsupported_fields_get_placeholder_setters() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Flags {
            #[envfill(default = "1")]
            mask: u32,
        }
    };
    let actual = expand_input(&input)?;
    let descriptor = quote!(::envfill::TypeSpec::Unsupported("u32")).to_string();
    ensure!(
        actual.contains(&descriptor),
        "expected unsupported descriptor in {actual}"
    );
    let placeholder = quote!(|_target, _value| { ::core::result::Result::Ok(()) }).to_string();
    ensure!(
        actual.contains(&placeholder),
        "expected placeholder setter in {actual}"
    );
    Ok(())
}

#[rstest]
fn rejects_enum_inputs() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        enum Kind {
            A,
        }
    };
    let Err(err) = expand::derive(&input) else {
        bail!("expected enum input to be rejected");
    };
    ensure!(err.to_string().contains("structs"), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn rejects_tuple_structs() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Pair(i64, i64);
    };
    let Err(err) = expand::derive(&input) else {
        bail!("expected tuple struct to be rejected");
    };
    ensure!(
        err.to_string().contains("named fields"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn rejects_unknown_attribute_keys() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            #[envfill(rename = "PORT")]
            api_port: i64,
        }
    };
    let Err(err) = expand::derive(&input) else {
        bail!("expected unknown attribute key to be rejected");
    };
    ensure!(
        err.to_string().contains("unsupported envfill attribute"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn rejects_non_string_defaults() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            #[envfill(default = 8080)]
            api_port: i64,
        }
    };
    let Err(err) = expand::derive(&input) else {
        bail!("expected non-string default to be rejected");
    };
    ensure!(
        err.to_string().contains("string"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn repeated_defaults_keep_the_last_value() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            #[envfill(default = "first", default = "second")]
            name: String,
        }
    };
    let field = first_field(&input)?;
    let attrs = parse::field_attrs(field).map_err(|err| anyhow!("attribute parse failed: {err}"))?;
    ensure!(
        attrs.default.as_deref() == Some("second"),
        "expected the last default to win, got {:?}",
        attrs.default
    );
    Ok(())
}

#[rstest]
fn empty_defaults_count_as_declared() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            #[envfill(default = "")]
            motd: String,
        }
    };
    let actual = expand_input(&input)?;
    let declared = quote!(.with_default("")).to_string();
    ensure!(
        actual.contains(&declared),
        "expected empty default to be declared in {actual}"
    );
    Ok(())
}
