//! Classification of field types into runtime descriptors.

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Shape of a field's type after classification.
///
/// Mirrors the runtime descriptor set, carrying what expansion needs to
/// render both the descriptor and the matching extractor expression.
/// Classification is shallow: it matches the last path segment by name, so
/// aliased or fully qualified spellings of the supported types are accepted.
#[derive(Debug)]
pub(crate) enum TypeShape {
    /// `String`.
    Text,
    /// `bool`.
    Bool,
    /// A signed integer, carrying descriptor variant and extractor names.
    Int {
        width: &'static str,
        extractor: &'static str,
    },
    /// A floating-point number, carrying descriptor variant and extractor
    /// names.
    Float {
        width: &'static str,
        extractor: &'static str,
    },
    /// `Vec<u8>`, assigned the raw variable text.
    Bytes,
    /// `Option<T>` over a supported type.
    Optional(Box<TypeShape>),
    /// `Vec<T>` with a non-byte element.
    Sequence(Box<TypeShape>),
    /// `HashMap<K, V>` or `BTreeMap<K, V>`.
    Mapping(Box<TypeShape>, Box<TypeShape>),
    /// A type the converter has no descriptor for, with its rendering.
    Unsupported(String),
    /// An unrecognised path type at the top level: a nested structure.
    Nested,
}

impl TypeShape {
    /// Whether every leaf of the shape can be extracted into the field.
    pub(crate) fn convertible(&self) -> bool {
        match self {
            Self::Text | Self::Bool | Self::Int { .. } | Self::Float { .. } | Self::Bytes => true,
            Self::Optional(inner) | Self::Sequence(inner) => inner.convertible(),
            Self::Mapping(key, value) => key.convertible() && value.convertible(),
            Self::Unsupported(_) | Self::Nested => false,
        }
    }
}

/// Classifies `ty`, treating unrecognised path types as nested structures
/// at the top level of a field and as unsupported anywhere deeper.
pub(crate) fn classify(ty: &Type, top_level: bool) -> TypeShape {
    let Type::Path(type_path) = ty else {
        return TypeShape::Unsupported(render(ty));
    };
    if type_path.qself.is_some() {
        return TypeShape::Unsupported(render(ty));
    }
    let Some(segment) = type_path.path.segments.last() else {
        return TypeShape::Unsupported(render(ty));
    };
    match segment.ident.to_string().as_str() {
        "String" => TypeShape::Text,
        "bool" => TypeShape::Bool,
        "i8" => TypeShape::Int {
            width: "I8",
            extractor: "into_i8",
        },
        "i16" => TypeShape::Int {
            width: "I16",
            extractor: "into_i16",
        },
        "i32" => TypeShape::Int {
            width: "I32",
            extractor: "into_i32",
        },
        "i64" => TypeShape::Int {
            width: "I64",
            extractor: "into_i64",
        },
        "isize" => TypeShape::Int {
            width: "Isize",
            extractor: "into_isize",
        },
        "f32" => TypeShape::Float {
            width: "F32",
            extractor: "into_f32",
        },
        "f64" => TypeShape::Float {
            width: "F64",
            extractor: "into_f64",
        },
        "Option" => one_arg(segment).map_or_else(
            || TypeShape::Unsupported(render(ty)),
            |inner| TypeShape::Optional(Box::new(classify(inner, false))),
        ),
        "Vec" => one_arg(segment).map_or_else(
            || TypeShape::Unsupported(render(ty)),
            |element| {
                if is_u8(element) {
                    TypeShape::Bytes
                } else {
                    TypeShape::Sequence(Box::new(classify(element, false)))
                }
            },
        ),
        "HashMap" | "BTreeMap" => two_args(segment).map_or_else(
            || TypeShape::Unsupported(render(ty)),
            |(key, value)| {
                TypeShape::Mapping(
                    Box::new(classify(key, false)),
                    Box::new(classify(value, false)),
                )
            },
        ),
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i128" | "char" => {
            TypeShape::Unsupported(render(ty))
        }
        _ if top_level => TypeShape::Nested,
        _ => TypeShape::Unsupported(render(ty)),
    }
}

/// Renders the shape's `TypeSpec` expression.
pub(crate) fn descriptor_tokens(shape: &TypeShape) -> TokenStream {
    match shape {
        TypeShape::Text => quote!(::envfill::TypeSpec::String),
        TypeShape::Bool => quote!(::envfill::TypeSpec::Bool),
        TypeShape::Int { width, .. } => {
            let variant = format_ident!("{width}");
            quote!(::envfill::TypeSpec::Int(::envfill::IntWidth::#variant))
        }
        TypeShape::Float { width, .. } => {
            let variant = format_ident!("{width}");
            quote!(::envfill::TypeSpec::Float(::envfill::FloatWidth::#variant))
        }
        TypeShape::Bytes => quote!(::envfill::TypeSpec::Bytes),
        TypeShape::Optional(inner) => {
            let inner_tokens = descriptor_tokens(inner);
            quote!(::envfill::TypeSpec::Option(&#inner_tokens))
        }
        TypeShape::Sequence(element) => {
            let element_tokens = descriptor_tokens(element);
            quote!(::envfill::TypeSpec::Seq(&#element_tokens))
        }
        TypeShape::Mapping(key, value) => {
            let key_tokens = descriptor_tokens(key);
            let value_tokens = descriptor_tokens(value);
            quote!(::envfill::TypeSpec::Map(&#key_tokens, &#value_tokens))
        }
        TypeShape::Unsupported(name) => quote!(::envfill::TypeSpec::Unsupported(#name)),
        TypeShape::Nested => quote!(::envfill::TypeSpec::Struct),
    }
}

fn render(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("u8"))
}

fn one_arg(segment: &PathSegment) -> Option<&Type> {
    let mut types = angle_types(segment)?;
    let first = types.next()?;
    types.next().is_none().then_some(first)
}

fn two_args(segment: &PathSegment) -> Option<(&Type, &Type)> {
    let mut types = angle_types(segment)?;
    let first = types.next()?;
    let second = types.next()?;
    types.next().is_none().then_some((first, second))
}

fn angle_types(segment: &PathSegment) -> Option<impl Iterator<Item = &Type>> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    Some(args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }))
}
