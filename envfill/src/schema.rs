//! Field descriptors and the closed set of populatable types.

use std::fmt;

use crate::convert::Delimiters;
use crate::error::EnvFillError;
use crate::value::Value;

/// Bit width of an integer field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IntWidth {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// Pointer-sized signed integer.
    Isize,
}

impl IntWidth {
    /// Rust type name for this width.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
        }
    }
}

/// Bit width of a floating-point field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FloatWidth {
    /// 32-bit floating-point number.
    F32,
    /// 64-bit floating-point number.
    F64,
}

impl FloatWidth {
    /// Rust type name for this width.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Type descriptor for a populatable field.
///
/// The set is closed: conversion dispatches exhaustively over these variants
/// and anything outside them is represented as [`TypeSpec::Unsupported`],
/// failing at population time rather than silently falling back. Composite
/// variants borrow their element descriptors so whole tables can live in
/// `const` data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeSpec {
    /// Text stored verbatim, empty input included.
    String,
    /// Boolean literal.
    Bool,
    /// Signed integer of the given width.
    Int(IntWidth),
    /// Floating-point number of the given width.
    Float(FloatWidth),
    /// Raw bytes of the input text, never delimiter-split.
    Bytes,
    /// Optional wrapper around an inner type; conversion is transparent and
    /// a successfully converted value is always present.
    Option(&'static Self),
    /// Sequence of elements split on the item delimiter.
    Seq(&'static Self),
    /// Mapping split on the item delimiter, each entry split once more on
    /// the pair delimiter.
    Map(&'static Self, &'static Self),
    /// Nested structure, populated by recursion instead of conversion.
    Struct,
    /// A type outside the handled set, carrying its rendered name.
    Unsupported(&'static str),
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("bool"),
            Self::Int(width) => f.write_str(width.name()),
            Self::Float(width) => f.write_str(width.name()),
            Self::Bytes => f.write_str("bytes"),
            Self::Option(inner) => write!(f, "option<{inner}>"),
            Self::Seq(element) => write!(f, "seq<{element}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Struct => f.write_str("struct"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Assigns a converted [`Value`] into a field of the target.
pub type SetFn<T> = fn(&mut T, Value) -> Result<(), EnvFillError>;

/// Recurses population into a nested structure, receiving the derived
/// variable name of the enclosing field as the new prefix.
pub type NestFn<T> = fn(&mut T, &str, &Delimiters) -> Result<(), EnvFillError>;

/// Description of a single populatable field of `T`.
///
/// Tables of these drive the population walk. `#[derive(EnvFill)]` builds
/// them from struct definitions; hand-written tables use the constructors
/// below and behave identically.
pub struct FieldSpec<T> {
    pub(crate) name: &'static str,
    pub(crate) ty: TypeSpec,
    pub(crate) default: Option<&'static str>,
    pub(crate) set: Option<SetFn<T>>,
    pub(crate) nested: Option<NestFn<T>>,
}

impl<T> FieldSpec<T> {
    /// Describes a convertible field assigned through `set`.
    #[must_use]
    pub const fn scalar(name: &'static str, ty: TypeSpec, set: SetFn<T>) -> Self {
        Self {
            name,
            ty,
            default: None,
            set: Some(set),
            nested: None,
        }
    }

    /// Describes a nested structure recursed into through `nest`.
    ///
    /// The field still takes part in the scalar pass when a default is
    /// attached, where its [`TypeSpec::Struct`] descriptor fails conversion
    /// with [`EnvFillError::Unsupported`]; the placeholder setter is never
    /// reached.
    #[must_use]
    pub const fn nested(name: &'static str, nest: NestFn<T>) -> Self {
        Self {
            name,
            ty: TypeSpec::Struct,
            default: None,
            set: Some(|_target, _value| Ok(())),
            nested: Some(nest),
        }
    }

    /// Describes a field that appears in the table but is never assigned.
    ///
    /// Attaching a default to such a field makes population fail with
    /// [`EnvFillError::Unexported`]; without one the field is skipped.
    #[must_use]
    pub const fn readonly(name: &'static str, ty: TypeSpec) -> Self {
        Self {
            name,
            ty,
            default: None,
            set: None,
            nested: None,
        }
    }

    /// Attaches the declared default used when the variable is absent or
    /// empty. An empty default counts as declared.
    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("default", &self.default)
            .field("settable", &self.set.is_some())
            .field("nested", &self.nested.is_some())
            .finish()
    }
}
