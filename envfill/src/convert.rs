//! Type-directed conversion of raw text into [`Value`]s.

use crate::error::EnvFillError;
use crate::schema::{FloatWidth, TypeSpec};
use crate::value::Value;

/// Separators used to split collection text.
///
/// Both separators apply uniformly through nested element types. They must
/// be non-empty; splitting on an empty separator is unsupported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delimiters {
    item: String,
    pair: String,
}

impl Delimiters {
    /// Creates delimiters splitting collections on `item` and mapping
    /// entries on `pair`.
    #[must_use]
    pub fn new(item: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            pair: pair.into(),
        }
    }

    /// Separator between collection items.
    #[must_use]
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Separator between a mapping key and its value.
    #[must_use]
    pub fn pair(&self) -> &str {
        &self.pair
    }
}

impl Default for Delimiters {
    /// `","` between items and `":"` within pairs.
    fn default() -> Self {
        Self::new(",", ":")
    }
}

/// Converts `raw` into a [`Value`] shaped by `ty`.
///
/// Scalar descriptors parse `raw` whole; collection descriptors split it on
/// `delimiters` and recurse into their element descriptors, and optional
/// wrappers convert transparently. [`TypeSpec::Struct`] never converts here
/// because nested structures are populated by recursion instead.
///
/// # Errors
///
/// Returns [`EnvFillError::InvalidValue`] when `raw` or one of its split
/// parts does not parse as the target kind, and [`EnvFillError::Unsupported`]
/// for [`TypeSpec::Struct`] and [`TypeSpec::Unsupported`] descriptors.
pub fn from_raw(ty: &TypeSpec, raw: &str, delimiters: &Delimiters) -> Result<Value, EnvFillError> {
    match ty {
        TypeSpec::String => Ok(Value::Str(raw.to_owned())),
        TypeSpec::Bool => parse_bool(raw),
        TypeSpec::Int(_) => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|err| EnvFillError::invalid_value_with(raw, "integer", err)),
        TypeSpec::Float(width) => parse_float(*width, raw),
        TypeSpec::Bytes => Ok(Value::Bytes(raw.as_bytes().to_vec())),
        TypeSpec::Option(inner) => from_raw(inner, raw, delimiters),
        TypeSpec::Seq(element) => seq_values(element, raw, delimiters),
        TypeSpec::Map(key, value) => map_entries(key, value, raw, delimiters),
        TypeSpec::Struct => Err(EnvFillError::unsupported(ty.to_string())),
        TypeSpec::Unsupported(name) => Err(EnvFillError::unsupported(*name)),
    }
}

fn parse_bool(raw: &str) -> Result<Value, EnvFillError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(Value::Bool(true)),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(Value::Bool(false)),
        _ => Err(EnvFillError::invalid_value(raw, "boolean")),
    }
}

fn parse_float(width: FloatWidth, raw: &str) -> Result<Value, EnvFillError> {
    // f32 descriptors parse at 32-bit precision before widening.
    let parsed = match width {
        FloatWidth::F32 => raw.parse::<f32>().map(f64::from),
        FloatWidth::F64 => raw.parse::<f64>(),
    };
    parsed
        .map(Value::Float)
        .map_err(|err| EnvFillError::invalid_value_with(raw, "decimal number", err))
}

fn seq_values(
    element: &TypeSpec,
    raw: &str,
    delimiters: &Delimiters,
) -> Result<Value, EnvFillError> {
    if raw.trim().is_empty() {
        return Ok(Value::Seq(Vec::new()));
    }
    raw.split(delimiters.item())
        .map(|part| from_raw(element, part, delimiters))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Seq)
}

fn map_entries(
    key_ty: &TypeSpec,
    value_ty: &TypeSpec,
    raw: &str,
    delimiters: &Delimiters,
) -> Result<Value, EnvFillError> {
    if raw.trim().is_empty() {
        return Ok(Value::Map(Vec::new()));
    }
    let mut entries = Vec::new();
    for part in raw.split(delimiters.item()) {
        let segments: Vec<&str> = part.split(delimiters.pair()).collect();
        let [key_text, value_text] = segments.as_slice() else {
            return Err(EnvFillError::invalid_value(part, "key/value pair"));
        };
        entries.push((
            from_raw(key_ty, key_text, delimiters)?,
            from_raw(value_ty, value_text, delimiters)?,
        ));
    }
    Ok(Value::Map(entries))
}
