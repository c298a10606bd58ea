//! Converted values and their typed extractors.

use crate::error::EnvFillError;

/// A converted value ready for assignment into a field.
///
/// Numbers are carried widened: integers as `i64` and floating-point
/// numbers as `f64`, regardless of the declared field width. The extractors
/// narrow back to the declared width on assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Verbatim text.
    Str(String),
    /// Parsed boolean.
    Bool(bool),
    /// Parsed integer, widened to 64 bits.
    Int(i64),
    /// Parsed floating-point number, widened to 64 bits.
    Float(f64),
    /// Raw bytes of the input text.
    Bytes(Vec<u8>),
    /// Converted sequence elements in input order.
    Seq(Vec<Value>),
    /// Converted mapping entries in input order, duplicates included.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Extracts verbatim text.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not text.
    pub fn into_string(self) -> Result<String, EnvFillError> {
        match self {
            Self::Str(text) => Ok(text),
            other => Err(other.mismatch("text")),
        }
    }

    /// Extracts a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not a boolean.
    pub fn into_bool(self) -> Result<bool, EnvFillError> {
        match self {
            Self::Bool(flag) => Ok(flag),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// Extracts a widened integer.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not an integer.
    pub fn into_i64(self) -> Result<i64, EnvFillError> {
        match self {
            Self::Int(number) => Ok(number),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Extracts an integer narrowed to 8 bits, wrapping modulo the width.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not an integer.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing wraps to the declared width like a two's-complement store"
    )]
    pub fn into_i8(self) -> Result<i8, EnvFillError> {
        Ok(self.into_i64()? as i8)
    }

    /// Extracts an integer narrowed to 16 bits, wrapping modulo the width.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not an integer.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing wraps to the declared width like a two's-complement store"
    )]
    pub fn into_i16(self) -> Result<i16, EnvFillError> {
        Ok(self.into_i64()? as i16)
    }

    /// Extracts an integer narrowed to 32 bits, wrapping modulo the width.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not an integer.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing wraps to the declared width like a two's-complement store"
    )]
    pub fn into_i32(self) -> Result<i32, EnvFillError> {
        Ok(self.into_i64()? as i32)
    }

    /// Extracts a pointer-sized integer, wrapping on 32-bit targets.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not an integer.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing wraps to the declared width like a two's-complement store"
    )]
    pub fn into_isize(self) -> Result<isize, EnvFillError> {
        Ok(self.into_i64()? as isize)
    }

    /// Extracts a widened floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not a
    /// floating-point number.
    pub fn into_f64(self) -> Result<f64, EnvFillError> {
        match self {
            Self::Float(number) => Ok(number),
            other => Err(other.mismatch("decimal number")),
        }
    }

    /// Extracts a floating-point number narrowed to 32 bits.
    ///
    /// Values converted for an `f32` descriptor were parsed at 32-bit
    /// precision before widening, so the narrowing is exact.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not a
    /// floating-point number.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 descriptors widen from an f32 parse, so narrowing back is exact"
    )]
    pub fn into_f32(self) -> Result<f32, EnvFillError> {
        Ok(self.into_f64()? as f32)
    }

    /// Extracts raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>, EnvFillError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            other => Err(other.mismatch("bytes")),
        }
    }

    /// Extracts sequence elements in input order.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not a sequence.
    pub fn into_seq(self) -> Result<Vec<Self>, EnvFillError> {
        match self {
            Self::Seq(elements) => Ok(elements),
            other => Err(other.mismatch("sequence")),
        }
    }

    /// Extracts mapping entries in input order. Collecting them into a map
    /// lets later duplicate keys overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`EnvFillError::InvalidValue`] when `self` is not a mapping.
    pub fn into_map(self) -> Result<Vec<(Self, Self)>, EnvFillError> {
        match self {
            Self::Map(entries) => Ok(entries),
            other => Err(other.mismatch("mapping")),
        }
    }

    fn mismatch(self, expected: &'static str) -> EnvFillError {
        EnvFillError::invalid_value(format!("{self:?}"), expected)
    }
}
