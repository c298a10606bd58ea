//! Error types produced while populating a struct from the environment.

use thiserror::Error;

/// Boxed source error chained beneath an [`EnvFillError::InvalidValue`].
pub type ParseSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while populating fields from the environment.
///
/// Every failure is terminal for the population call that produced it: the
/// field walk aborts at the first error and the target is left partially
/// populated. The library never logs these; presentation belongs to the
/// caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvFillError {
    /// Raw text could not be parsed as the declared field type.
    #[error("invalid value {raw:?}: expected {expected}")]
    InvalidValue {
        /// Text that failed to parse. For collections this cites the
        /// offending element or pair, not the whole variable.
        raw: String,
        /// Short description of the form the parser expected.
        expected: &'static str,
        /// Parse failure reported by the underlying scalar parser, if any.
        #[source]
        source: Option<ParseSource>,
    },

    /// A field's type descriptor lies outside the handled set.
    #[error("unsupported type `{ty}`")]
    Unsupported {
        /// Rendering of the offending type descriptor.
        ty: String,
    },

    /// A field declares a default but offers no way to assign it.
    #[error("field `{field}` declares a default but cannot be set")]
    Unexported {
        /// Identifier of the non-settable field.
        field: &'static str,
    },
}

impl EnvFillError {
    /// Builds an [`Self::InvalidValue`] without an underlying parser error.
    #[must_use]
    pub fn invalid_value(raw: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            raw: raw.into(),
            expected,
            source: None,
        }
    }

    /// Builds an [`Self::InvalidValue`] chaining the parser's own error.
    #[must_use]
    pub fn invalid_value_with(
        raw: impl Into<String>,
        expected: &'static str,
        source: impl Into<ParseSource>,
    ) -> Self {
        Self::InvalidValue {
            raw: raw.into(),
            expected,
            source: Some(source.into()),
        }
    }

    /// Builds an [`Self::Unsupported`] for the given descriptor rendering.
    #[must_use]
    pub fn unsupported(ty: impl Into<String>) -> Self {
        Self::Unsupported { ty: ty.into() }
    }

    /// Builds an [`Self::Unexported`] naming the offending field.
    #[must_use]
    pub const fn unexported(field: &'static str) -> Self {
        Self::Unexported { field }
    }
}
