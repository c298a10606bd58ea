//! The depth-first field walk assigning environment and default values.

use std::env;

use crate::EnvFill;
use crate::convert::{self, Delimiters};
use crate::error::EnvFillError;
use crate::name::env_var_name;
use crate::schema::TypeSpec;

/// Populates `target`'s described fields from the environment.
///
/// Fields are visited in table order. Nested structures are recursed into
/// first, with the field's derived variable name as the new prefix. A field
/// without a declared default is then left untouched, whatever the
/// environment holds. For the rest, a non-empty variable overrides the
/// default and the chosen text is converted and assigned. The walk aborts
/// on the first failure, leaving `target` populated up to that point.
///
/// Variables are read live on every call; nothing is cached between calls.
///
/// # Errors
///
/// Propagates [`EnvFillError::InvalidValue`] and
/// [`EnvFillError::Unsupported`] from conversion, and returns
/// [`EnvFillError::Unexported`] when a defaulted field offers no setter.
pub fn populate<T: EnvFill>(
    target: &mut T,
    prefix: &str,
    delimiters: &Delimiters,
) -> Result<(), EnvFillError> {
    for field in T::FIELDS {
        let var = env_var_name(field.name, prefix);
        if let Some(nest) = field.nested {
            nest(target, &var, delimiters)?;
        } else if field.ty == TypeSpec::Struct {
            // A nested structure with no way to descend into it.
            continue;
        }
        let Some(default) = field.default else {
            continue;
        };
        let from_env = env::var(&var).ok().filter(|value| !value.is_empty());
        if from_env.is_some() {
            tracing::trace!(var = %var, field = field.name, "environment value selected");
        } else {
            tracing::trace!(var = %var, field = field.name, "declared default selected");
        }
        let raw = from_env.unwrap_or_else(|| default.to_owned());
        let Some(set) = field.set else {
            return Err(EnvFillError::unexported(field.name));
        };
        let converted = convert::from_raw(&field.ty, &raw, delimiters)?;
        set(target, converted)?;
    }
    Ok(())
}
