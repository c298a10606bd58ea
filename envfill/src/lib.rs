//! Populate plain structs from prefixed environment variables.
//!
//! `envfill` walks a struct's described fields in declaration order,
//! derives an upper-snake variable name for each from the prefix and the
//! field identifier, and assigns the parsed value. A field takes part only
//! when it declares a default: the default applies when its variable is
//! absent or empty, and a non-empty variable overrides it. Fields without
//! a default keep whatever value the caller put there. Nested structures
//! are always recursed into with an extended prefix.
//!
//! Supported field types are `String`, `bool`, the signed integers `i8`
//! through `i64` plus `isize`, `f32` and `f64`, `Option<T>` over those,
//! `Vec<u8>` (raw bytes of the variable text), other `Vec<T>`, and
//! `HashMap`/`BTreeMap` with supported keys and values. Sequences split on
//! `","` and mapping entries on `":"` by default; both separators are
//! configurable per call.
//!
//! ```
//! use envfill::EnvFill;
//!
//! #[derive(Default, EnvFill)]
//! struct ServerConfig {
//!     #[envfill(default = "8080")]
//!     api_port: i32,
//!     #[envfill(default = "local")]
//!     service_env: String,
//!     verbose: bool,
//! }
//!
//! let mut config = ServerConfig::default();
//! config.fill_from_env("ENVFILL_DOC_SERVER")?;
//! assert_eq!(config.api_port, 8080);
//! assert_eq!(config.service_env, "local");
//! assert!(!config.verbose);
//! # Ok::<(), envfill::EnvFillError>(())
//! ```

pub mod convert;
pub mod error;
pub mod name;
pub mod populate;
pub mod schema;
pub mod value;

pub use convert::Delimiters;
pub use envfill_macros::EnvFill;
pub use error::EnvFillError;
pub use name::env_var_name;
pub use populate::populate;
pub use schema::{FieldSpec, FloatWidth, IntWidth, NestFn, SetFn, TypeSpec};
pub use value::Value;

/// Types whose described fields can be filled from environment variables.
///
/// `#[derive(EnvFill)]` generates the [`FieldSpec`] table from a struct
/// definition, reading per-field `#[envfill(default = "...")]` attributes.
/// Hand-written tables behave identically:
///
/// ```
/// use envfill::{EnvFill, FieldSpec, IntWidth, TypeSpec};
///
/// #[derive(Default)]
/// struct Worker {
///     threads: i64,
///     queue: String,
/// }
///
/// impl EnvFill for Worker {
///     const FIELDS: &'static [FieldSpec<Self>] = &[
///         FieldSpec::scalar("threads", TypeSpec::Int(IntWidth::I64), |worker: &mut Self, value| {
///             worker.threads = value.into_i64()?;
///             Ok(())
///         })
///         .with_default("4"),
///         FieldSpec::scalar("queue", TypeSpec::String, |worker, value| {
///             worker.queue = value.into_string()?;
///             Ok(())
///         }),
///     ];
/// }
///
/// let mut worker = Worker::default();
/// worker.fill_from_env("ENVFILL_DOC_WORKER")?;
/// assert_eq!(worker.threads, 4);
/// assert_eq!(worker.queue, "");
/// # Ok::<(), envfill::EnvFillError>(())
/// ```
pub trait EnvFill: Sized + 'static {
    /// Field descriptors in declaration order.
    const FIELDS: &'static [FieldSpec<Self>];

    /// Fills described fields from `{prefix}_*` variables, splitting
    /// sequences on `","` and mapping entries on `":"`.
    ///
    /// # Errors
    ///
    /// Returns the first [`EnvFillError`] raised by the walk, leaving
    /// `self` populated up to the failing field.
    fn fill_from_env(&mut self, prefix: &str) -> Result<(), EnvFillError> {
        self.fill_from_env_with(prefix, &Delimiters::default())
    }

    /// Fills described fields, splitting collection text on `delimiters`.
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use envfill::{Delimiters, EnvFill};
    ///
    /// #[derive(Default, EnvFill)]
    /// struct Routes {
    ///     #[envfill(default = "reads=primary;writes=replica")]
    ///     backends: HashMap<String, String>,
    /// }
    ///
    /// let mut routes = Routes::default();
    /// routes.fill_from_env_with("ENVFILL_DOC_ROUTES", &Delimiters::new(";", "="))?;
    /// assert_eq!(routes.backends.len(), 2);
    /// # Ok::<(), envfill::EnvFillError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first [`EnvFillError`] raised by the walk, leaving
    /// `self` populated up to the failing field.
    fn fill_from_env_with(
        &mut self,
        prefix: &str,
        delimiters: &Delimiters,
    ) -> Result<(), EnvFillError> {
        populate(self, prefix, delimiters)
    }
}
