//! Test helpers shared across crates in the workspace.
//!
//! The `env` module provides RAII guards for mutating process environment
//! variables from tests without leaking state between them.

pub mod env;
