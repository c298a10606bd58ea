//! Hand-written field tables.
//!
//! The derive macro is the usual way to build a table, but the
//! descriptors are plain constants and can be written by hand when a
//! type needs entries the derive cannot express, such as read-only
//! fields or names that differ from the Rust identifier.

use anyhow::{Result, bail, ensure};
use envfill::{Delimiters, EnvFill, EnvFillError, FieldSpec, IntWidth, TypeSpec};
use serial_test::serial;
use test_helpers::env;

#[derive(Debug, Default)]
struct Telemetry {
    endpoint: String,
    build_stamp: String,
}

impl EnvFill for Telemetry {
    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::scalar("endpoint", TypeSpec::String, |target: &mut Self, value| {
            target.endpoint = value.into_string()?;
            Ok(())
        })
        .with_default("localhost:4317"),
        FieldSpec::readonly("buildStamp", TypeSpec::String),
    ];
}

#[test]
#[serial]
fn manual_tables_populate_like_derived_ones() -> Result<()> {
    let _scope = env::scope_with(|lock| {
        vec![
            lock.set_var("ENVFILL_MANUAL_ENDPOINT", "collector:4317"),
            lock.set_var("ENVFILL_MANUAL_BUILD_STAMP", "2024-03-01"),
        ]
    });
    let mut telemetry = Telemetry::default();
    telemetry.fill_from_env("ENVFILL_MANUAL")?;
    ensure!(
        telemetry.endpoint == "collector:4317",
        "expected collector:4317, got {:?}",
        telemetry.endpoint
    );
    ensure!(
        telemetry.build_stamp.is_empty(),
        "a read-only field without a default must be skipped"
    );
    Ok(())
}

#[derive(Debug, Default)]
struct Sealed {
    hidden: String,
}

impl EnvFill for Sealed {
    const FIELDS: &'static [FieldSpec<Self>] =
        &[FieldSpec::readonly("hidden", TypeSpec::String).with_default("secret")];
}

#[test]
#[serial]
fn defaulted_fields_without_setters_report_the_field_name() -> Result<()> {
    let _scope = env::scope_with(|lock| vec![lock.remove_var("ENVFILL_SEALED_HIDDEN")]);
    let mut sealed = Sealed::default();
    let Err(err) = sealed.fill_from_env("ENVFILL_SEALED") else {
        bail!("a defaulted field with no setter must fail");
    };
    ensure!(
        matches!(err, EnvFillError::Unexported { field: "hidden" }),
        "unexpected error: {err}"
    );
    ensure!(
        sealed.hidden.is_empty(),
        "the failing field must stay untouched"
    );
    Ok(())
}

#[derive(Debug, Default)]
struct Limits {
    max_conns: i64,
}

impl EnvFill for Limits {
    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::scalar("maxConns", TypeSpec::Int(IntWidth::I64), |target: &mut Self, value| {
            target.max_conns = value.into_i64()?;
            Ok(())
        })
        .with_default("16"),
    ];
}

#[derive(Debug, Default)]
struct Gateway {
    limits: Limits,
}

impl EnvFill for Gateway {
    const FIELDS: &'static [FieldSpec<Self>] =
        &[FieldSpec::nested("limits", |target, prefix, delimiters| {
            envfill::populate(&mut target.limits, prefix, delimiters)
        })];
}

#[test]
#[serial]
fn nested_entries_recurse_with_the_derived_prefix() -> Result<()> {
    let _scope = env::scope_with(|lock| {
        vec![lock.set_var("ENVFILL_GATEWAY_LIMITS_MAX_CONNS", "64")]
    });
    let mut gateway = Gateway::default();
    gateway.fill_from_env("ENVFILL_GATEWAY")?;
    ensure!(
        gateway.limits.max_conns == 64,
        "expected 64, got {}",
        gateway.limits.max_conns
    );
    Ok(())
}

#[derive(Debug, Default)]
struct Listener {
    api_port: i64,
}

impl EnvFill for Listener {
    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::scalar("apiPort", TypeSpec::Int(IntWidth::I64), |target: &mut Self, value| {
            target.api_port = value.into_i64()?;
            Ok(())
        })
        .with_default("8080"),
    ];
}

#[test]
#[serial]
fn camel_case_entry_names_derive_acronym_aware_variables() -> Result<()> {
    let _scope =
        env::scope_with(|lock| vec![lock.set_var("ENVFILL_LISTENER_API_PORT", "9090")]);
    let mut listener = Listener::default();
    listener.fill_from_env("ENVFILL_LISTENER")?;
    ensure!(
        listener.api_port == 9090,
        "expected 9090, got {}",
        listener.api_port
    );
    Ok(())
}

#[test]
fn delimiter_accessors_expose_both_separators() {
    let defaults = Delimiters::default();
    assert_eq!(defaults.item(), ",");
    assert_eq!(defaults.pair(), ":");
    let custom = Delimiters::new(";", "=");
    assert_eq!(custom.item(), ";");
    assert_eq!(custom.pair(), "=");
}

#[test]
fn descriptors_render_readable_names() {
    let map = TypeSpec::Map(&TypeSpec::String, &TypeSpec::Int(IntWidth::I64));
    assert_eq!(map.to_string(), "map<string, i64>");
    let seq = TypeSpec::Seq(&TypeSpec::Float(envfill::FloatWidth::F32));
    assert_eq!(seq.to_string(), "seq<f32>");
}
