// crates/docgate-config/tests/config_load.rs
// ============================================================================
// Module: Config Loading Tests
// Description: Loading, defaulting, and validation of docgate.toml.
// Purpose: Verify fail-closed behavior for invalid configurations.
// Dependencies: docgate-config, tempfile
// ============================================================================

//! Configuration loading and validation behavior.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;

use docgate_config::CatalogStoreType;
use docgate_config::ConfigError;
use docgate_config::DocgateConfig;

#[test]
fn empty_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "")?;

    let config = DocgateConfig::load(Some(&path))?;
    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.catalog_store.store_type, CatalogStoreType::Memory);
    Ok(())
}

#[test]
fn sqlite_store_parses_with_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(
        &path,
        r#"
[server]
bind_addr = "127.0.0.1:9090"

[catalog_store]
type = "sqlite"
path = "catalog.sqlite"
busy_timeout_ms = 1000
journal_mode = "wal"
sync_mode = "normal"
"#,
    )?;

    let config = DocgateConfig::load(Some(&path))?;
    assert_eq!(config.server.bind_addr, "127.0.0.1:9090");
    assert_eq!(config.catalog_store.store_type, CatalogStoreType::Sqlite);
    assert_eq!(config.catalog_store.busy_timeout_ms, 1000);
    Ok(())
}

#[test]
fn sqlite_store_without_path_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "[catalog_store]\ntype = \"sqlite\"\n")?;

    let result = DocgateConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
    Ok(())
}

#[test]
fn memory_store_with_path_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "[catalog_store]\ntype = \"memory\"\npath = \"x.sqlite\"\n")?;

    let result = DocgateConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
    Ok(())
}

#[test]
fn invalid_bind_address_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "[server]\nbind_addr = \"not-an-address\"\n")?;

    let result = DocgateConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "[server]\nbind_adress = \"127.0.0.1:8080\"\n")?;

    let result = DocgateConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse(_))));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = DocgateConfig::load(Some(std::path::Path::new("/nonexistent/docgate.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn zero_body_limit_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("docgate.toml");
    fs::write(&path, "[server]\nmax_body_bytes = 0\n")?;

    let result = DocgateConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
    Ok(())
}
