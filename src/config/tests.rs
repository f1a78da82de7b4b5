//! Tests for configuration parsing and validation.

use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};

use crate::{args::CliArgs, config::ZipserveConfig};

/// Helper function to create a basic CliArgs with defaults
fn create_default_args() -> CliArgs {
    CliArgs {
        verbose: false,
        path: None,
        port: 0,
        interfaces: vec![],
    }
}

#[test]
fn defaults_to_current_directory_and_all_interfaces() {
    let config = ZipserveConfig::try_from_args(create_default_args()).unwrap();

    assert_eq!(config.path, PathBuf::from(".").canonicalize().unwrap());
    assert_eq!(config.interfaces.len(), 2);
    assert!(config.path.is_absolute());
}

#[test]
fn port_zero_picks_a_free_port() {
    let config = ZipserveConfig::try_from_args(create_default_args()).unwrap();
    assert_ne!(config.port, 0);
}

#[test]
fn explicit_port_is_kept() {
    let mut args = create_default_args();
    args.port = 9999;

    let config = ZipserveConfig::try_from_args(args).unwrap();
    assert_eq!(config.port, 9999);
}

#[test]
fn serve_path_is_canonicalized() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = create_default_args();
    args.path = Some(temp_dir.path().to_path_buf());

    let config = ZipserveConfig::try_from_args(args).unwrap();
    assert_eq!(config.path, temp_dir.path().canonicalize().unwrap());
}

#[test]
fn missing_serve_path_is_rejected() {
    let mut args = create_default_args();
    args.path = Some(PathBuf::from("/definitely/not/a/real/path"));

    assert!(ZipserveConfig::try_from_args(args).is_err());
}

#[test]
fn file_serve_path_is_rejected() {
    let temp_file = NamedTempFile::new().unwrap();
    let mut args = create_default_args();
    args.path = Some(temp_file.path().to_path_buf());

    assert!(ZipserveConfig::try_from_args(args).is_err());
}

#[cfg(unix)]
#[test]
fn privileged_port_is_rejected() {
    let mut args = create_default_args();
    args.port = 80;

    assert!(ZipserveConfig::try_from_args(args).is_err());
}

#[test]
fn explicit_interfaces_are_kept() {
    let mut args = create_default_args();
    args.interfaces = vec!["127.0.0.1".parse().unwrap()];

    let config = ZipserveConfig::try_from_args(args).unwrap();
    assert_eq!(
        config.interfaces,
        vec!["127.0.0.1".parse::<std::net::IpAddr>().unwrap()]
    );
}
