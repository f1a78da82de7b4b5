//! Runtime configuration, built once at startup and immutable afterwards.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::{
    args::CliArgs,
    errors::ConfigValidationError,
};

/// Configuration of the zipserve application
#[derive(Debug, Clone)]
pub struct ZipserveConfig {
    /// Enable verbose mode
    pub verbose: bool,

    /// The served root: the directory exposed for listing and download
    pub path: PathBuf,

    /// Port on which zipserve will be listening
    pub port: u16,

    /// IP address(es) on which zipserve will be available
    pub interfaces: Vec<IpAddr>,
}

impl ZipserveConfig {
    /// Parses the command line arguments with validation.
    pub fn try_from_args(args: CliArgs) -> Result<Self> {
        if let Err(errors) = validate(&args) {
            for error in &errors {
                log_validation_failure(error);
            }
            if let Some(first_error) = errors.into_iter().next() {
                return Err(anyhow!(first_error));
            }
        }

        let path = args
            .path
            .unwrap_or_else(|| PathBuf::from("."))
            .canonicalize()
            .context("Couldn't resolve the serve path")?;

        let interfaces = if !args.interfaces.is_empty() {
            args.interfaces
        } else {
            vec![
                IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)),
                IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            ]
        };

        let port = match args.port {
            0 => port_check::free_local_port().context("No free ports available")?,
            _ => args.port,
        };

        Ok(Self {
            verbose: args.verbose,
            path,
            port,
            interfaces,
        })
    }
}

fn validate(args: &CliArgs) -> std::result::Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if let Err(err) = validate_port(args.port) {
        errors.push(err);
    }

    if let Err(err) = validate_serve_path(args) {
        errors.push(err);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_port(port: u16) -> std::result::Result<(), ConfigValidationError> {
    #[cfg(unix)]
    if port > 0 && port < 1024 {
        return Err(ConfigValidationError::PortError {
            port,
            suggestion: format!(
                "Port {port} is a privileged port (0-1023). Use a port >= 1024 or run with appropriate privileges"
            ),
        });
    }

    Ok(())
}

fn validate_serve_path(args: &CliArgs) -> std::result::Result<(), ConfigValidationError> {
    if let Some(ref path) = args.path {
        if !path.exists() {
            return Err(ConfigValidationError::PathError {
                path: path.display().to_string(),
                reason: "Path does not exist".to_string(),
                suggestion: format!("Create the directory with: mkdir -p '{}'", path.display()),
            });
        }

        if !path.is_dir() {
            return Err(ConfigValidationError::PathError {
                path: path.display().to_string(),
                reason: "Serve path is not a directory".to_string(),
                suggestion: "Point zipserve at a directory, not a file".to_string(),
            });
        }
    }

    Ok(())
}

fn log_validation_failure(error: &ConfigValidationError) {
    match error {
        ConfigValidationError::PortError { port, .. } => {
            log::error!("Configuration validation failed: port conflict on port {port}");
        }
        ConfigValidationError::PathError { path, reason, .. } => {
            log::error!("Configuration validation failed: path error for '{path}' - {reason}");
        }
    }
}

#[cfg(test)]
#[path = "config/tests.rs"]
mod tests;
