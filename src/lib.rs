// Library interface for zipserve
// This allows testing and external usage of zipserve components

pub mod archive;
pub mod args;
pub mod config;
pub mod errors;
pub mod listing;
pub mod renderer;
pub mod routes;
pub mod security;

// Re-export commonly used types
pub use config::ZipserveConfig;
pub use errors::{RuntimeError, StartupError};
