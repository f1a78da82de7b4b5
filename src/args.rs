use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "zipserve", author, about, version)]
pub struct CliArgs {
    /// Be verbose, includes debug output
    #[arg(short = 'v', long = "verbose", env = "ZIPSERVE_VERBOSE")]
    pub verbose: bool,

    /// Which path to serve
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Port to use
    #[arg(short = 'p', long = "port", default_value = "8080", env = "ZIPSERVE_PORT")]
    pub port: u16,

    /// Interface to listen on (can be repeated; defaults to all interfaces)
    #[arg(
        short = 'i',
        long = "interfaces",
        env = "ZIPSERVE_INTERFACE",
        num_args(1)
    )]
    pub interfaces: Vec<IpAddr>,
}
