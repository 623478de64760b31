//! Read-only gateway configuration.
//!
//! Built once at startup from the command line and shared by every request
//! handler. Nothing mutates it after [`Gateway`](crate::server::Gateway)
//! is constructed.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{
    DEFAULT_INTERPRETER, DEFAULT_PORT, DEFAULT_SCRIPT, DEFAULT_TIMEOUT, MAX_OUTPUT_BYTES,
    SCRIPTS_DIR_NAME,
};

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Interpreter binary, resolved through `PATH` when not absolute.
    pub interpreter: String,
    pub scripts_dir: PathBuf,
    /// Used when a simulation request leaves `script` blank.
    pub default_script: String,
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            scripts_dir: default_scripts_dir(),
            default_script: DEFAULT_SCRIPT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }
}

impl GatewayConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// `<cwd>/scripts`, falling back to a relative `scripts` if the working
/// directory cannot be read.
pub fn default_scripts_dir() -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(SCRIPTS_DIR_NAME))
        .unwrap_or_else(|_| PathBuf::from(SCRIPTS_DIR_NAME))
}

/// Parse the positional port argument. Anything missing or unparsable
/// silently yields [`DEFAULT_PORT`].
pub fn parse_port(arg: Option<&str>) -> u16 {
    arg.and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
