//! Server configuration

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Default page size when the query string has none
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size a client may ask for
pub const MAX_PAGE_SIZE: usize = 100;

/// Everything the server needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// CSV file holding the image metadata
    pub csv_path: PathBuf,
    /// Root of the `{kind}/{filename}` image tree
    pub images_dir: PathBuf,
    /// Viewer assets served under `/static/`
    pub static_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            csv_path: PathBuf::from("images.csv"),
            images_dir: PathBuf::from("images"),
            static_dir: PathBuf::from("static"),
            host: "127.0.0.1".to_string(),
            port: 8888,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
