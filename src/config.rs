use serde::{ Deserialize, Serialize };
use std::net::SocketAddr;

use crate::implementations::config::ConfigError;

/// Options for the HTTP listener and request limits
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    /// Upper bound on a request body, enforced before JSON decoding
    pub max_body_bytes: usize,
    /// Upper bound on the submitted `code` field
    pub max_code_bytes: usize,
}

impl ServerOptions {
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad bind address {}:{}: {}", self.host, self.port, e)))
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_body_bytes: 1024 * 1024,
            max_code_bytes: 100 * 1024,
        }
    }
}
