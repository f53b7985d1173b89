//! Configuration for the iqdb client
//!
//! Centralized configuration with sensible defaults.

/// Configuration for a client connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub server_addr: String,

    /// Socket read timeout in milliseconds (0 = no timeout).
    /// The protocol has no cancellation primitive; a stalled peer blocks
    /// the caller indefinitely unless a socket deadline is set here.
    pub read_timeout_ms: u64,

    /// Socket write timeout in milliseconds (0 = no timeout)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Size of the buffer used per `read_chunk` call, and of each chunk
    /// streamed during payload upload
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5566".to_string(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            chunk_size: 4096,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address (host:port)
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the socket read timeout (in milliseconds, 0 disables)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the socket write timeout (in milliseconds, 0 disables)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the read/upload chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
