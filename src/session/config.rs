//! Extraction session configuration.

use std::time::Duration;

/// Default address of the extraction service.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:9090";

/// Default event name of an extraction request.
pub const DEFAULT_EVENT: &str = "extractCrawlData";

/// Default time to wait for a response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Options for an extraction session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Service address (`host:port`)
    pub address: String,

    /// Event name sent with every request
    pub event: String,

    /// Maximum wait for one response
    pub timeout: Duration,
}

impl SessionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the event name.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Set the response timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            event: DEFAULT_EVENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
