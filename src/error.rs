//! Error types for cfptext library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for cfptext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and record assembly.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files, or on the extraction channel.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The root selector could not be parsed.
    #[error("Invalid root selector: {0}")]
    InvalidSelector(String),

    /// The root selector matched nothing in the document.
    #[error("Root element not found: {0}")]
    RootNotFound(String),

    /// The document tree is nested deeper than the configured limit.
    #[error("Document nesting exceeds depth limit of {0}")]
    DepthLimit(usize),

    /// The extraction service did not answer in time.
    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    /// The extraction service answered with a payload that is not a list of key/value pairs.
    #[error("Invalid response payload: {0}")]
    InvalidResponse(String),

    /// The extraction service answered with an error frame.
    #[error("Extraction service error: {0}")]
    Service(String),

    /// The channel closed before a response arrived.
    #[error("Extraction channel disconnected")]
    Disconnected,

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl Error {
    /// Whether this error means the service never answered.
    ///
    /// The caller owns retry policy; this only classifies.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
