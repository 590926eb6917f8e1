//! Message framing for newline-delimited JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Request sent to the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFrame {
    /// Correlation id, echoed by the response
    pub id: u64,

    /// Event name
    pub event: String,

    /// Rendered document text
    pub data: String,
}

/// Response from the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFrame {
    /// Id of the request this answers
    pub id: u64,

    /// Pairs payload: a string holding JSON, or the JSON array itself
    #[serde(default)]
    pub data: serde_json::Value,

    /// Error reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseFrame {
    /// Extract the JSON text of the pairs payload.
    pub fn into_payload(self) -> Result<String> {
        if let Some(message) = self.error {
            return Err(Error::Service(message));
        }
        match self.data {
            serde_json::Value::String(text) => Ok(text),
            serde_json::Value::Null => Err(Error::InvalidResponse("empty payload".to_string())),
            other => Ok(other.to_string()),
        }
    }
}

/// Serialize a request to a JSON line (with trailing newline).
pub fn frame_request(frame: &RequestFrame) -> Result<String> {
    let mut json = serde_json::to_string(frame).map_err(|e| Error::Render(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// Parse a single line of text as a response.
pub fn parse_response(line: &str) -> Result<ResponseFrame> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidResponse("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| Error::InvalidResponse(e.to_string()))
}
