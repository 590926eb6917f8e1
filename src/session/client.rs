//! Extraction session: one channel, explicit open/close lifecycle.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::DateGroups;
use crate::records::{assemble_records, parse_pairs};

use super::{ExtractionChannel, SessionConfig, TcpChannel};

/// A session with the extraction service.
///
/// Requests are sent one at a time; each response is awaited for at most
/// the configured timeout. Sessions are independent values, so concurrent
/// extractions each hold their own.
pub struct ExtractionSession<C> {
    channel: C,
    config: SessionConfig,
    requests: u64,
}

impl ExtractionSession<TcpChannel> {
    /// Connect to the service named in `config`.
    pub async fn open(config: SessionConfig) -> Result<Self> {
        let channel = TcpChannel::connect(&config.address).await?;
        Ok(Self::with_channel(channel, config))
    }
}

impl<C: ExtractionChannel> ExtractionSession<C> {
    /// Build a session over an already open channel.
    pub fn with_channel(channel: C, config: SessionConfig) -> Self {
        Self {
            channel,
            config,
            requests: 0,
        }
    }

    /// Get the session config.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> u64 {
        self.requests
    }

    /// Send rendered text and wait for its key/value pairs.
    ///
    /// Fails with [`Error::Timeout`] when no response arrives in time; the
    /// pending call is dropped, not retried.
    pub async fn request_pairs(&mut self, text: &str) -> Result<Vec<(String, String)>> {
        let limit: Duration = self.config.timeout;
        self.requests += 1;

        let call = self.channel.call(&self.config.event, text);
        let payload = match tokio::time::timeout(limit, call).await {
            Ok(result) => result?,
            Err(_) => {
                log::warn!("Extraction service did not answer within {:?}", limit);
                return Err(Error::Timeout(limit));
            }
        };
        parse_pairs(&payload)
    }

    /// Send rendered text and assemble the answer into grouped records.
    pub async fn extract_records(&mut self, text: &str) -> Result<DateGroups> {
        let pairs = self.request_pairs(text).await?;
        Ok(assemble_records(pairs))
    }

    /// Close the channel, ending the session.
    pub async fn close(mut self) -> Result<()> {
        log::debug!("Closing extraction session after {} requests", self.requests);
        self.channel.close().await
    }
}
