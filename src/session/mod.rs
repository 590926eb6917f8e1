//! Extraction service sessions.
//!
//! Rendered text is sent to a remote extraction service which answers with
//! a JSON array of `[key, value]` pairs. A session owns one channel, waits a
//! bounded time for each answer, and is closed explicitly.

mod client;
mod config;
mod framing;
mod tcp;

use std::future::Future;

use crate::error::Result;

pub use client::ExtractionSession;
pub use config::{SessionConfig, DEFAULT_ADDRESS, DEFAULT_EVENT, DEFAULT_TIMEOUT};
pub use framing::{frame_request, parse_response, RequestFrame, ResponseFrame};
pub use tcp::TcpChannel;

/// A request/response channel to the extraction service.
///
/// `call` sends one request and resolves with the raw pairs payload. A call
/// dropped before completion must leave the channel usable for the next one.
pub trait ExtractionChannel {
    /// Send `payload` under `event` and wait for its answer.
    fn call(&mut self, event: &str, payload: &str) -> impl Future<Output = Result<String>> + Send;

    /// Release the channel.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}
