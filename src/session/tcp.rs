//! TCP channel speaking newline-delimited JSON.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::error::{Error, Result};

use super::framing::{self, RequestFrame};
use super::ExtractionChannel;

/// Persistent connection to the extraction service.
///
/// Each request carries a fresh id; responses for other ids (late answers to
/// requests that already timed out) are discarded.
///
/// A call may be dropped at any await point. Unsent request bytes and a
/// partially received response line stay in the channel, and the next call
/// finishes both before doing its own work, so framing is never broken.
pub struct TcpChannel {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    next_id: u64,
    // Request bytes not yet accepted by the socket.
    outbound: Vec<u8>,
    // Bytes of the response line received so far.
    inbound: Vec<u8>,
}

impl TcpChannel {
    /// Connect to `address` (`host:port`).
    pub async fn connect(address: &str) -> Result<Self> {
        let stream = TcpStream::connect(address).await?;
        log::debug!("Connected to extraction service at {}", address);
        Ok(Self::from_stream(stream))
    }

    /// Wrap an established stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
            next_id: 0,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// Write out everything queued in `outbound`.
    ///
    /// `write` either accepts some bytes or none, so dropping this future
    /// leaves exactly the unsent tail queued.
    async fn write_pending(&mut self) -> Result<()> {
        if !self.outbound.is_empty() {
            log::trace!("Sending {} queued request bytes", self.outbound.len());
        }
        while !self.outbound.is_empty() {
            let written = self.writer.write(&self.outbound).await?;
            if written == 0 {
                return Err(Error::Disconnected);
            }
            self.outbound.drain(..written);
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Read one complete response line.
    ///
    /// `read_until` appends to `inbound` in place, so bytes received before a
    /// dropped read are kept for the next one.
    async fn read_frame(&mut self) -> Result<String> {
        loop {
            let bytes_read = self.reader.read_until(b'\n', &mut self.inbound).await?;
            if bytes_read == 0 {
                return Err(Error::Disconnected);
            }
            if self.inbound.ends_with(b"\n") {
                let line = std::mem::take(&mut self.inbound);
                return Ok(String::from_utf8(line)?);
            }
        }
    }
}

impl ExtractionChannel for TcpChannel {
    async fn call(&mut self, event: &str, payload: &str) -> Result<String> {
        self.next_id += 1;
        let id = self.next_id;

        let frame = framing::frame_request(&RequestFrame {
            id,
            event: event.to_string(),
            data: payload.to_string(),
        })?;
        // Queued after any unsent tail of an earlier request.
        self.outbound.extend_from_slice(frame.as_bytes());
        self.write_pending().await?;

        loop {
            let line = self.read_frame().await?;
            if line.trim().is_empty() {
                continue;
            }

            let response = framing::parse_response(&line)?;
            if response.id != id {
                log::debug!("Discarding stale response {} (waiting for {})", response.id, id);
                continue;
            }
            return response.into_payload();
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.write_pending().await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
