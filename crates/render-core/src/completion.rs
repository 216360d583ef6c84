//! One-shot delivery of a session's encoded output.
//!
//! A session produces output as a stream of [`OutputEvent::Data`] chunks
//! followed by a single [`OutputEvent::End`]. The paired [`Completion`]
//! concatenates the chunks and resolves once, when `End` arrives. If the
//! producing side disappears without sending `End`, the completion resolves
//! with [`CompletionError::Abandoned`] instead, so partial output is never
//! handed to the caller.

use async_channel::{Receiver, Sender};
use log::trace;
use std::future::{Future, IntoFuture};
use std::io::{self, Write};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Default number of chunks that may be in flight before the producer waits.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Default chunk size used by [`ChunkWriter`].
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Data(Vec<u8>),
    End,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Output producer stopped before signalling the end of output")]
    Abandoned,
    #[error("Output receiver is gone; the render was cancelled")]
    ReceiverClosed,
}

/// Creates a connected sink and completion.
pub fn channel(capacity: usize) -> (OutputSink, Completion) {
    let (tx, rx) = async_channel::bounded(capacity.max(1));
    (OutputSink { tx }, Completion { rx })
}

/// The producing half. Deliberately not `Clone`: `End` can be sent only once.
#[derive(Debug)]
pub struct OutputSink {
    tx: Sender<OutputEvent>,
}

impl OutputSink {
    pub async fn send(&self, chunk: Vec<u8>) -> Result<(), CompletionError> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx
            .send(OutputEvent::Data(chunk))
            .await
            .map_err(|_| CompletionError::ReceiverClosed)
    }

    pub fn send_blocking(&self, chunk: Vec<u8>) -> Result<(), CompletionError> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx
            .send_blocking(OutputEvent::Data(chunk))
            .map_err(|_| CompletionError::ReceiverClosed)
    }

    /// Signals that no more output follows.
    pub async fn finish(self) -> Result<(), CompletionError> {
        self.tx
            .send(OutputEvent::End)
            .await
            .map_err(|_| CompletionError::ReceiverClosed)
    }

    pub fn finish_blocking(self) -> Result<(), CompletionError> {
        self.tx
            .send_blocking(OutputEvent::End)
            .map_err(|_| CompletionError::ReceiverClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The consuming half. Resolves to the concatenated output.
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<OutputEvent>,
}

impl Completion {
    pub async fn wait(self) -> Result<Vec<u8>, CompletionError> {
        let mut buffer = Vec::new();
        let mut chunks = 0usize;
        loop {
            match self.rx.recv().await {
                Ok(OutputEvent::Data(chunk)) => {
                    chunks += 1;
                    buffer.extend_from_slice(&chunk);
                }
                Ok(OutputEvent::End) => {
                    trace!("Output complete: {} bytes in {} chunk(s)", buffer.len(), chunks);
                    return Ok(buffer);
                }
                Err(_) => return Err(CompletionError::Abandoned),
            }
        }
    }
}

impl IntoFuture for Completion {
    type Output = Result<Vec<u8>, CompletionError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

/// A blocking `Write` adapter that forwards fixed-size chunks into a sink.
///
/// Writes fail with `ConnectionAborted` once `cancel` is set, and with `BrokenPipe`
/// once the completion side has been dropped.
pub struct ChunkWriter {
    sink: OutputSink,
    buffer: Vec<u8>,
    chunk_size: usize,
    cancel: Arc<AtomicBool>,
    written: u64,
}

impl ChunkWriter {
    pub fn new(sink: OutputSink, chunk_size: usize, cancel: Arc<AtomicBool>) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            sink,
            buffer: Vec::with_capacity(chunk_size),
            chunk_size,
            cancel,
            written: 0,
        }
    }

    /// Total bytes accepted so far.
    pub fn position(&self) -> u64 {
        self.written
    }

    /// Sends any buffered bytes followed by the end marker.
    pub fn finish(mut self) -> io::Result<()> {
        self.flush()?;
        self.sink.finish_blocking().map_err(to_io_error)
    }

    fn check_cancelled(&self) -> io::Result<()> {
        if self.cancel.load(Ordering::Acquire) {
            Err(io::Error::new(io::ErrorKind::ConnectionAborted, "render abandoned"))
        } else {
            Ok(())
        }
    }

    fn send_chunk(&mut self, len: usize) -> io::Result<()> {
        self.check_cancelled()?;
        let rest = self.buffer.split_off(len);
        let chunk = std::mem::replace(&mut self.buffer, rest);
        self.sink.send_blocking(chunk).map_err(to_io_error)
    }
}

impl Write for ChunkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_cancelled()?;
        self.buffer.extend_from_slice(buf);
        self.written += buf.len() as u64;
        while self.buffer.len() >= self.chunk_size {
            self.send_chunk(self.chunk_size)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let len = self.buffer.len();
            self.send_chunk(len)?;
        }
        Ok(())
    }
}

fn to_io_error(err: CompletionError) -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, err)
}
