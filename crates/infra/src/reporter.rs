//! Reporter implementations
//!
//! - [`TracingReporter`]: forwards messages as `tracing` events
//! - [`WriterReporter`]: writes messages as lines to any `io::Write`

use std::io::{self, Write};

use parking_lot::Mutex;
use rebound_core::Reporter;
use tracing::{info, warn};

/// Reporter emitting each message as an `info!` event
///
/// Blank framing lines are dropped; log lines carry their own separation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn message(&self, message: &str) {
        let text = message.trim_matches('\n');
        if !text.is_empty() {
            info!(target: "rebound::reporter", "{text}");
        }
    }
}

/// Reporter writing each message followed by a newline
///
/// The writer is flushed after every message so output interleaves correctly
/// with the test framework's own output.
#[derive(Debug)]
pub struct WriterReporter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterReporter<Vec<u8>> {
    /// In-memory reporter, mostly useful in tests
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock()).into_owned()
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn message(&self, message: &str) {
        let mut writer = self.writer.lock();
        if let Err(err) = writeln!(writer, "{message}").and_then(|()| writer.flush()) {
            warn!(error = %err, "Failed to write reporter message");
        }
    }
}
