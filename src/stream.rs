//! ANSI output stream
//!
//! Wraps a destination sink and filters everything written to it: plain
//! bytes pass through unchanged, recognized control sequences are converted
//! into [`AnsiHandler`] calls and never reach the sink.

use std::io::{self, Write};

use crate::config::FilterConfig;
use crate::handler::{AnsiHandler, Discard};
use crate::parser::{ScanState, Scanner};

/// A filtering writer
///
/// Not meant to be shared between threads without external locking: bytes
/// must arrive in order for sequences to be recognized.
#[derive(Debug)]
pub struct AnsiOutputStream<W: Write, H: AnsiHandler = Discard> {
    sink: W,
    handler: H,
    scanner: Scanner,
}

impl<W: Write> AnsiOutputStream<W, Discard> {
    /// Create a stream that discards every recognized sequence
    pub fn discarding(sink: W) -> Self {
        Self::new(sink, Discard)
    }
}

impl<W: Write, H: AnsiHandler> AnsiOutputStream<W, H> {
    /// Create a stream with the default sequence buffer capacity
    pub fn new(sink: W, handler: H) -> Self {
        Self {
            sink,
            handler,
            scanner: Scanner::new(),
        }
    }

    /// Create a stream from a configuration
    pub fn with_config(sink: W, handler: H, config: &FilterConfig) -> Self {
        Self {
            sink,
            handler,
            scanner: Scanner::with_capacity(config.max_sequence_len),
        }
    }

    /// Process a single byte.
    ///
    /// Errors come from the sink or the handler; the scanner is left in the
    /// state it had reached, and continuing after an error is not supported.
    pub fn consume(&mut self, byte: u8) -> io::Result<()> {
        self.scanner.consume(byte, &mut self.sink, &mut self.handler)
    }

    /// Current scanner state
    pub fn state(&self) -> ScanState {
        self.scanner.state()
    }

    /// Bytes of an unfinished sequence held back from the sink
    pub fn pending(&self) -> &[u8] {
        self.scanner.pending()
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// End of input: forward any unfinished sequence verbatim, flush the sink
    /// and hand back the sink and the handler.
    pub fn finish(mut self) -> io::Result<(W, H)> {
        if !self.scanner.is_idle() {
            tracing::debug!(
                "Input ended inside a sequence, flushing {} bytes",
                self.scanner.pending().len()
            );
        }
        self.scanner.abort(&mut self.sink)?;
        self.sink.flush()?;
        Ok((self.sink, self.handler))
    }
}

impl<W: Write, H: AnsiHandler> Write for AnsiOutputStream<W, H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.scanner.feed(buf, &mut self.sink, &mut self.handler)?;
        Ok(buf.len())
    }

    /// Flushes the sink. An unfinished sequence stays buffered so that it can
    /// be completed by a later write.
    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
