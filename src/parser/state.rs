//! Scanner State Machine
//!
//! Splits a byte stream into plain bytes, which go straight to the sink, and
//! CSI sequences (`ESC [ params final`), which are buffered until their final
//! byte and then handed to the dispatcher.
//!
//! States:
//! - AwaitingEscape: plain text, looking for ESC
//! - AwaitingBracket: after ESC, expecting `[`
//! - AwaitingArgument: start of a parameter, a separator or the final byte
//! - ReadingIntegerArgument: inside a run of decimal digits
//! - ReadingQuotedStringArgument: inside (or just after) a `"`-quoted value
//!
//! A sequence that is malformed, unrecognized or longer than the buffer
//! capacity is flushed to the sink verbatim, so no input byte is ever lost.

use std::io::{self, Write};

use super::dispatch::{dispatch, Dispatch};
use super::params::{parse_decimal, Param, Params};
use crate::handler::AnsiHandler;

/// Escape byte that opens every sequence
pub const ESC: u8 = 0x1B;
/// Second byte of the control sequence introducer
const CSI_BRACKET: u8 = b'[';
/// Default capacity of the pending sequence buffer
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 100;
/// Smallest usable capacity: `ESC [ final`
pub const MIN_SEQUENCE_LEN: usize = 3;
/// Largest accepted capacity
pub const MAX_SEQUENCE_LEN: usize = 64 * 1024;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Plain text processing
    #[default]
    AwaitingEscape,
    /// After ESC
    AwaitingBracket,
    /// After `ESC [` or a `;` separator
    AwaitingArgument,
    /// Collecting digits of an integer parameter
    ReadingIntegerArgument,
    /// Collecting a quoted string parameter
    ReadingQuotedStringArgument,
}

/// The byte scanner
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScanState,
    /// Every byte consumed since the ESC that opened the sequence
    buffer: Vec<u8>,
    capacity: usize,
    params: Params,
    /// Offset in `buffer` where the current parameter's bytes begin
    value_start: usize,
    /// Whether the closing quote of the current string was seen
    quote_closed: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner with the default buffer capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SEQUENCE_LEN)
    }

    /// Create a scanner whose pending buffer holds at most `capacity` bytes.
    /// Values outside [`MIN_SEQUENCE_LEN`]..=[`MAX_SEQUENCE_LEN`] are clamped.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_SEQUENCE_LEN, MAX_SEQUENCE_LEN);
        Self {
            state: ScanState::AwaitingEscape,
            buffer: Vec::with_capacity(capacity.min(DEFAULT_MAX_SEQUENCE_LEN)),
            capacity,
            params: Params::new(),
            value_start: 0,
            quote_closed: false,
        }
    }

    /// Get current scanner state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Maximum length of a buffered sequence
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes of the sequence currently in flight
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Parameters decoded so far for the sequence in flight
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Whether no sequence is in flight
    pub fn is_idle(&self) -> bool {
        self.state == ScanState::AwaitingEscape
    }

    /// Process a chunk of bytes.
    ///
    /// Equivalent to calling [`Scanner::consume`] for every byte, but runs of
    /// plain text are written to the sink in one call.
    pub fn feed<H>(&mut self, data: &[u8], out: &mut dyn Write, handler: &mut H) -> io::Result<()>
    where
        H: AnsiHandler + ?Sized,
    {
        let mut rest = data;
        while !rest.is_empty() {
            if self.is_idle() {
                let run = rest.iter().position(|&b| b == ESC).unwrap_or(rest.len());
                if run > 0 {
                    out.write_all(&rest[..run])?;
                    rest = &rest[run..];
                    continue;
                }
            }
            self.consume(rest[0], out, handler)?;
            rest = &rest[1..];
        }
        Ok(())
    }

    /// Process a single byte
    pub fn consume<H>(&mut self, byte: u8, out: &mut dyn Write, handler: &mut H) -> io::Result<()>
    where
        H: AnsiHandler + ?Sized,
    {
        match self.state {
            ScanState::AwaitingEscape => {
                if byte == ESC {
                    self.buffer.push(byte);
                    self.state = ScanState::AwaitingBracket;
                } else {
                    out.write_all(&[byte])?;
                }
            },
            ScanState::AwaitingBracket => {
                self.buffer.push(byte);
                if byte == CSI_BRACKET {
                    self.state = ScanState::AwaitingArgument;
                } else {
                    tracing::debug!("ESC not followed by '[' (got {:#04x})", byte);
                    self.abort(out)?;
                }
            },
            ScanState::AwaitingArgument => {
                self.buffer.push(byte);
                match byte {
                    b'"' => {
                        self.value_start = self.buffer.len();
                        self.quote_closed = false;
                        self.state = ScanState::ReadingQuotedStringArgument;
                    },
                    b'0'..=b'9' => {
                        self.value_start = self.buffer.len() - 1;
                        self.state = ScanState::ReadingIntegerArgument;
                    },
                    b';' => self.params.push(None),
                    _ => self.finish(byte, out, handler)?,
                }
            },
            ScanState::ReadingIntegerArgument => {
                self.buffer.push(byte);
                if !byte.is_ascii_digit() {
                    let end = self.buffer.len() - 1;
                    let value = parse_decimal(&self.buffer[self.value_start..end]);
                    self.params.push(Some(Param::Int(value)));
                    self.end_argument(byte, out, handler)?;
                }
            },
            ScanState::ReadingQuotedStringArgument => {
                self.buffer.push(byte);
                if self.quote_closed {
                    self.end_argument(byte, out, handler)?;
                } else if byte == b'"' {
                    let end = self.buffer.len() - 1;
                    let text = String::from_utf8_lossy(&self.buffer[self.value_start..end]);
                    self.params.push(Some(Param::Text(text.into_owned())));
                    self.quote_closed = true;
                }
            },
        }

        if self.buffer.len() >= self.capacity {
            tracing::debug!(
                "Escape sequence exceeded {} bytes, flushing as text",
                self.capacity
            );
            self.abort(out)?;
        }
        Ok(())
    }

    /// Flush any sequence in flight to the sink verbatim and return to the
    /// initial state. Used for malformed sequences and at end of input.
    pub fn abort(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if !self.buffer.is_empty() {
            out.write_all(&self.buffer)?;
        }
        self.reset();
        Ok(())
    }

    /// Drop any sequence in flight without forwarding it
    pub fn reset(&mut self) {
        self.state = ScanState::AwaitingEscape;
        self.buffer.clear();
        self.params.clear();
        self.value_start = 0;
        self.quote_closed = false;
    }

    /// A parameter just ended on `byte`: either a separator or the final byte
    fn end_argument<H>(&mut self, byte: u8, out: &mut dyn Write, handler: &mut H) -> io::Result<()>
    where
        H: AnsiHandler + ?Sized,
    {
        if byte == b';' {
            self.state = ScanState::AwaitingArgument;
            Ok(())
        } else {
            self.finish(byte, out, handler)
        }
    }

    /// Dispatch on the final byte, then consume or flush the sequence
    fn finish<H>(&mut self, final_byte: u8, out: &mut dyn Write, handler: &mut H) -> io::Result<()>
    where
        H: AnsiHandler + ?Sized,
    {
        match dispatch(&self.params, final_byte, handler, out)? {
            Dispatch::Recognized => {
                self.reset();
                Ok(())
            },
            Dispatch::Unrecognized => {
                tracing::debug!("Unrecognized sequence {:?}, flushing as text", self.buffer);
                self.abort(out)
            },
        }
    }
}
