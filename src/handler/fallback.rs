//! Plain text approximations
//!
//! For sinks that are not terminals at all (log files, pipes), moving right
//! can be approximated with spaces and moving down a line with newlines.
//! Everything else stays a no-op.
//!
//! A single sequence expands to at most [`MAX_REPEAT`] bytes, so a count
//! like `ESC [ 4294967295 C` cannot blow up the output.

use std::io::{self, Write};

use super::AnsiHandler;

/// Most bytes a single cursor-right or down-line sequence expands to
pub const MAX_REPEAT: u32 = 1024;

/// Handler emitting spaces for cursor-right and newlines for down-line
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFallback;

impl TextFallback {
    fn repeat(out: &mut dyn Write, byte: u8, count: u32) -> io::Result<()> {
        const CHUNK: usize = 64;
        let chunk = [byte; CHUNK];
        let mut remaining = count.min(MAX_REPEAT) as usize;
        while remaining > 0 {
            let n = remaining.min(CHUNK);
            out.write_all(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }
}

impl AnsiHandler for TextFallback {
    fn cursor_right(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Self::repeat(out, b' ', count)
    }

    fn cursor_down_line(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Self::repeat(out, b'\n', count)
    }
}
