//! Semantic operation hooks
//!
//! The filter never renders anything itself. Each recognized control sequence
//! is turned into one call on an [`AnsiHandler`]; every hook defaults to a
//! no-op so the base filter simply discards the sequences it understands.
//!
//! Hooks receive the downstream sink so an implementation can emit whatever
//! the real destination needs (native console calls, a different escape
//! dialect, plain text approximations).

mod color;
mod fallback;
mod recorder;

use std::io::{self, Write};

use crate::parser::Params;

pub use color::{Attribute, Color};
pub use fallback::{TextFallback, MAX_REPEAT};
pub use recorder::{Operation, OperationLog, Recorder};

/// Receiver for decoded control sequences
///
/// Counts, rows and columns are 1-based values as sent by the producer, with
/// defaults already applied. Erase modes are passed through untouched
/// (0 = to end, 1 = to start, 2 = whole).
#[allow(unused_variables)]
pub trait AnsiHandler {
    /// CUU: move the cursor up `count` rows
    fn cursor_up(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CUD: move the cursor down `count` rows
    fn cursor_down(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CUF: move the cursor right `count` columns
    fn cursor_right(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CUB: move the cursor left `count` columns
    fn cursor_left(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CNL: move down `count` lines to column 1
    fn cursor_down_line(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CPL: move up `count` lines to column 1
    fn cursor_up_line(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    /// CHA: move to `column` on the current row
    fn cursor_to_column(&mut self, out: &mut dyn Write, column: u32) -> io::Result<()> {
        Ok(())
    }

    /// CUP / HVP: move to an absolute position
    fn cursor_to(&mut self, out: &mut dyn Write, row: u32, column: u32) -> io::Result<()> {
        Ok(())
    }

    /// ED
    fn erase_screen(&mut self, out: &mut dyn Write, mode: u32) -> io::Result<()> {
        Ok(())
    }

    /// EL
    fn erase_line(&mut self, out: &mut dyn Write, mode: u32) -> io::Result<()> {
        Ok(())
    }

    fn scroll_up(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    fn scroll_down(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        Ok(())
    }

    fn set_foreground_color(&mut self, out: &mut dyn Write, color: Color) -> io::Result<()> {
        Ok(())
    }

    fn set_background_color(&mut self, out: &mut dyn Write, color: Color) -> io::Result<()> {
        Ok(())
    }

    /// Any SGR value that is neither a color nor a reset
    fn set_attribute(&mut self, out: &mut dyn Write, attribute: Attribute) -> io::Result<()> {
        Ok(())
    }

    fn reset_attributes(&mut self, out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn save_cursor(&mut self, out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn restore_cursor(&mut self, out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// A letter final byte with no dedicated hook. The parameters are handed
    /// over exactly as they were decoded.
    fn unknown_extension(
        &mut self,
        out: &mut dyn Write,
        params: &Params,
        command: u8,
    ) -> io::Result<()> {
        Ok(())
    }
}

/// Handler that discards every sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl AnsiHandler for Discard {}

impl<H: AnsiHandler + ?Sized> AnsiHandler for &mut H {
    fn cursor_up(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_up(out, count)
    }

    fn cursor_down(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_down(out, count)
    }

    fn cursor_right(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_right(out, count)
    }

    fn cursor_left(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_left(out, count)
    }

    fn cursor_down_line(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_down_line(out, count)
    }

    fn cursor_up_line(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).cursor_up_line(out, count)
    }

    fn cursor_to_column(&mut self, out: &mut dyn Write, column: u32) -> io::Result<()> {
        (**self).cursor_to_column(out, column)
    }

    fn cursor_to(&mut self, out: &mut dyn Write, row: u32, column: u32) -> io::Result<()> {
        (**self).cursor_to(out, row, column)
    }

    fn erase_screen(&mut self, out: &mut dyn Write, mode: u32) -> io::Result<()> {
        (**self).erase_screen(out, mode)
    }

    fn erase_line(&mut self, out: &mut dyn Write, mode: u32) -> io::Result<()> {
        (**self).erase_line(out, mode)
    }

    fn scroll_up(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).scroll_up(out, count)
    }

    fn scroll_down(&mut self, out: &mut dyn Write, count: u32) -> io::Result<()> {
        (**self).scroll_down(out, count)
    }

    fn set_foreground_color(&mut self, out: &mut dyn Write, color: Color) -> io::Result<()> {
        (**self).set_foreground_color(out, color)
    }

    fn set_background_color(&mut self, out: &mut dyn Write, color: Color) -> io::Result<()> {
        (**self).set_background_color(out, color)
    }

    fn set_attribute(&mut self, out: &mut dyn Write, attribute: Attribute) -> io::Result<()> {
        (**self).set_attribute(out, attribute)
    }

    fn reset_attributes(&mut self, out: &mut dyn Write) -> io::Result<()> {
        (**self).reset_attributes(out)
    }

    fn save_cursor(&mut self, out: &mut dyn Write) -> io::Result<()> {
        (**self).save_cursor(out)
    }

    fn restore_cursor(&mut self, out: &mut dyn Write) -> io::Result<()> {
        (**self).restore_cursor(out)
    }

    fn unknown_extension(
        &mut self,
        out: &mut dyn Write,
        params: &Params,
        command: u8,
    ) -> io::Result<()> {
        (**self).unknown_extension(out, params, command)
    }
}
