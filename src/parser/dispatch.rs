//! CSI command dispatch
//!
//! Maps a final byte and its decoded parameters to exactly one handler call.
//! Each final byte has its own branch; parameters are resolved before any
//! hook runs so a malformed command never produces a partial effect.

use std::io::{self, Write};

use super::params::{Param, Params};
use crate::handler::{AnsiHandler, Attribute, Color};

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A hook consumed the sequence; its bytes must not reach the sink
    Recognized,
    /// Unknown command or malformed parameters; the raw bytes are forwarded
    Unrecognized,
}

/// Commands selected by the final byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `A`
    CursorUp,
    /// `B`
    CursorDown,
    /// `C`
    CursorRight,
    /// `D`
    CursorLeft,
    /// `E`
    CursorDownLine,
    /// `F`
    CursorUpLine,
    /// `G`
    CursorToColumn,
    /// `H` or `f`
    CursorTo,
    /// `J`
    EraseScreen,
    /// `K`
    EraseLine,
    /// `S`
    ScrollUp,
    /// `T`
    ScrollDown,
    /// `m`
    SelectGraphicRendition,
    /// `s`
    SaveCursor,
    /// `u`
    RestoreCursor,
    /// Any other ASCII letter
    Extension(u8),
}

impl Command {
    /// Look up the command for a final byte
    pub fn from_final_byte(byte: u8) -> Option<Self> {
        let command = match byte {
            b'A' => Command::CursorUp,
            b'B' => Command::CursorDown,
            b'C' => Command::CursorRight,
            b'D' => Command::CursorLeft,
            b'E' => Command::CursorDownLine,
            b'F' => Command::CursorUpLine,
            b'G' => Command::CursorToColumn,
            b'H' | b'f' => Command::CursorTo,
            b'J' => Command::EraseScreen,
            b'K' => Command::EraseLine,
            b'S' => Command::ScrollUp,
            b'T' => Command::ScrollDown,
            b'm' => Command::SelectGraphicRendition,
            b's' => Command::SaveCursor,
            b'u' => Command::RestoreCursor,
            b if b.is_ascii_alphabetic() => Command::Extension(b),
            _ => return None,
        };
        Some(command)
    }
}

/// What a single SGR value asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rendition {
    Foreground(Color),
    Background(Color),
    Reset,
    Attribute(Attribute),
}

impl Rendition {
    fn from_value(value: u32) -> Self {
        if let Some(color) = Self::color_offset(value, 30) {
            return Rendition::Foreground(color);
        }
        if let Some(color) = Self::color_offset(value, 40) {
            return Rendition::Background(color);
        }
        match value {
            0 | 39 | 49 => Rendition::Reset,
            _ => Rendition::Attribute(Attribute(value)),
        }
    }

    fn color_offset(value: u32, base: u32) -> Option<Color> {
        value.checked_sub(base).and_then(Color::from_index)
    }
}

/// Resolve `final_byte` + `params` and invoke the matching hook.
pub fn dispatch<H>(
    params: &Params,
    final_byte: u8,
    handler: &mut H,
    out: &mut dyn Write,
) -> io::Result<Dispatch>
where
    H: AnsiHandler + ?Sized,
{
    let Some(command) = Command::from_final_byte(final_byte) else {
        return Ok(Dispatch::Unrecognized);
    };

    // Resolve a parameter or bail out as unrecognized
    macro_rules! resolve {
        ($value:expr) => {
            match $value {
                Some(value) => value,
                None => {
                    tracing::debug!(
                        "Malformed parameters for {:?}: {:?}",
                        command,
                        params
                    );
                    return Ok(Dispatch::Unrecognized);
                },
            }
        };
    }

    tracing::trace!("CSI dispatch: {:?} {:?}", command, params);

    match command {
        Command::CursorUp => handler.cursor_up(out, resolve!(params.int_or(0, 1)))?,
        Command::CursorDown => handler.cursor_down(out, resolve!(params.int_or(0, 1)))?,
        Command::CursorRight => handler.cursor_right(out, resolve!(params.int_or(0, 1)))?,
        Command::CursorLeft => handler.cursor_left(out, resolve!(params.int_or(0, 1)))?,
        Command::CursorDownLine => {
            handler.cursor_down_line(out, resolve!(params.int_or(0, 1)))?
        },
        Command::CursorUpLine => handler.cursor_up_line(out, resolve!(params.int_or(0, 1)))?,
        Command::CursorToColumn => {
            handler.cursor_to_column(out, resolve!(params.required_int(0)))?
        },
        Command::CursorTo => {
            let row = resolve!(params.int_or(0, 1));
            let column = resolve!(params.int_or(1, 1));
            handler.cursor_to(out, row, column)?;
        },
        Command::EraseScreen => handler.erase_screen(out, resolve!(params.int_or(0, 0)))?,
        Command::EraseLine => handler.erase_line(out, resolve!(params.int_or(0, 0)))?,
        Command::ScrollUp => handler.scroll_up(out, resolve!(params.int_or(0, 1)))?,
        Command::ScrollDown => handler.scroll_down(out, resolve!(params.int_or(0, 1)))?,
        Command::SelectGraphicRendition => {
            if !params.all_ints() {
                tracing::debug!("SGR with non-integer parameters: {:?}", params);
                return Ok(Dispatch::Unrecognized);
            }
            select_graphic_rendition(params, handler, out)?;
        },
        Command::SaveCursor => handler.save_cursor(out)?,
        Command::RestoreCursor => handler.restore_cursor(out)?,
        Command::Extension(byte) => handler.unknown_extension(out, params, byte)?,
    }

    Ok(Dispatch::Recognized)
}

/// Apply SGR values left to right. Expects every present parameter to be an
/// integer.
fn select_graphic_rendition<H>(
    params: &Params,
    handler: &mut H,
    out: &mut dyn Write,
) -> io::Result<()>
where
    H: AnsiHandler + ?Sized,
{
    let mut applied = 0usize;
    for value in params.iter().flatten().filter_map(Param::as_int) {
        applied += 1;
        match Rendition::from_value(value) {
            Rendition::Foreground(color) => handler.set_foreground_color(out, color)?,
            Rendition::Background(color) => handler.set_background_color(out, color)?,
            Rendition::Reset => handler.reset_attributes(out)?,
            Rendition::Attribute(attribute) => handler.set_attribute(out, attribute)?,
        }
    }

    if applied == 0 {
        handler.reset_attributes(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Operation, Recorder};

    fn run(final_byte: u8, values: Vec<Option<Param>>) -> (Dispatch, Vec<Operation>) {
        let params = Params::from_values(values);
        let mut recorder = Recorder::new();
        let mut out = Vec::new();
        let result = dispatch(&params, final_byte, &mut recorder, &mut out).unwrap();
        assert!(out.is_empty());
        (result, recorder.into_operations())
    }

    fn int(value: u32) -> Option<Param> {
        Some(Param::Int(value))
    }

    fn text(value: &str) -> Option<Param> {
        Some(Param::Text(value.to_string()))
    }

    #[test]
    fn test_cursor_movement_defaults() {
        assert_eq!(run(b'A', vec![]), (Dispatch::Recognized, vec![Operation::CursorUp(1)]));
        assert_eq!(run(b'B', vec![None]), (Dispatch::Recognized, vec![Operation::CursorDown(1)]));
        assert_eq!(run(b'C', vec![int(4)]), (Dispatch::Recognized, vec![Operation::CursorRight(4)]));
        assert_eq!(run(b'D', vec![int(0)]), (Dispatch::Recognized, vec![Operation::CursorLeft(0)]));
        assert_eq!(run(b'E', vec![]), (Dispatch::Recognized, vec![Operation::CursorDownLine(1)]));
    }

    #[test]
    fn test_cursor_up_line_does_not_fall_through() {
        let (result, operations) = run(b'F', vec![int(2)]);
        assert_eq!(result, Dispatch::Recognized);
        assert_eq!(operations, vec![Operation::CursorUpLine(2)]);
    }

    #[test]
    fn test_cursor_to_column_requires_parameter() {
        assert_eq!(run(b'G', vec![]), (Dispatch::Unrecognized, vec![]));
        assert_eq!(run(b'G', vec![None]), (Dispatch::Unrecognized, vec![]));
        assert_eq!(run(b'G', vec![text("7")]), (Dispatch::Unrecognized, vec![]));
        assert_eq!(run(b'G', vec![int(7)]), (Dispatch::Recognized, vec![Operation::CursorToColumn(7)]));
    }

    #[test]
    fn test_cursor_position() {
        assert_eq!(
            run(b'H', vec![]),
            (Dispatch::Recognized, vec![Operation::CursorTo { row: 1, column: 1 }])
        );
        assert_eq!(
            run(b'f', vec![None, int(9)]),
            (Dispatch::Recognized, vec![Operation::CursorTo { row: 1, column: 9 }])
        );
        assert_eq!(
            run(b'H', vec![int(5), int(10)]),
            (Dispatch::Recognized, vec![Operation::CursorTo { row: 5, column: 10 }])
        );
    }

    #[test]
    fn test_erase_modes_pass_through() {
        assert_eq!(run(b'J', vec![]), (Dispatch::Recognized, vec![Operation::EraseScreen(0)]));
        assert_eq!(run(b'J', vec![int(2)]), (Dispatch::Recognized, vec![Operation::EraseScreen(2)]));
        assert_eq!(run(b'K', vec![int(1)]), (Dispatch::Recognized, vec![Operation::EraseLine(1)]));
    }

    #[test]
    fn test_scroll() {
        assert_eq!(run(b'S', vec![]), (Dispatch::Recognized, vec![Operation::ScrollUp(1)]));
        assert_eq!(run(b'T', vec![int(3)]), (Dispatch::Recognized, vec![Operation::ScrollDown(3)]));
    }

    #[test]
    fn test_defaulted_parameter_rejects_text() {
        assert_eq!(run(b'A', vec![text("x")]), (Dispatch::Unrecognized, vec![]));
        assert_eq!(run(b'H', vec![int(1), text("x")]), (Dispatch::Unrecognized, vec![]));
    }

    #[test]
    fn test_sgr_empty_resets() {
        assert_eq!(run(b'm', vec![]), (Dispatch::Recognized, vec![Operation::ResetAttributes]));
        assert_eq!(
            run(b'm', vec![None, None]),
            (Dispatch::Recognized, vec![Operation::ResetAttributes])
        );
    }

    #[test]
    fn test_sgr_multiple_values_in_order() {
        let (result, operations) = run(b'm', vec![int(1), int(31), int(42)]);
        assert_eq!(result, Dispatch::Recognized);
        assert_eq!(
            operations,
            vec![
                Operation::SetAttribute(Attribute::INTENSITY_BOLD),
                Operation::SetForegroundColor(Color::Red),
                Operation::SetBackgroundColor(Color::Green),
            ]
        );
    }

    #[test]
    fn test_sgr_resets() {
        let (_, operations) = run(b'm', vec![int(0), int(39), int(49)]);
        assert_eq!(operations, vec![Operation::ResetAttributes; 3]);
    }

    #[test]
    fn test_sgr_other_values_are_attributes() {
        let (_, operations) = run(b'm', vec![int(38), int(90), int(4)]);
        assert_eq!(
            operations,
            vec![
                Operation::SetAttribute(Attribute(38)),
                Operation::SetAttribute(Attribute(90)),
                Operation::SetAttribute(Attribute::UNDERLINE),
            ]
        );
    }

    #[test]
    fn test_sgr_rejects_text_without_side_effects() {
        assert_eq!(run(b'm', vec![int(1), text("hi")]), (Dispatch::Unrecognized, vec![]));
    }

    #[test]
    fn test_save_restore_ignore_parameters() {
        assert_eq!(run(b's', vec![int(3)]), (Dispatch::Recognized, vec![Operation::SaveCursor]));
        assert_eq!(run(b'u', vec![]), (Dispatch::Recognized, vec![Operation::RestoreCursor]));
    }

    #[test]
    fn test_unknown_letters_go_to_extension() {
        for byte in [b'a', b'z', b'Q', b'Z', b'h', b'l'] {
            let (result, operations) = run(byte, vec![text("hi"), int(5)]);
            assert_eq!(result, Dispatch::Recognized);
            assert_eq!(
                operations,
                vec![Operation::UnknownExtension {
                    params: Params::from_values(vec![text("hi"), int(5)]),
                    command: byte,
                }]
            );
        }
    }

    #[test]
    fn test_non_letters_are_unrecognized() {
        for byte in [b'@', b'`', b'~', b'[', b'{', 0x1B, b' ', 0xC3] {
            assert_eq!(run(byte, vec![]), (Dispatch::Unrecognized, vec![]));
        }
    }

    #[test]
    fn test_rendition_mapping() {
        assert_eq!(Rendition::from_value(30), Rendition::Foreground(Color::Black));
        assert_eq!(Rendition::from_value(37), Rendition::Foreground(Color::White));
        assert_eq!(Rendition::from_value(40), Rendition::Background(Color::Black));
        assert_eq!(Rendition::from_value(47), Rendition::Background(Color::White));
        assert_eq!(Rendition::from_value(39), Rendition::Reset);
        assert_eq!(Rendition::from_value(48), Rendition::Attribute(Attribute(48)));
    }
}
