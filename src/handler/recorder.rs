//! Hook recorder
//!
//! Captures every hook invocation as an [`Operation`] value, in call order.
//! [`Recorder`] keeps them for inspection; [`OperationLog`] hands each one to
//! a callback as it happens, which is what `ansi-strip --operations` uses.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::{AnsiHandler, Attribute, Color};
use crate::parser::Params;

/// One semantic operation as delivered to a handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    CursorUp(u32),
    CursorDown(u32),
    CursorRight(u32),
    CursorLeft(u32),
    CursorDownLine(u32),
    CursorUpLine(u32),
    CursorToColumn(u32),
    CursorTo {
        row: u32,
        column: u32,
    },
    EraseScreen(u32),
    EraseLine(u32),
    ScrollUp(u32),
    ScrollDown(u32),
    SetForegroundColor(Color),
    SetBackgroundColor(Color),
    SetAttribute(Attribute),
    ResetAttributes,
    SaveCursor,
    RestoreCursor,
    UnknownExtension {
        params: Params,
        /// Final byte of the sequence
        command: u8,
    },
}

impl Operation {
    /// Check if this moves the cursor
    pub fn is_cursor_movement(&self) -> bool {
        matches!(
            self,
            Operation::CursorUp(_)
                | Operation::CursorDown(_)
                | Operation::CursorRight(_)
                | Operation::CursorLeft(_)
                | Operation::CursorDownLine(_)
                | Operation::CursorUpLine(_)
                | Operation::CursorToColumn(_)
                | Operation::CursorTo { .. }
                | Operation::RestoreCursor
        )
    }

    /// Check if this came from a graphic rendition sequence
    pub fn is_rendition(&self) -> bool {
        matches!(
            self,
            Operation::SetForegroundColor(_)
                | Operation::SetBackgroundColor(_)
                | Operation::SetAttribute(_)
                | Operation::ResetAttributes
        )
    }
}

/// Handler that records operations instead of performing them
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    operations: Vec<Operation>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded so far
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Take the recorded operations, leaving the recorder empty
    pub fn take(&mut self) -> Vec<Operation> {
        std::mem::take(&mut self.operations)
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    fn record(&mut self, operation: Operation) -> io::Result<()> {
        self.operations.push(operation);
        Ok(())
    }
}

/// Expands to every [`AnsiHandler`] hook, each passing its [`Operation`] to
/// `self.record`
macro_rules! record_hooks {
    () => {
        fn cursor_up(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorUp(count))
        }

        fn cursor_down(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorDown(count))
        }

        fn cursor_right(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorRight(count))
        }

        fn cursor_left(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorLeft(count))
        }

        fn cursor_down_line(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorDownLine(count))
        }

        fn cursor_up_line(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::CursorUpLine(count))
        }

        fn cursor_to_column(&mut self, _out: &mut dyn Write, column: u32) -> io::Result<()> {
            self.record(Operation::CursorToColumn(column))
        }

        fn cursor_to(&mut self, _out: &mut dyn Write, row: u32, column: u32) -> io::Result<()> {
            self.record(Operation::CursorTo { row, column })
        }

        fn erase_screen(&mut self, _out: &mut dyn Write, mode: u32) -> io::Result<()> {
            self.record(Operation::EraseScreen(mode))
        }

        fn erase_line(&mut self, _out: &mut dyn Write, mode: u32) -> io::Result<()> {
            self.record(Operation::EraseLine(mode))
        }

        fn scroll_up(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::ScrollUp(count))
        }

        fn scroll_down(&mut self, _out: &mut dyn Write, count: u32) -> io::Result<()> {
            self.record(Operation::ScrollDown(count))
        }

        fn set_foreground_color(&mut self, _out: &mut dyn Write, color: Color) -> io::Result<()> {
            self.record(Operation::SetForegroundColor(color))
        }

        fn set_background_color(&mut self, _out: &mut dyn Write, color: Color) -> io::Result<()> {
            self.record(Operation::SetBackgroundColor(color))
        }

        fn set_attribute(&mut self, _out: &mut dyn Write, attribute: Attribute) -> io::Result<()> {
            self.record(Operation::SetAttribute(attribute))
        }

        fn reset_attributes(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.record(Operation::ResetAttributes)
        }

        fn save_cursor(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.record(Operation::SaveCursor)
        }

        fn restore_cursor(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.record(Operation::RestoreCursor)
        }

        fn unknown_extension(
            &mut self,
            _out: &mut dyn Write,
            params: &Params,
            command: u8,
        ) -> io::Result<()> {
            self.record(Operation::UnknownExtension {
                params: params.clone(),
                command,
            })
        }
    };
}

impl AnsiHandler for Recorder {
    record_hooks!();
}

/// Handler that passes each operation to a callback as soon as it is decoded
///
/// Unlike [`Recorder`], nothing is retained, so memory stays flat on
/// unbounded input.
///
/// ```
/// use std::io::Write;
/// use ansi_filter::{AnsiOutputStream, Operation, OperationLog};
///
/// let mut lines = Vec::new();
/// let log = OperationLog::new(|operation: Operation| {
///     lines.push(format!("{:?}", operation));
///     Ok(())
/// });
/// let mut stream = AnsiOutputStream::new(Vec::new(), log);
/// stream.write_all(b"\x1b[2Aup").unwrap();
/// let (out, _) = stream.finish().unwrap();
///
/// assert_eq!(out, b"up");
/// assert_eq!(lines, vec!["CursorUp(2)"]);
/// ```
pub struct OperationLog<F> {
    emit: F,
}

impl<F> OperationLog<F>
where
    F: FnMut(Operation) -> io::Result<()>,
{
    pub fn new(emit: F) -> Self {
        Self { emit }
    }

    fn record(&mut self, operation: Operation) -> io::Result<()> {
        (self.emit)(operation)
    }
}

impl<F> AnsiHandler for OperationLog<F>
where
    F: FnMut(Operation) -> io::Result<()>,
{
    record_hooks!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Param;

    #[test]
    fn test_operation_kinds() {
        assert!(Operation::CursorTo { row: 1, column: 1 }.is_cursor_movement());
        assert!(Operation::RestoreCursor.is_cursor_movement());
        assert!(!Operation::EraseLine(0).is_cursor_movement());
        assert!(Operation::SetAttribute(Attribute::UNDERLINE).is_rendition());
        assert!(Operation::ResetAttributes.is_rendition());
        assert!(!Operation::SaveCursor.is_rendition());
    }

    #[test]
    fn test_recorder_take_empties() {
        let mut recorder = Recorder::new();
        let mut sink = Vec::new();
        recorder.cursor_up(&mut sink, 2).unwrap();
        recorder.reset_attributes(&mut sink).unwrap();

        assert_eq!(
            recorder.take(),
            vec![Operation::CursorUp(2), Operation::ResetAttributes]
        );
        assert!(recorder.operations().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_operation_log_emits_in_order() {
        let mut seen = Vec::new();
        let mut log = OperationLog::new(|operation| {
            seen.push(operation);
            Ok(())
        });
        let mut sink = Vec::new();
        log.cursor_to(&mut sink, 3, 4).unwrap();
        log.set_foreground_color(&mut sink, Color::Cyan).unwrap();
        drop(log);

        assert_eq!(
            seen,
            vec![
                Operation::CursorTo { row: 3, column: 4 },
                Operation::SetForegroundColor(Color::Cyan),
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_operation_log_error_propagates() {
        let mut log = OperationLog::new(|_| Err(io::Error::new(io::ErrorKind::Other, "closed")));
        let err = log.save_cursor(&mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "closed");
    }

    #[test]
    fn test_operation_serialization() {
        let operation = Operation::UnknownExtension {
            params: Params::from_values(vec![Some(Param::Text("hi".to_string())), None]),
            command: b'x',
        };

        let json = serde_json::to_string(&operation).unwrap();
        let restored: Operation = serde_json::from_str(&json).unwrap();

        assert_eq!(operation, restored);
    }
}
