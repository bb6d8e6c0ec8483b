//! ANSI Filter Library
//!
//! A streaming filter that separates terminal control sequences from plain
//! output. Bytes written to an [`AnsiOutputStream`] reach the wrapped sink
//! unchanged, except for `ESC [` control sequences (cursor movement, erase,
//! scroll, save/restore cursor, graphic rendition), which are decoded and
//! handed to an [`AnsiHandler`] instead.
//!
//! - `parser`: byte scanner, parameter decoding and command dispatch
//! - `handler`: the semantic operation hooks and ready-made handlers
//! - `stream`: the `std::io::Write` adapter tying them to a sink
//! - `config`: buffer limits
//!
//! ```
//! use std::io::Write;
//! use ansi_filter::{AnsiOutputStream, Operation, Recorder};
//!
//! let mut stream = AnsiOutputStream::new(Vec::new(), Recorder::new());
//! stream.write_all(b"\x1b[1;31mError\x1b[0m").unwrap();
//! let (out, recorder) = stream.finish().unwrap();
//!
//! assert_eq!(out, b"Error");
//! assert_eq!(recorder.operations().len(), 3);
//! assert_eq!(recorder.operations()[2], Operation::ResetAttributes);
//! ```

pub mod config;
pub mod handler;
pub mod parser;
pub mod stream;

pub use config::{ConfigError, FilterConfig};
pub use handler::{
    AnsiHandler, Attribute, Color, Discard, Operation, OperationLog, Recorder, TextFallback,
};
pub use parser::{Param, Params, ScanState, Scanner};
pub use stream::AnsiOutputStream;
