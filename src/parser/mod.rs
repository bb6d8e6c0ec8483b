//! Control sequence scanner
//!
//! A byte-at-a-time state machine that forwards plain text, collects
//! `ESC [` sequences with their parameters and dispatches each completed
//! sequence to an [`AnsiHandler`](crate::handler::AnsiHandler).

mod dispatch;
mod params;
mod state;

pub use dispatch::{dispatch, Command, Dispatch};
pub use params::{Param, Params};
pub use state::{
    ScanState, Scanner, DEFAULT_MAX_SEQUENCE_LEN, ESC, MAX_SEQUENCE_LEN, MIN_SEQUENCE_LEN,
};
