//! Typed arguments for the graphic rendition hooks

use serde::{Deserialize, Serialize};

/// One of the eight basic ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Color for a palette index (0-7)
    pub fn from_index(index: u32) -> Option<Self> {
        let color = match index {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            7 => Color::White,
            _ => return None,
        };
        Some(color)
    }

    /// Palette index (0-7)
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// A raw SGR attribute value that is neither a color nor a reset
///
/// The associated constants name the values terminals commonly support;
/// anything else is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(pub u32);

impl Attribute {
    pub const INTENSITY_BOLD: Attribute = Attribute(1);
    /// Not widely supported
    pub const INTENSITY_FAINT: Attribute = Attribute(2);
    /// Sometimes rendered as inverse
    pub const ITALIC: Attribute = Attribute(3);
    pub const UNDERLINE: Attribute = Attribute(4);
    pub const BLINK_SLOW: Attribute = Attribute(5);
    pub const BLINK_FAST: Attribute = Attribute(6);
    /// Swap foreground and background
    pub const NEGATIVE_ON: Attribute = Attribute(7);
    pub const CONCEAL_ON: Attribute = Attribute(8);
    pub const UNDERLINE_DOUBLE: Attribute = Attribute(21);
    /// Neither bold nor faint
    pub const INTENSITY_NORMAL: Attribute = Attribute(22);
    pub const UNDERLINE_OFF: Attribute = Attribute(24);
    pub const BLINK_OFF: Attribute = Attribute(25);
    pub const NEGATIVE_OFF: Attribute = Attribute(27);
    pub const CONCEAL_OFF: Attribute = Attribute(28);

    /// Raw SGR value
    pub fn value(self) -> u32 {
        self.0
    }
}
