//! Named pen colors and their hex values.
//!
//! The notebook format stores ink color as a member of a fixed enumeration.
//! Excalidraw wants a CSS color, so every member maps to the hex code of the
//! closest HTML color name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScribeError;

/// A named pen color from the notebook palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenColor {
    /// Black ink.
    Black,
    /// White ink.
    White,
    /// Light gray ink.
    Gray,
    /// Red ink.
    Red,
    /// Green ink.
    Green,
    /// Blue ink.
    Blue,
    /// Yellow ink.
    Yellow,
    /// Pink ink.
    Pink,
    /// Dark gray used where strokes overlap.
    GrayOverlap,
    /// Second green swatch.
    #[serde(rename = "GREEN_2")]
    Green2,
    /// Cyan ink.
    Cyan,
    /// Magenta ink.
    Magenta,
    /// Highlighter color.
    Highlight,
    /// Second yellow swatch.
    #[serde(rename = "YELLOW_2")]
    Yellow2,
}

impl PenColor {
    /// Every palette entry, in enumeration order.
    pub const ALL: [Self; 14] = [
        Self::Black,
        Self::White,
        Self::Gray,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Pink,
        Self::GrayOverlap,
        Self::Green2,
        Self::Cyan,
        Self::Magenta,
        Self::Highlight,
        Self::Yellow2,
    ];

    /// Hex code used as the Excalidraw stroke color.
    // GREEN_2, YELLOW_2 and HIGHLIGHT reuse other entries' values; keep them
    // until the upstream enumeration settles.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Black | Self::Highlight => "#000000",
            Self::White => "#FFFFFF",
            Self::Gray => "#D3D3D3",
            Self::Red => "#FF0000",
            Self::Green | Self::Green2 => "#008000",
            Self::Blue => "#0000FF",
            Self::Yellow | Self::Yellow2 => "#FFFF00",
            Self::Pink => "#FFC0CB",
            Self::GrayOverlap => "#A9A9A9",
            Self::Cyan => "#00FFFF",
            Self::Magenta => "#EC008C",
        }
    }

    /// Upstream enumeration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "BLACK",
            Self::White => "WHITE",
            Self::Gray => "GRAY",
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
            Self::Pink => "PINK",
            Self::GrayOverlap => "GRAY_OVERLAP",
            Self::Green2 => "GREEN_2",
            Self::Cyan => "CYAN",
            Self::Magenta => "MAGENTA",
            Self::Highlight => "HIGHLIGHT",
            Self::Yellow2 => "YELLOW_2",
        }
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PenColor {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| ScribeError::UnknownColor {
                color: s.to_string(),
            })
    }
}
