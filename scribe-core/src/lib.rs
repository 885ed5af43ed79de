//! # Scribe Core
//!
//! Converts notebook scene blocks into an Excalidraw document and wraps
//! that document into an Obsidian note.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────┐    ┌──────────────┐
//! │  [Block]     │ -> │  Translator       │ -> │  Document    │
//! │  - strokes   │    │  - stroke mapper  │    │  - elements  │
//! │  - text runs │    │  - text mapper    │    │  - appState  │
//! │  - (others)  │    │  - version clock  │    │  - files     │
//! └──────────────┘    └───────────────────┘    └──────┬───────┘
//!                                                     │
//!                                              ┌──────▼───────┐
//!                                              │  Note (wrap) │
//!                                              └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use scribe_core::{obsidian, Block, FixedGenerator, Translator};
//!
//! let blocks: Vec<Block> = serde_json::from_str(
//!     r#"[{"type": "RootTextBlock",
//!          "value": {"items": {"0": "Hello"}, "pos_x": 0.0, "pos_y": 0.0, "width": 100.0}}]"#,
//! )
//! .unwrap();
//!
//! let document = Translator::new(FixedGenerator::default())
//!     .translate(&blocks)
//!     .into_document();
//! let note = obsidian::wrap(&document).unwrap();
//! assert!(note.contains("excalidraw-plugin: parsed"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod block;
pub mod document;
pub mod element;
pub mod error;
pub mod generator;
pub mod obsidian;
pub mod palette;
pub mod translate;

pub use block::{Block, BlockKind, Line, LineItemBlock, PenTool, Point, RootTextBlock, Text};
pub use document::{AppState, Document, FileRecord};
pub use element::{
    Element, ElementBase, ElementId, FillStyle, FreedrawElement, StrokeStyle, TextAlign,
    TextElement, VerticalAlign,
};
pub use error::{ScribeError, ScribeResult};
pub use generator::{FixedGenerator, Generator, RandomGenerator};
pub use palette::PenColor;
pub use translate::{translate, BlockFailure, Translation, Translator};

/// Scribe core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
