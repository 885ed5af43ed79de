//! Obsidian note output.
//!
//! The Excalidraw plugin for Obsidian stores drawings as markdown notes: a
//! front-matter block tagging the note as a drawing, the drawing's text for
//! search and backlinks, and the scene itself as a fenced JSON block hidden
//! inside `%%` comments.

use crate::{Document, ScribeError, ScribeResult};

/// Front-matter key/value the plugin looks for.
pub const PLUGIN_TAG: &str = "excalidraw-plugin: parsed";

const DRAWING_HEADING: &str = "# Drawing\n";
const FENCE_OPEN: &str = "```json\n";
const FENCE_CLOSE: &str = "\n```";

/// Render `document` as an Obsidian Excalidraw note.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn wrap(document: &Document) -> ScribeResult<String> {
    let drawing = document.to_json()?;
    let text_elements = document.texts().collect::<Vec<_>>().join("\n\n");

    Ok(format!(
        "---

{PLUGIN_TAG}
tags: [excalidraw]

---
==⚠  Switch to EXCALIDRAW VIEW in the MORE OPTIONS menu of this document. ⚠==


# Text Elements
{text_elements}

# Embedded files

%%
{DRAWING_HEADING}{FENCE_OPEN}{drawing}{FENCE_CLOSE}
%%"
    ))
}

/// Parse the drawing embedded in a note written by [`wrap`].
///
/// # Errors
///
/// Returns [`ScribeError::MissingDrawing`] if the note has no drawing block,
/// or a serialization error if the block is not a valid document.
pub fn extract_drawing(note: &str) -> ScribeResult<Document> {
    let after_heading = note
        .rfind(DRAWING_HEADING)
        .map(|at| &note[at + DRAWING_HEADING.len()..])
        .ok_or(ScribeError::MissingDrawing)?;
    let body = after_heading
        .strip_prefix(FENCE_OPEN)
        .ok_or(ScribeError::MissingDrawing)?;
    let end = body.rfind(FENCE_CLOSE).ok_or(ScribeError::MissingDrawing)?;

    Document::from_json(&body[..end])
}
