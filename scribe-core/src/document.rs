//! The Excalidraw document produced by translation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Element, Generator, ScribeResult};

/// Value of the document `type` field.
pub const DOCUMENT_TYPE: &str = "excalidraw";

/// Excalidraw schema version written by this crate.
pub const DOCUMENT_VERSION: u32 = 2;

/// Value of the document `source` field.
pub const DOCUMENT_SOURCE: &str = concat!("scribe-core/", env!("CARGO_PKG_VERSION"));

/// Editor state stored alongside the elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Grid spacing; `None` disables the grid.
    pub grid_size: Option<u32>,
    /// Canvas background color.
    pub view_background_color: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            grid_size: None,
            view_background_color: "#ffffff".to_string(),
        }
    }
}

/// A binary asset embedded in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File id; also the key in [`Document::files`].
    pub id: String,
    /// MIME type of the data.
    pub mime_type: String,
    /// The content as a `data:` URL.
    #[serde(rename = "dataURL")]
    pub data_url: String,
    /// Creation time, ms since epoch.
    pub created: u64,
    /// Last access time, ms since epoch.
    pub last_retrieved: u64,
}

impl FileRecord {
    /// Create a record with a fresh id, stamped with the current time.
    #[must_use]
    pub fn new(
        generator: &mut impl Generator,
        mime_type: impl Into<String>,
        data_url: impl Into<String>,
    ) -> Self {
        let now = generator.timestamp();
        Self {
            id: generator.file_id(),
            mime_type: mime_type.into(),
            data_url: data_url.into(),
            created: now,
            last_retrieved: now,
        }
    }
}

/// An Excalidraw document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Always [`DOCUMENT_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Schema version.
    pub version: u32,
    /// Producer of the document.
    pub source: String,
    /// Elements in paint order.
    pub elements: Vec<Element>,
    /// Editor state.
    pub app_state: AppState,
    /// Embedded files by id.
    #[serde(default)]
    pub files: BTreeMap<String, FileRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: DOCUMENT_TYPE.to_string(),
            version: DOCUMENT_VERSION,
            source: DOCUMENT_SOURCE.to_string(),
            elements: Vec::new(),
            app_state: AppState::default(),
            files: BTreeMap::new(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Embed a file, keyed by its id. Returns the id.
    pub fn add_file(&mut self, file: FileRecord) -> String {
        let id = file.id.clone();
        self.files.insert(id.clone(), file);
        id
    }

    /// Text of every text element, in element order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::text)
    }

    /// Get the number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize to pretty JSON with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ScribeResult<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> ScribeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
