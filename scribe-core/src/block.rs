//! Input blocks from the notebook scene format.
//!
//! Blocks arrive already parsed from the binary notebook format. Only two
//! kinds carry content this crate converts: stroke items
//! ([`Block::SceneLineItem`]) and the page's root text ([`Block::RootText`]).
//! The remaining kinds are structural and are accepted so that a whole page
//! can be passed through unfiltered.
//!
//! ## Example JSON
//!
//! ```json
//! [
//!   { "type": "PageInfoBlock" },
//!   {
//!     "type": "SceneLineItemBlock",
//!     "value": {
//!       "tool": "BALLPOINT_2",
//!       "color": "RED",
//!       "points": [{ "x": 10.0, "y": 10.0, "pressure": 0.5 }]
//!     }
//!   },
//!   {
//!     "type": "RootTextBlock",
//!     "value": { "items": { "0": "Hello" }, "pos_x": -468.0, "pos_y": 234.0, "width": 936.0 }
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A block from the notebook scene, tagged by its upstream kind name.
///
/// Kinds this crate does not know are kept as [`Block::Other`] with their
/// tag so a page always parses, whatever newer block types it contains.
/// Deserialization needs a self-describing format such as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A single pen or eraser stroke.
    SceneLineItem(LineItemBlock),

    /// The page's text layer.
    RootText(RootTextBlock),

    /// Author id table.
    AuthorIds {},

    /// Format migration metadata.
    MigrationInfo {},

    /// Page statistics.
    PageInfo {},

    /// Scene tree declaration.
    SceneTree {},

    /// Scene tree node (layer).
    TreeNode {},

    /// Group membership item.
    SceneGroupItem {},

    /// Any other block kind, such as glyph highlights or tombstones.
    Other {
        /// The block's `type` tag.
        kind: String,
    },
}

impl Block {
    /// The kind tag of this block.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::SceneLineItem(_) => BlockKind::SceneLineItem,
            Self::RootText(_) => BlockKind::RootText,
            Self::AuthorIds {} => BlockKind::AuthorIds,
            Self::MigrationInfo {} => BlockKind::MigrationInfo,
            Self::PageInfo {} => BlockKind::PageInfo,
            Self::SceneTree {} => BlockKind::SceneTree,
            Self::TreeNode {} => BlockKind::TreeNode,
            Self::SceneGroupItem {} => BlockKind::SceneGroupItem,
            Self::Other { kind } => BlockKind::Other(kind.clone()),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T: Serialize> {
            #[serde(rename = "type")]
            kind: &'a str,
            #[serde(flatten)]
            body: &'a T,
        }

        #[derive(Serialize)]
        struct Empty {}

        let kind = self.kind();
        match self {
            Self::SceneLineItem(body) => Tagged { kind: kind.name(), body }.serialize(serializer),
            Self::RootText(body) => Tagged { kind: kind.name(), body }.serialize(serializer),
            _ => Tagged {
                kind: kind.name(),
                body: &Empty {},
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(BlockKind::from_name)
            .ok_or_else(|| D::Error::missing_field("type"))?;

        let block: Result<Self, serde_json::Error> = match kind {
            BlockKind::SceneLineItem => LineItemBlock::deserialize(value).map(Self::SceneLineItem),
            BlockKind::RootText => RootTextBlock::deserialize(value).map(Self::RootText),
            BlockKind::AuthorIds => Ok(Self::AuthorIds {}),
            BlockKind::MigrationInfo => Ok(Self::MigrationInfo {}),
            BlockKind::PageInfo => Ok(Self::PageInfo {}),
            BlockKind::SceneTree => Ok(Self::SceneTree {}),
            BlockKind::TreeNode => Ok(Self::TreeNode {}),
            BlockKind::SceneGroupItem => Ok(Self::SceneGroupItem {}),
            BlockKind::Other(kind) => Ok(Self::Other { kind }),
        };
        block.map_err(D::Error::custom)
    }
}

impl From<LineItemBlock> for Block {
    fn from(block: LineItemBlock) -> Self {
        Self::SceneLineItem(block)
    }
}

impl From<RootTextBlock> for Block {
    fn from(block: RootTextBlock) -> Self {
        Self::RootText(block)
    }
}

/// Discriminant of [`Block`], used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// See [`Block::SceneLineItem`].
    SceneLineItem,
    /// See [`Block::RootText`].
    RootText,
    /// See [`Block::AuthorIds`].
    AuthorIds,
    /// See [`Block::MigrationInfo`].
    MigrationInfo,
    /// See [`Block::PageInfo`].
    PageInfo,
    /// See [`Block::SceneTree`].
    SceneTree,
    /// See [`Block::TreeNode`].
    TreeNode,
    /// See [`Block::SceneGroupItem`].
    SceneGroupItem,
    /// See [`Block::Other`]; carries the upstream name.
    Other(String),
}

impl BlockKind {
    /// Look up a kind by its upstream name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "SceneLineItemBlock" => Self::SceneLineItem,
            "RootTextBlock" => Self::RootText,
            "AuthorIdsBlock" => Self::AuthorIds,
            "MigrationInfoBlock" => Self::MigrationInfo,
            "PageInfoBlock" => Self::PageInfo,
            "SceneTreeBlock" => Self::SceneTree,
            "TreeNodeBlock" => Self::TreeNode,
            "SceneGroupItemBlock" => Self::SceneGroupItem,
            other => Self::Other(other.to_string()),
        }
    }

    /// Upstream name of the block kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SceneLineItem => "SceneLineItemBlock",
            Self::RootText => "RootTextBlock",
            Self::AuthorIds => "AuthorIdsBlock",
            Self::MigrationInfo => "MigrationInfoBlock",
            Self::PageInfo => "PageInfoBlock",
            Self::SceneTree => "SceneTreeBlock",
            Self::TreeNode => "TreeNodeBlock",
            Self::SceneGroupItem => "SceneGroupItemBlock",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stroke item. The value is absent when the stroke was deleted upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemBlock {
    /// The stroke, if any.
    #[serde(default)]
    pub value: Option<Line>,
}

impl LineItemBlock {
    /// Wrap a stroke.
    #[must_use]
    pub fn new(line: Line) -> Self {
        Self { value: Some(line) }
    }

    /// A stroke item without a value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A recorded pen stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The tool that drew the stroke.
    pub tool: PenTool,
    /// Palette color name (e.g. `"RED"`). Kept as text so that names newer
    /// than [`crate::PenColor`] are reported instead of rejected on input.
    pub color: String,
    /// Points in drawing order.
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Line {
    /// Create a stroke.
    #[must_use]
    pub fn new(tool: PenTool, color: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            tool,
            color: color.into(),
            points,
        }
    }
}

/// A sampled stroke point in absolute page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Pen pressure, 0.0 to 1.0.
    pub pressure: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }
}

/// Pen tools known to the notebook format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum PenTool {
    #[serde(rename = "PAINTBRUSH_1")]
    Paintbrush1,
    #[serde(rename = "PENCIL_1")]
    Pencil1,
    #[serde(rename = "BALLPOINT_1")]
    Ballpoint1,
    #[serde(rename = "MARKER_1")]
    Marker1,
    #[serde(rename = "FINELINER_1")]
    Fineliner1,
    #[serde(rename = "HIGHLIGHTER_1")]
    Highlighter1,
    Eraser,
    #[serde(rename = "MECHANICAL_PENCIL_1")]
    MechanicalPencil1,
    EraserArea,
    #[serde(rename = "PAINTBRUSH_2")]
    Paintbrush2,
    #[serde(rename = "MECHANICAL_PENCIL_2")]
    MechanicalPencil2,
    #[serde(rename = "PENCIL_2")]
    Pencil2,
    #[serde(rename = "BALLPOINT_2")]
    Ballpoint2,
    #[serde(rename = "MARKER_2")]
    Marker2,
    #[serde(rename = "FINELINER_2")]
    Fineliner2,
    #[serde(rename = "HIGHLIGHTER_2")]
    Highlighter2,
    Caligraphy,
    Shader,
}

impl PenTool {
    /// Whether strokes from this tool erase ink.
    ///
    /// Only the stroke eraser qualifies; area-erase selections are not ink.
    #[must_use]
    pub const fn is_eraser(self) -> bool {
        matches!(self, Self::Eraser)
    }
}

/// The page's text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootTextBlock {
    /// Text content and placement.
    pub value: Text,
}

impl RootTextBlock {
    /// Wrap a text value.
    #[must_use]
    pub fn new(value: Text) -> Self {
        Self { value }
    }
}

/// Text fragments with placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Fragments keyed by their offset id; iteration order is text order.
    #[serde(default, deserialize_with = "fragment_map")]
    pub items: BTreeMap<u64, String>,
    /// Left edge, relative to the page's horizontal center.
    pub pos_x: f64,
    /// Top edge.
    pub pos_y: f64,
    /// Layout width.
    pub width: f64,
}

impl Text {
    /// Build a text value from fragments.
    #[must_use]
    pub fn new<I, S>(items: I, pos_x: f64, pos_y: f64, width: f64) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(k, v)| (k, v.into())).collect(),
            pos_x,
            pos_y,
            width,
        }
    }

    /// All fragments concatenated in key order.
    #[must_use]
    pub fn joined(&self) -> String {
        self.items.values().map(String::as_str).collect()
    }
}

/// JSON object keys are always strings, and the buffering done by tagged
/// enums keeps them that way, so numeric fragment ids are parsed here.
fn fragment_map<'de, D>(deserializer: D) -> Result<BTreeMap<u64, String>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, String>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, fragment)| {
            key.trim()
                .parse::<u64>()
                .map(|id| (id, fragment))
                .map_err(|_| D::Error::custom(format!("invalid text fragment id: {key:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stroke_block() {
        let json = r#"{
            "type": "SceneLineItemBlock",
            "value": {
                "tool": "ERASER",
                "color": "BLUE",
                "points": [{"x": 1.5, "y": 2.0, "pressure": 0.25}]
            }
        }"#;

        let block: Block = serde_json::from_str(json).expect("should parse");
        match block {
            Block::SceneLineItem(LineItemBlock { value: Some(line) }) => {
                assert_eq!(line.tool, PenTool::Eraser);
                assert!(line.tool.is_eraser());
                assert_eq!(line.color, "BLUE");
                assert_eq!(line.points, vec![Point::new(1.5, 2.0, 0.25)]);
            }
            other => panic!("Expected stroke block, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_null_stroke_value() {
        let block: Block =
            serde_json::from_str(r#"{"type": "SceneLineItemBlock", "value": null}"#)
                .expect("should parse");
        assert_eq!(block, Block::SceneLineItem(LineItemBlock::empty()));

        let block: Block =
            serde_json::from_str(r#"{"type": "SceneLineItemBlock"}"#).expect("should parse");
        assert_eq!(block, Block::SceneLineItem(LineItemBlock::empty()));
    }

    #[test]
    fn test_parse_text_block_orders_numeric_keys() {
        let json = r#"{
            "type": "RootTextBlock",
            "value": {
                "items": {"10": "c", "2": "b", "1": "a"},
                "pos_x": 0.0, "pos_y": 0.0, "width": 10.0
            }
        }"#;

        let block: Block = serde_json::from_str(json).expect("should parse");
        match block {
            Block::RootText(text) => assert_eq!(text.value.joined(), "abc"),
            other => panic!("Expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_text_fragment_ids_must_be_numeric() {
        let json = r#"{
            "type": "RootTextBlock",
            "value": {"items": {"abc": "x"}, "pos_x": 0.0, "pos_y": 0.0, "width": 1.0}
        }"#;
        let err = serde_json::from_str::<Block>(json).expect_err("non-numeric id");
        assert!(err.to_string().contains("invalid text fragment id"));
    }

    #[test]
    fn test_structural_blocks_ignore_payload() {
        let json = r#"{"type": "PageInfoBlock", "loads_count": 3, "merges_count": 1}"#;
        let block: Block = serde_json::from_str(json).expect("should parse");
        assert_eq!(block.kind(), BlockKind::PageInfo);
        assert_eq!(block.kind().to_string(), "PageInfoBlock");
    }

    #[test]
    fn test_unknown_kind_keeps_its_name() {
        let json = r#"{"type": "SceneGlyphItemBlock", "value": {"start": 0, "length": 4}}"#;
        let block: Block = serde_json::from_str(json).expect("should parse");

        assert_eq!(
            block,
            Block::Other {
                kind: "SceneGlyphItemBlock".to_string()
            }
        );
        assert_eq!(block.kind().name(), "SceneGlyphItemBlock");
        assert_eq!(
            serde_json::to_value(&block).expect("serialize"),
            serde_json::json!({"type": "SceneGlyphItemBlock"})
        );
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let err = serde_json::from_str::<Block>(r#"{"value": null}"#).expect_err("untagged");
        assert!(err.to_string().contains("type"), "{err}");
    }

    #[test]
    fn test_known_block_serializes_with_tag() {
        let block = Block::from(RootTextBlock::new(Text::new([(3, "hi")], 1.0, 2.0, 3.0)));
        let value = serde_json::to_value(&block).expect("serialize");

        assert_eq!(value["type"], "RootTextBlock");
        assert_eq!(value["value"]["items"]["3"], "hi");
        let back: Block = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, block);
    }

    #[test]
    fn test_malformed_known_block_is_an_error() {
        let json = r#"{"type": "RootTextBlock", "value": {"items": {}}}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_area_eraser_is_not_stroke_eraser() {
        assert!(!PenTool::EraserArea.is_eraser());
        assert!(!PenTool::Ballpoint1.is_eraser());
    }

    #[test]
    fn test_tool_names() {
        let tool: PenTool = serde_json::from_str("\"MECHANICAL_PENCIL_2\"").expect("parse");
        assert_eq!(tool, PenTool::MechanicalPencil2);
        let tool: PenTool = serde_json::from_str("\"ERASER_AREA\"").expect("parse");
        assert_eq!(tool, PenTool::EraserArea);
    }
}
