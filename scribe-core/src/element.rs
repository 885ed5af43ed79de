//! Excalidraw elements - the drawable units of an output document.
//!
//! Every element shares an [`ElementBase`] (position, identity, styling) and
//! adds kind-specific fields. On the wire the base is flattened into the
//! element object and the kind becomes the `type` field:
//!
//! ```json
//! { "type": "freedraw", "x": 10.0, "y": 10.0, "id": "…", "points": [[0.0, 0.0]], … }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Generator;

/// Default font size for text elements.
pub const DEFAULT_FONT_SIZE: u32 = 20;

/// Default line height, as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.25;

/// Excalidraw's hand-drawn font family.
pub const DEFAULT_FONT_FAMILY: u32 = 1;

/// Baseline offset Excalidraw uses for the default font at the default size.
pub const DEFAULT_BASELINE: u32 = 18;

/// Unique identifier for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outline style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

/// Fill pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    /// Diagonal sketch lines.
    #[default]
    Hachure,
    /// Crossed sketch lines.
    CrossHatch,
    /// Flat fill.
    Solid,
    /// Zigzag lines.
    Zigzag,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Fields shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Enclosing frame, if any.
    pub frame_id: Option<String>,
    /// Unique identifier.
    pub id: ElementId,
    /// Edit counter; higher wins when collaborators merge.
    pub version: u64,
    /// Seed for the hand-drawn renderer.
    pub seed: u32,
    /// Last update, in milliseconds since the Unix epoch.
    pub updated: u64,
    /// Tie-breaker for equal versions.
    pub version_nonce: u32,
    /// Rotation in radians.
    pub angle: f64,
    /// Sketchiness, 0 to 2.
    pub roughness: u8,
    /// Opacity, 0 to 100.
    pub opacity: u8,
    /// Outline width.
    pub stroke_width: u32,
    /// Outline style.
    pub stroke_style: StrokeStyle,
    /// Outline color as hex.
    pub stroke_color: String,
    /// Fill color as hex or `transparent`.
    pub background_color: String,
    /// Fill pattern.
    pub fill_style: FillStyle,
    /// Groups this element belongs to, innermost first.
    pub group_ids: Vec<String>,
    /// Corner rounding.
    pub roundness: Option<serde_json::Value>,
    /// Whether the element has been deleted.
    pub is_deleted: bool,
    /// Hyperlink.
    pub link: Option<String>,
    /// Whether the element is locked against editing.
    pub locked: bool,
    /// Elements bound to this one (arrows, labels).
    pub bound_elements: Option<Vec<serde_json::Value>>,
    /// Container this element is bound to.
    pub container_id: Option<String>,
}

impl ElementBase {
    /// Create a base with default styling at the origin.
    ///
    /// The id, seed, nonce and timestamp come from `generator`; `version`
    /// starts at 1 and is normally overwritten by the translator.
    #[must_use]
    pub fn new(generator: &mut impl Generator) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            frame_id: None,
            id: ElementId::new(generator.element_id()),
            version: 1,
            seed: generator.seed(),
            updated: generator.timestamp(),
            version_nonce: generator.seed(),
            angle: 0.0,
            roughness: 1,
            opacity: 100,
            stroke_width: 1,
            stroke_style: StrokeStyle::Solid,
            stroke_color: "#000000".to_string(),
            background_color: "transparent".to_string(),
            fill_style: FillStyle::Hachure,
            group_ids: Vec::new(),
            roundness: None,
            is_deleted: false,
            link: None,
            locked: false,
            bound_elements: None,
            container_id: None,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the stroke color.
    #[must_use]
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }
}

/// A freehand pen stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreedrawElement {
    /// Shared fields.
    #[serde(flatten)]
    pub base: ElementBase,
    /// Points relative to (`x`, `y`); the first is always `[0, 0]`.
    pub points: Vec<[f64; 2]>,
    /// Last point committed while drawing interactively.
    pub last_committed_point: Option<[f64; 2]>,
    /// Pen pressure per point.
    pub pressures: Vec<f64>,
    /// Whether the renderer should synthesize pressure from velocity.
    pub simulate_pressure: bool,
}

impl FreedrawElement {
    /// An empty stroke.
    #[must_use]
    pub fn new(base: ElementBase) -> Self {
        Self {
            base,
            points: Vec::new(),
            last_committed_point: None,
            pressures: Vec::new(),
            simulate_pressure: true,
        }
    }

    /// Replace the path from absolute points and their pressures.
    ///
    /// The first point becomes the element position and every point is
    /// stored relative to it. Width and height are set to the bounding box.
    /// An empty input leaves an empty stroke at its current position.
    pub fn set_path<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        self.points.clear();
        self.pressures.clear();

        let mut samples = samples.into_iter().peekable();
        if let Some(&(x, y, _)) = samples.peek() {
            self.base.x = x;
            self.base.y = y;
        }
        let (origin_x, origin_y) = (self.base.x, self.base.y);

        for (x, y, pressure) in samples {
            self.points.push([x - origin_x, y - origin_y]);
            self.pressures.push(pressure);
        }

        let (width, height) = self.extent();
        self.base.width = width;
        self.base.height = height;
        self.simulate_pressure = self.pressures.is_empty();
    }

    /// Size of the bounding box around the relative points.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let Some(first) = self.points.first() else {
            return (0.0, 0.0);
        };
        let (min, max) = self.points.iter().fold((*first, *first), |(min, max), p| {
            (
                [min[0].min(p[0]), min[1].min(p[1])],
                [max[0].max(p[0]), max[1].max(p[1])],
            )
        });
        (max[0] - min[0], max[1] - min[1])
    }
}

/// A block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    base: ElementBase,
    text: String,
    /// Text before wrapping; identical to `text` here.
    original_text: String,
    font_size: u32,
    line_height: f64,
    /// Font family id.
    pub font_family: u32,
    /// Horizontal alignment.
    pub text_align: TextAlign,
    /// Vertical alignment.
    pub vertical_align: VerticalAlign,
    /// Distance from the top to the first baseline.
    pub baseline: u32,
}

impl TextElement {
    /// Create a text element with default typography.
    ///
    /// The height is derived from the text; see [`TextElement::set_text`].
    #[must_use]
    pub fn new(base: ElementBase, text: impl Into<String>) -> Self {
        let mut element = Self {
            base,
            text: String::new(),
            original_text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            font_family: DEFAULT_FONT_FAMILY,
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            baseline: DEFAULT_BASELINE,
        };
        element.set_text(text);
        element
    }

    /// Replace the text and recompute the height.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.original_text.clone_from(&self.text);
        self.base.height = self.derived_height();
    }

    /// Shared fields. The height always matches [`TextElement::derived_height`].
    #[must_use]
    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    /// Displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text before wrapping.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Font size in pixels.
    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Line height as a multiple of the font size.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Number of lines in the text, never less than one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    /// Height implied by font size, line height and line count, rounded.
    #[must_use]
    pub fn derived_height(&self) -> f64 {
        let lines = u32::try_from(self.line_count()).unwrap_or(u32::MAX);
        (f64::from(self.font_size) * self.line_height * f64::from(lines)).round_ties_even()
    }
}

/// An element in an Excalidraw document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A freehand stroke.
    Freedraw(FreedrawElement),
    /// A text block.
    Text(TextElement),
}

impl Element {
    /// Shared fields.
    #[must_use]
    pub fn base(&self) -> &ElementBase {
        match self {
            Self::Freedraw(e) => &e.base,
            Self::Text(e) => &e.base,
        }
    }

    /// Mutable shared fields.
    pub(crate) fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Self::Freedraw(e) => &mut e.base,
            Self::Text(e) => &mut e.base,
        }
    }

    /// The element id.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.base().id
    }

    /// The element version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.base().version
    }

    /// The Excalidraw `type` name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Freedraw(_) => "freedraw",
            Self::Text(_) => "text",
        }
    }

    /// The text content, for text elements.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(e) => Some(&e.text),
            Self::Freedraw(_) => None,
        }
    }
}

impl From<FreedrawElement> for Element {
    fn from(element: FreedrawElement) -> Self {
        Self::Freedraw(element)
    }
}

impl From<TextElement> for Element {
    fn from(element: TextElement) -> Self {
        Self::Text(element)
    }
}
