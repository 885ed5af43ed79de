//! Block translation.
//!
//! Walks a page's blocks in order and maps each supported one to an
//! Excalidraw element:
//!
//! | Block                | Element    | Notes                                  |
//! |----------------------|------------|----------------------------------------|
//! | `SceneLineItemBlock` | `freedraw` | eraser strokes are kept, marked deleted |
//! | `RootTextBlock`      | `text`     | shifted right by half a page width     |
//! | anything else        | –          | skipped with a warning naming the kind |
//!
//! A block that fails to map is recorded in [`Translation::failures`] and
//! does not stop the remaining blocks.

use std::str::FromStr;

use crate::{
    Block, BlockKind, Document, Element, ElementBase, FreedrawElement, Generator, LineItemBlock,
    PenColor, RandomGenerator, RootTextBlock, ScribeError, ScribeResult, TextElement,
};

/// Page width of the notebook, in notebook units.
pub const SCREEN_WIDTH: f64 = 1404.0;

/// Horizontal shift applied to text. Text positions are relative to the page
/// center while strokes are absolute.
pub const XPOS_SHIFT: f64 = SCREEN_WIDTH / 2.0;

/// A block that could not be converted.
#[derive(Debug)]
pub struct BlockFailure {
    /// Position of the block in the input.
    pub index: usize,
    /// Kind of the block.
    pub kind: BlockKind,
    /// Why it failed.
    pub error: ScribeError,
}

impl From<BlockFailure> for ScribeError {
    fn from(failure: BlockFailure) -> Self {
        Self::Block {
            index: failure.index,
            kind: failure.kind.to_string(),
            source: Box::new(failure.error),
        }
    }
}

/// Result of translating a sequence of blocks.
#[derive(Debug)]
pub struct Translation {
    /// The converted document.
    pub document: Document,
    /// Blocks that were dropped because they failed to convert.
    pub failures: Vec<BlockFailure>,
    /// Number of blocks skipped because their kind is not converted.
    pub skipped: usize,
}

impl Translation {
    /// Whether every block converted or was deliberately skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The document, discarding failures.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// The document, or the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Block`] if any block failed to convert.
    pub fn into_result(self) -> ScribeResult<Document> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.into()),
            None => Ok(self.document),
        }
    }
}

/// Translate blocks with a randomly seeded [`RandomGenerator`].
#[must_use]
pub fn translate<'a, I>(blocks: I) -> Translation
where
    I: IntoIterator<Item = &'a Block>,
{
    Translator::new(RandomGenerator::new()).translate(blocks)
}

/// Converts blocks to Excalidraw elements.
#[derive(Debug, Clone)]
pub struct Translator<G> {
    generator: G,
}

impl<G: Generator> Translator<G> {
    /// Create a translator drawing ids and seeds from `generator`.
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Translate blocks into a new document.
    ///
    /// Element versions count up from the generator's initial version, one
    /// step per input block, so they strictly increase along `elements`.
    pub fn translate<'a, I>(&mut self, blocks: I) -> Translation
    where
        I: IntoIterator<Item = &'a Block>,
    {
        let mut document = Document::new();
        let mut failures = Vec::new();
        let mut skipped = 0;
        let mut version = self.generator.initial_version();

        for (index, block) in blocks.into_iter().enumerate() {
            version = version.saturating_add(1);
            let kind = block.kind();

            let mapped: ScribeResult<Element> = match block {
                Block::SceneLineItem(stroke) => self.map_stroke(stroke).map(Into::into),
                Block::RootText(text) => Ok(self.map_text(text).into()),
                Block::AuthorIds {}
                | Block::MigrationInfo {}
                | Block::PageInfo {}
                | Block::SceneTree {}
                | Block::TreeNode {}
                | Block::SceneGroupItem {}
                | Block::Other { .. } => {
                    tracing::warn!(index, "Not converting block: {kind}");
                    skipped += 1;
                    continue;
                }
            };

            match mapped {
                Ok(mut element) => {
                    element.base_mut().version = version;
                    tracing::debug!(
                        index,
                        id = %element.id(),
                        version,
                        "Converted {kind} to {}",
                        element.type_name()
                    );
                    document.elements.push(element);
                }
                Err(error) => {
                    tracing::error!(index, "Failed to convert {kind}: {error}");
                    failures.push(BlockFailure { index, kind, error });
                }
            }
        }

        Translation {
            document,
            failures,
            skipped,
        }
    }

    /// Map a stroke block to a freedraw element.
    ///
    /// A block without a value, or with no points, yields an empty stroke.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::UnknownColor`] if the stroke color is not in
    /// the palette.
    pub fn map_stroke(&mut self, block: &LineItemBlock) -> ScribeResult<FreedrawElement> {
        let mut stroke = FreedrawElement::new(ElementBase::new(&mut self.generator));
        let Some(line) = &block.value else {
            return Ok(stroke);
        };

        stroke.base.stroke_color = PenColor::from_str(&line.color)?.hex().to_string();
        stroke.base.is_deleted = line.tool.is_eraser();
        stroke.set_path(line.points.iter().map(|p| (p.x, p.y, p.pressure)));

        Ok(stroke)
    }

    /// Map the root text block to a text element.
    ///
    /// Excalidraw has no bold or italic, so paragraph styles are not carried.
    pub fn map_text(&mut self, block: &RootTextBlock) -> TextElement {
        let text = &block.value;
        // Ties round to even.
        let base = ElementBase::new(&mut self.generator)
            .with_position(
                (text.pos_x + XPOS_SHIFT).round_ties_even(),
                text.pos_y.round_ties_even(),
            )
            .with_size(text.width.round_ties_even(), 0.0);

        TextElement::new(base, text.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedGenerator, Line, PenTool, Point, Text};

    fn translator() -> Translator<FixedGenerator> {
        Translator::new(FixedGenerator::default())
    }

    fn stroke(tool: PenTool, color: &str, points: &[(f64, f64, f64)]) -> LineItemBlock {
        LineItemBlock::new(Line::new(
            tool,
            color,
            points
                .iter()
                .map(|&(x, y, pressure)| Point::new(x, y, pressure))
                .collect(),
        ))
    }

    #[test]
    fn test_red_stroke() {
        let block = stroke(
            PenTool::Ballpoint2,
            "RED",
            &[(10.0, 10.0, 0.5), (20.0, 10.0, 0.6), (20.0, 20.0, 0.7)],
        );
        let element = translator().map_stroke(&block).expect("should map");

        assert_eq!(element.base.stroke_color, "#FF0000");
        assert_eq!((element.base.x, element.base.y), (10.0, 10.0));
        assert_eq!(element.points, vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
        assert_eq!(element.pressures, vec![0.5, 0.6, 0.7]);
        assert!(!element.base.is_deleted);
    }

    #[test]
    fn test_eraser_stroke_is_deleted() {
        let block = stroke(PenTool::Eraser, "BLACK", &[(1.0, 1.0, 1.0)]);
        let element = translator().map_stroke(&block).expect("should map");
        assert!(element.base.is_deleted);
        assert_eq!(element.points, vec![[0.0, 0.0]]);
    }

    #[test]
    fn test_stroke_without_value() {
        let element = translator()
            .map_stroke(&LineItemBlock::empty())
            .expect("should map");
        assert!(element.points.is_empty());
        assert!(element.pressures.is_empty());
        assert_eq!((element.base.x, element.base.y), (0.0, 0.0));
        assert!(!element.base.is_deleted);
    }

    #[test]
    fn test_stroke_without_points() {
        let block = stroke(PenTool::Pencil1, "BLUE", &[]);
        let element = translator().map_stroke(&block).expect("should map");
        assert!(element.points.is_empty());
        assert_eq!(element.base.stroke_color, "#0000FF");
    }

    #[test]
    fn test_unknown_color() {
        let block = stroke(PenTool::Marker1, "ULTRAVIOLET", &[(0.0, 0.0, 0.1)]);
        let err = translator().map_stroke(&block).expect_err("should fail");
        assert!(matches!(err, ScribeError::UnknownColor { ref color } if color == "ULTRAVIOLET"));
    }

    #[test]
    fn test_hello_world_text() {
        let block = RootTextBlock::new(Text::new(
            [(0, "Hello"), (1, " world")],
            100.0,
            200.0,
            300.4,
        ));
        let element = translator().map_text(&block);

        assert_eq!(element.text(), "Hello world");
        assert_eq!(element.original_text(), "Hello world");
        assert_eq!(element.base().x, 802.0);
        assert_eq!(element.base().y, 200.0);
        assert_eq!(element.base().width, 300.0);
        assert_eq!(element.base().height, 25.0);
    }

    #[test]
    fn test_text_position_rounds() {
        let block = RootTextBlock::new(Text::new([(0, "x")], -468.4, 94.6, 935.5));
        let element = translator().map_text(&block);
        assert_eq!(element.base().x, 234.0);
        assert_eq!(element.base().y, 95.0);
        assert_eq!(element.base().width, 936.0);
    }

    #[test]
    fn test_text_ties_round_to_even() {
        let block = RootTextBlock::new(Text::new([(0, "x")], 100.5, 2.5, 300.5));
        let element = translator().map_text(&block);
        assert_eq!(element.base().x, 802.0);
        assert_eq!(element.base().y, 2.0);
        assert_eq!(element.base().width, 300.0);
    }

    #[test]
    fn test_multiline_text_height() {
        let block =
            RootTextBlock::new(Text::new([(0, "a\n"), (2, "b\n"), (4, "c")], 0.0, 0.0, 1.0));
        let element = translator().map_text(&block);
        assert_eq!(element.line_count(), 3);
        assert_eq!(element.base().height, 75.0);
    }

    #[test]
    fn test_versions_follow_block_order() {
        let blocks = vec![
            Block::from(stroke(PenTool::Ballpoint1, "BLACK", &[(0.0, 0.0, 0.5)])),
            Block::PageInfo {},
            Block::from(RootTextBlock::new(Text::new([(0, "t")], 0.0, 0.0, 1.0))),
        ];

        let translation = Translator::new(FixedGenerator::new(0, 40)).translate(&blocks);
        let versions: Vec<_> = translation
            .document
            .elements
            .iter()
            .map(Element::version)
            .collect();

        assert_eq!(versions, vec![41, 43]);
        assert_eq!(translation.skipped, 1);
        assert!(translation.is_complete());
    }

    #[test]
    fn test_failed_block_does_not_stop_translation() {
        let blocks = vec![
            Block::from(stroke(PenTool::Ballpoint1, "NOPE", &[(0.0, 0.0, 0.5)])),
            Block::from(stroke(PenTool::Ballpoint1, "GREEN", &[(0.0, 0.0, 0.5)])),
        ];

        let translation = translator().translate(&blocks);
        assert_eq!(translation.document.element_count(), 1);
        assert_eq!(translation.failures.len(), 1);
        assert_eq!(translation.failures[0].index, 0);
        assert_eq!(translation.failures[0].kind, BlockKind::SceneLineItem);

        let err = translation.into_result().expect_err("should report failure");
        let message = err.to_string();
        assert!(message.contains("#0"), "{message}");
        assert!(message.contains("SceneLineItemBlock"), "{message}");
        assert!(message.contains("NOPE"), "{message}");
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let blocks = vec![
            Block::Other {
                kind: "SceneGlyphItemBlock".to_string(),
            },
            Block::from(stroke(PenTool::Ballpoint1, "GREEN", &[(0.0, 0.0, 0.5)])),
        ];

        let translation = translator().translate(&blocks);
        assert_eq!(translation.document.element_count(), 1);
        assert_eq!(translation.skipped, 1);
        assert!(translation.is_complete());
    }

    #[test]
    fn test_version_counter_saturates() {
        let blocks = vec![
            Block::from(stroke(PenTool::Ballpoint1, "BLACK", &[(0.0, 0.0, 0.5)])),
            Block::from(RootTextBlock::new(Text::new([(0, "t")], 0.0, 0.0, 1.0))),
        ];

        let translation = Translator::new(FixedGenerator::new(0, u64::MAX)).translate(&blocks);
        let versions: Vec<_> = translation
            .document
            .elements
            .iter()
            .map(Element::version)
            .collect();

        assert_eq!(versions, vec![u64::MAX, u64::MAX]);
    }

    #[test]
    fn test_empty_input() {
        let translation = translator().translate(&[]);
        assert!(translation.document.is_empty());
        assert!(translation.into_result().is_ok());
    }
}
