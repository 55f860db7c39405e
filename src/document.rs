//! Document model produced by the builder and consumed by the writer.
//!
//! A [`Document`] is an ordered sequence of [`Block`]s. It only grows while
//! being built; the writer takes it by value, so each document is serialized
//! exactly once.

use serde::Serialize;

/// Body text size in points.
pub const BODY_SIZE: u8 = 11;

/// Size of the prepended page title, in points.
pub const TITLE_SIZE: u8 = 18;

/// Styled span of text within a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Run {
    /// Text of the span. Empty for line breaks.
    pub text: String,
    /// Bold face.
    pub bold: bool,
    /// Italic face.
    pub italic: bool,
    /// A line break inside the paragraph rather than text.
    pub line_break: bool,
}

impl Run {
    /// Plain run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Bold run.
    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }

    /// Italic run.
    #[must_use]
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Self::default()
        }
    }

    /// Line break.
    #[must_use]
    pub fn line_break() -> Self {
        Self {
            line_break: true,
            ..Self::default()
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub text: String,
    pub is_header: bool,
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Unit of document structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Page title, bold 18pt.
    Title { text: String },
    /// Meta description, italic gray.
    Description { text: String },
    /// Bold heading. `level` is 1-6, `size` is the font size in points.
    Heading { text: String, level: u8, size: u8 },
    /// Body paragraph made of styled runs.
    Paragraph { runs: Vec<Run> },
    /// List item, numbered when `ordered`.
    ListItem { text: String, ordered: bool, depth: u8 },
    /// Table rows in document order.
    Table { rows: Vec<TableRow> },
}

impl Block {
    /// Paragraph holding a single plain run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Paragraph {
            runs: vec![Run::plain(text)],
        }
    }

    /// Plain text of the block, runs and cells joined.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Title { text }
            | Self::Description { text }
            | Self::Heading { text, .. }
            | Self::ListItem { text, .. } => text.clone(),
            Self::Paragraph { runs } => runs
                .iter()
                .map(|r| if r.line_break { "\n" } else { r.text.as_str() })
                .collect(),
            Self::Table { rows } => rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|c| c.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Ordered, append-only sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Append every block of `other`.
    pub fn append(&mut self, other: Document) {
        self.blocks.extend(other.blocks);
    }

    /// The blocks built so far.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Consume the document, yielding its blocks.
    #[must_use]
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut doc = Document::new();
        doc.push(Block::Title { text: "T".into() });
        doc.push(Block::text("body"));

        assert_eq!(doc.len(), 2);
        assert!(matches!(doc.blocks()[0], Block::Title { .. }));
        assert_eq!(doc.blocks()[1].plain_text(), "body");
    }

    #[test]
    fn test_plain_text_of_paragraph_and_table() {
        let para = Block::Paragraph {
            runs: vec![Run::plain("a "), Run::bold("b"), Run::line_break(), Run::italic("c")],
        };
        assert_eq!(para.plain_text(), "a b\nc");

        let table = Block::Table {
            rows: vec![TableRow {
                cells: vec![
                    TableCell { text: "x".into(), is_header: true },
                    TableCell { text: "y".into(), is_header: true },
                ],
            }],
        };
        assert_eq!(table.plain_text(), "x | y");
    }
}
