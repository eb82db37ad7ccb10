//! Section-level types.

use super::Block;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A group of blocks forming a semantically coherent region.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "crate::parser::RawSection")]
pub struct Section {
    /// Blocks in reading order (insertion order before reconstruction)
    pub blocks: Vec<Block>,

    /// Heading of the section, not a member of `blocks`
    pub title: Option<Block>,

    /// Free-form summary produced downstream
    pub summary: Option<String>,
}

impl Section {
    /// Create a new empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a section holding the given blocks.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Set the heading block.
    pub fn with_title(mut self, title: Block) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of body blocks (the title is not counted).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// A section with neither blocks nor title.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.title.is_none()
    }

    /// Text of the heading block, if any.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }

    /// Title block followed by the body blocks.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.title.iter().chain(self.blocks.iter())
    }

    /// Get plain text of the section, heading first.
    pub fn plain_text(&self) -> String {
        self.all_blocks()
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Section", 4)?;
        state.serialize_field("_type", "Section")?;
        state.serialize_field("blocks", &self.blocks)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("summary", &self.summary)?;
        state.end()
    }
}
