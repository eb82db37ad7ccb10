//! Block-level types: the atomic layout unit.

use crate::error::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Position of a block: page index plus bounding box.
///
/// Serialized as the 5-element array `[page, x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "[f64; 5]", try_from = "Vec<f64>")]
pub struct Coords {
    /// Page index
    pub page: f64,
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl Coords {
    /// Number of values in the external form.
    pub const LEN: usize = 5;

    /// Create coordinates from page index and bounding box.
    pub fn new(page: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            page,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// Build coordinates from a slice, checking arity and finiteness.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != Self::LEN {
            return Err(Error::validation(
                "coords",
                format!("expected {} values, got {}", Self::LEN, values.len()),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::validation(
                "coords",
                format!("value at index {} is not a finite number", pos),
            ));
        }
        Ok(Self::new(values[0], values[1], values[2], values[3], values[4]))
    }

    /// Values in external order.
    pub fn to_array(&self) -> [f64; 5] {
        [self.page, self.x1, self.y1, self.x2, self.y2]
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

impl From<Coords> for [f64; 5] {
    fn from(coords: Coords) -> Self {
        coords.to_array()
    }
}

impl TryFrom<Vec<f64>> for Coords {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

/// Classification label assigned by the layout detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
    /// Body text
    Text,
    /// Heading
    Title,
    /// List item
    List,
    /// Figure or picture
    Figure,
    /// Table
    Table,
    /// Label outside the known vocabulary (only kept by permissive loading)
    Unrecognized(String),
}

impl Label {
    /// The recognized label vocabulary, in external spelling.
    pub const KNOWN: [&'static str; 5] = ["text", "title", "list", "figure", "table"];

    /// Parse a recognized label; `None` for anything else.
    pub fn recognized(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Label::Text),
            "title" => Some(Label::Title),
            "list" => Some(Label::List),
            "figure" => Some(Label::Figure),
            "table" => Some(Label::Table),
            _ => None,
        }
    }

    /// Parse any label, keeping unknown spellings as [`Label::Unrecognized`].
    pub fn parse(s: &str) -> Self {
        Self::recognized(s).unwrap_or_else(|| Label::Unrecognized(s.to_string()))
    }

    /// External spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Text => "text",
            Label::Title => "title",
            Label::List => "list",
            Label::Figure => "figure",
            Label::Table => "table",
            Label::Unrecognized(s) => s,
        }
    }

    /// Check if the label is part of the known vocabulary.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Label::Unrecognized(_))
    }

    /// Text and list blocks make up the body of a section.
    pub fn is_body(&self) -> bool {
        matches!(self, Label::Text | Label::List)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::parse(&s)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic segment of a resource, e.g. a line of text or a figure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "crate::parser::RawBlock")]
pub struct Block {
    /// Page index and bounding box
    pub coords: Coords,

    /// Raw text of the block
    pub text: Option<String>,

    /// Detector label
    pub label: Option<Label>,
}

impl Block {
    /// Create an unlabeled block without text.
    pub fn new(coords: Coords) -> Self {
        Self {
            coords,
            text: None,
            label: None,
        }
    }

    /// Create a text block.
    pub fn text(coords: Coords, text: impl Into<String>) -> Self {
        Self::new(coords).with_text(text).with_label(Label::Text)
    }

    /// Create a title block.
    pub fn title(coords: Coords, text: impl Into<String>) -> Self {
        Self::new(coords).with_text(text).with_label(Label::Title)
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Page index of the block.
    pub fn page(&self) -> f64 {
        self.coords.page
    }

    /// Check if the block is labeled as a title.
    pub fn is_title(&self) -> bool {
        self.label == Some(Label::Title)
    }

    /// Get the text, or an empty string for text-less blocks.
    pub fn plain_text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 4)?;
        state.serialize_field("_type", "Block")?;
        state.serialize_field("coords", &self.coords)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("label", &self.label)?;
        state.end()
    }
}
