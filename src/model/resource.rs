//! Resource-level types: the whole document and its metadata.

use super::{Block, Section};
use crate::error::{Error, Result};
use crate::parser::RawSource;
use chrono::{SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed document: ordered sections plus unassigned blocks and metadata.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "crate::parser::RawResource")]
pub struct Resource {
    /// Reconstructed document structure
    pub sections: Vec<Section>,

    /// Blocks not assigned to any section (typically figures and tables)
    pub other_blocks: Vec<Block>,

    /// Type of the underlying file
    pub filetype: Option<FileType>,

    /// Where the underlying file lives
    pub source: Option<Source>,

    /// Document title
    pub title: Option<String>,

    /// Creation date, kept verbatim
    pub date_created: Option<String>,
}

impl Resource {
    /// Create a new empty resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sections.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Set the unassigned blocks.
    pub fn with_other_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.other_blocks = blocks;
        self
    }

    /// Set the file type.
    pub fn with_filetype(mut self, filetype: FileType) -> Self {
        self.filetype = Some(filetype);
        self
    }

    /// Set the source descriptor.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creation date.
    pub fn with_date_created(mut self, date: impl Into<String>) -> Self {
        self.date_created = Some(date.into());
        self
    }

    /// Fill `date_created` with the current UTC time if it is not set yet.
    pub fn stamp_created_now(&mut self) {
        if self.date_created.is_none() {
            self.date_created = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Iterate over every block: section titles and bodies, then other blocks.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections
            .iter()
            .flat_map(|s| s.all_blocks())
            .chain(self.other_blocks.iter())
    }

    /// Total number of blocks, titles included.
    pub fn block_count(&self) -> usize {
        self.all_blocks().count()
    }

    /// Count blocks per label; unlabeled blocks are counted under `"none"`.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for block in self.all_blocks() {
            let key = block
                .label
                .as_ref()
                .map(|l| l.as_str().to_string())
                .unwrap_or_else(|| "none".to_string());
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// Check if the resource holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }

    /// Get plain text of the document, one paragraph per section.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Resource", 7)?;
        state.serialize_field("_type", "Resource")?;
        state.serialize_field("filetype", &self.filetype)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("date_created", &self.date_created)?;
        state.serialize_field("sections", &self.sections)?;
        state.serialize_field("other_blocks", &self.other_blocks)?;
        state.end()
    }
}

/// Recognized file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// Portable Document Format
    #[serde(rename = "PDF")]
    Pdf,
}

impl FileType {
    /// Every recognized file type.
    pub const ALL: [FileType; 1] = [FileType::Pdf];

    /// External spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
        }
    }

    /// Parse the external spelling, rejecting anything outside the known set.
    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|ft| ft.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|ft| ft.as_str()).collect();
                Error::validation(
                    "filetype",
                    format!("{:?} is not one of {:?}", s, known),
                )
            })
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the underlying file of a resource comes from.
///
/// Exactly one shape is present; the descriptor is never resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Source {
    /// Object storage reference
    Bucket {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// Remote reference
    Url {
        /// Location of the file
        url: String,
    },

    /// Inline payload
    Data {
        /// The payload itself, kept as opaque JSON
        data: Value,
    },
}

impl Source {
    /// Create an object storage source.
    pub fn bucket(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Source::Bucket {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create a URL source.
    pub fn url(url: impl Into<String>) -> Self {
        Source::Url { url: url.into() }
    }

    /// Create an inline payload source.
    pub fn data(data: impl Into<Value>) -> Self {
        Source::Data { data: data.into() }
    }

    /// Name of the descriptor shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Bucket { .. } => "bucket",
            Source::Url { .. } => "url",
            Source::Data { .. } => "data",
        }
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSource::deserialize(deserializer)?;
        Source::try_from(raw).map_err(de::Error::custom)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Bucket { bucket, key } => write!(f, "bucket {}/{}", bucket, key),
            Source::Url { url } => write!(f, "url {}", url),
            Source::Data {
                data: Value::String(s),
            } => write!(f, "inline data ({} bytes)", s.len()),
            Source::Data { data } => write!(f, "inline data {}", data),
        }
    }
}
