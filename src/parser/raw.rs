//! Unvalidated mirrors of the external form and their validation.
//!
//! Serde reads JSON into these permissive shapes first, then each one is
//! checked field by field so failures can name the offending path.

use super::{LabelPolicy, LoadOptions};
use crate::error::{Error, Result};
use crate::model::{Block, Coords, FileType, Label, Resource, Section, Source};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Block as found in the external form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    #[serde(rename = "_type")]
    kind: Option<String>,
    coords: Vec<f64>,
    text: Option<String>,
    label: Option<String>,
}

/// Section as found in the external form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    #[serde(rename = "_type")]
    kind: Option<String>,
    #[serde(default)]
    blocks: Vec<RawBlock>,
    title: Option<RawBlock>,
    summary: Option<String>,
}

/// Resource as found in the external form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    #[serde(rename = "_type")]
    kind: Option<String>,
    filetype: Option<String>,
    source: Option<RawSource>,
    title: Option<String>,
    date_created: Option<String>,
    #[serde(default)]
    sections: Vec<RawSection>,
    #[serde(default)]
    other_blocks: Vec<RawBlock>,
}

/// Source descriptor as found in the external form.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RawSource(Map<String, Value>);

const SOURCE_KEYS: [&str; 4] = ["bucket", "key", "url", "data"];

/// The `_type` tag is optional on input but must name the right entity.
fn check_kind(kind: Option<&str>, expected: &str) -> Result<()> {
    match kind {
        None => Ok(()),
        Some(k) if k == expected => Ok(()),
        Some(k) => Err(Error::validation(
            "_type",
            format!("expected {:?}, got {:?}", expected, k),
        )),
    }
}

fn validate_blocks(raw: Vec<RawBlock>, field: &str, options: &LoadOptions) -> Result<Vec<Block>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, b)| {
            b.validate(options)
                .map_err(|e| e.within(&format!("{}[{}]", field, i)))
        })
        .collect()
}

impl RawBlock {
    /// Check the block and build the typed value.
    pub fn validate(self, options: &LoadOptions) -> Result<Block> {
        check_kind(self.kind.as_deref(), "Block")?;
        let coords = Coords::from_slice(&self.coords)?;

        let label = match self.label {
            None => None,
            Some(s) => match (Label::recognized(&s), options.label_policy) {
                (Some(label), _) => Some(label),
                (None, LabelPolicy::Permissive) => Some(Label::Unrecognized(s)),
                (None, LabelPolicy::Strict) => {
                    return Err(Error::validation(
                        "label",
                        format!("{:?} is not one of {:?}", s, Label::KNOWN),
                    ))
                }
            },
        };

        Ok(Block {
            coords,
            text: self.text,
            label,
        })
    }
}

impl RawSection {
    /// Check the section and every block it holds.
    pub fn validate(self, options: &LoadOptions) -> Result<Section> {
        check_kind(self.kind.as_deref(), "Section")?;
        let blocks = validate_blocks(self.blocks, "blocks", options)?;
        let title = self
            .title
            .map(|t| t.validate(options).map_err(|e| e.within("title")))
            .transpose()?;

        Ok(Section {
            blocks,
            title,
            summary: self.summary,
        })
    }
}

impl RawResource {
    /// Check the resource, its metadata and its whole section tree.
    pub fn validate(self, options: &LoadOptions) -> Result<Resource> {
        check_kind(self.kind.as_deref(), "Resource")?;
        let filetype = self.filetype.as_deref().map(FileType::parse).transpose()?;
        let source = self.source.map(Source::try_from).transpose()?;

        let sections = self
            .sections
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                s.validate(options)
                    .map_err(|e| e.within(&format!("sections[{}]", i)))
            })
            .collect::<Result<Vec<_>>>()?;
        let other_blocks = validate_blocks(self.other_blocks, "other_blocks", options)?;

        Ok(Resource {
            sections,
            other_blocks,
            filetype,
            source,
            title: self.title,
            date_created: self.date_created,
        })
    }
}

impl TryFrom<RawSource> for Source {
    type Error = Error;

    fn try_from(raw: RawSource) -> Result<Self> {
        let map = raw.0;

        if let Some(unknown) = map.keys().find(|k| !SOURCE_KEYS.contains(&k.as_str())) {
            return Err(Error::validation(
                format!("source.{}", unknown),
                "not part of any source shape",
            ));
        }

        let text = |key: &str| -> Result<Option<String>> {
            match map.get(key) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(other) => Err(Error::validation(
                    format!("source.{}", key),
                    format!("expected a string, got {}", other),
                )),
            }
        };

        let bucket = text("bucket")?;
        let key = text("key")?;
        let url = text("url")?;
        // Inline payloads are opaque, any JSON value goes
        let data = map.get("data").cloned();

        let shapes = [bucket.is_some() || key.is_some(), url.is_some(), data.is_some()]
            .iter()
            .filter(|present| **present)
            .count();
        if shapes != 1 {
            return Err(Error::validation(
                "source",
                format!(
                    "expected exactly one of {{bucket, key}}, {{url}} or {{data}}, found {}",
                    shapes
                ),
            ));
        }

        if let Some(url) = url {
            return Ok(Source::Url { url });
        }
        if let Some(data) = data {
            return Ok(Source::Data { data });
        }
        match (bucket, key) {
            (Some(bucket), Some(key)) => Ok(Source::Bucket { bucket, key }),
            (Some(_), None) => Err(Error::validation("source.key", "missing")),
            (None, _) => Err(Error::validation("source.bucket", "missing")),
        }
    }
}

// Serde deserialization reads back anything `Serialize` writes, so unknown
// labels are kept. Strict loading goes through `LoadOptions`.

impl TryFrom<RawBlock> for Block {
    type Error = Error;

    fn try_from(raw: RawBlock) -> Result<Self> {
        raw.validate(&LoadOptions::new().permissive())
    }
}

impl TryFrom<RawSection> for Section {
    type Error = Error;

    fn try_from(raw: RawSection) -> Result<Self> {
        raw.validate(&LoadOptions::new().permissive())
    }
}

impl TryFrom<RawResource> for Resource {
    type Error = Error;

    fn try_from(raw: RawResource) -> Result<Self> {
        raw.validate(&LoadOptions::new().permissive())
    }
}
