//! Loading documents from their external JSON form.
//!
//! Every entity is read in two steps: serde fills a permissive raw shape,
//! then validation turns it into the typed model or fails with the path of
//! the first offending field. No partially valid value is ever returned.

mod options;
mod raw;

pub use options::{LabelPolicy, LoadOptions};
pub use raw::{RawBlock, RawResource, RawSection, RawSource};

use crate::error::{Error, Result};
use crate::model::{Block, Node, Resource, Section};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl Block {
    /// Load a block from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_json_with_options(s, &LoadOptions::default())
    }

    /// Load a block from JSON with custom options.
    pub fn from_json_with_options(s: &str, options: &LoadOptions) -> Result<Self> {
        let raw: RawBlock = serde_json::from_str(s)?;
        raw.validate(options)
    }
}

impl Section {
    /// Load a section from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_json_with_options(s, &LoadOptions::default())
    }

    /// Load a section from JSON with custom options.
    pub fn from_json_with_options(s: &str, options: &LoadOptions) -> Result<Self> {
        let raw: RawSection = serde_json::from_str(s)?;
        raw.validate(options)
    }
}

impl Resource {
    /// Load a resource from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use docmodel::Resource;
    ///
    /// let r = Resource::from_json(r#"{"_type": "Resource", "title": "Notes", "sections": []}"#)?;
    /// assert_eq!(r.title.as_deref(), Some("Notes"));
    /// # Ok::<(), docmodel::Error>(())
    /// ```
    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_json_with_options(s, &LoadOptions::default())
    }

    /// Load a resource from JSON with custom options.
    pub fn from_json_with_options(s: &str, options: &LoadOptions) -> Result<Self> {
        let raw: RawResource = serde_json::from_str(s)?;
        raw.validate(options)
    }

    /// Load a resource from a reader.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let raw: RawResource = serde_json::from_reader(reader)?;
        raw.validate(options)
    }

    /// Load a resource from a JSON file.
    pub fn load_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }
}

impl Node {
    /// Load any entity from JSON, dispatching on its `_type` tag.
    pub fn from_json(s: &str, options: &LoadOptions) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value, options)
    }

    /// Load any entity from an already parsed JSON value.
    pub fn from_value(value: Value, options: &LoadOptions) -> Result<Self> {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .map(str::to_string);

        match kind.as_deref() {
            Some("Block") => {
                let raw: RawBlock = serde_json::from_value(value)?;
                Ok(Node::Block(raw.validate(options)?))
            }
            Some("Section") => {
                let raw: RawSection = serde_json::from_value(value)?;
                Ok(Node::Section(raw.validate(options)?))
            }
            Some("Resource") => {
                let raw: RawResource = serde_json::from_value(value)?;
                Ok(Node::Resource(raw.validate(options)?))
            }
            Some(other) => Err(Error::validation(
                "_type",
                format!("{:?} is not one of Block, Section, Resource", other),
            )),
            None => Err(Error::validation("_type", "missing entity discriminator")),
        }
    }

    /// Load any entity from a JSON file.
    pub fn load_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_value(value, options)
    }
}
