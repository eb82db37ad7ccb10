//! Any entity of the external form, discriminated by its `_type` tag.

use super::{Block, Resource, Section};
use crate::parser::LoadOptions;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A Block, Section or Resource.
///
/// Each entity writes its own `_type` tag, so the variant wrapper itself
/// serializes transparently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A single block
    Block(Block),
    /// A section of blocks
    Section(Section),
    /// A whole document
    Resource(Resource),
}

impl Node {
    /// Name of the entity kind, as written in `_type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Block(_) => "Block",
            Node::Section(_) => "Section",
            Node::Resource(_) => "Resource",
        }
    }

    /// Get the resource, if this node is one.
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Node::Resource(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Section(section)
    }
}

impl From<Resource> for Node {
    fn from(resource: Resource) -> Self {
        Node::Resource(resource)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Node::from_value(value, &LoadOptions::new().permissive()).map_err(de::Error::custom)
    }
}
