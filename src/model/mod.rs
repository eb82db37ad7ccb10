//! Document model types.
//!
//! A [`Resource`] owns its [`Section`]s, which own their [`Block`]s.
//! Ownership is strictly top-down: blocks hold no reference to the section
//! they belong to, so any subtree can be cloned or moved independently.

mod block;
mod node;
mod resource;
mod section;

pub use block::{Block, Coords, Label};
pub use node::Node;
pub use resource::{FileType, Resource, Source};
pub use section::Section;
