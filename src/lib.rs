//! # docmodel
//!
//! Document data model and layout reconstruction for extracted documents.
//!
//! A [`Resource`] is a document made of [`Section`]s of [`Block`]s, the
//! positioned and labeled fragments produced by an external layout
//! detector. This library validates that model, rebuilds reading order and
//! section boundaries from raw detector output, and merges several
//! documents into one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docmodel::{load_file, reconstruct, JsonFormat};
//!
//! fn main() -> docmodel::Result<()> {
//!     // Load raw detector output
//!     let raw = load_file("detected.json")?;
//!
//!     // Sort into reading order, then regroup at title blocks
//!     let doc = reconstruct(&raw)?;
//!     println!("{}", doc.to_json(JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Validated model**: construction either yields a valid value or a typed error
//! - **Reading order**: page, coarse column band, then top-to-bottom
//! - **Resectioning**: one linear pass splitting at title blocks
//! - **Merge**: section concatenation with first-set-wins metadata
//! - **Parallel batches**: Uses Rayon for many independent resources

pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod reconstruct;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use merge::{merge, merge_with_options, MergeOptions};
pub use model::{Block, Coords, FileType, Label, Node, Resource, Section, Source};
pub use parser::{LabelPolicy, LoadOptions};
pub use reconstruct::{
    order, order_all, order_with_options, section, section_all, section_with_options,
    OrderingOptions, Reconstruct, SectioningOptions, Step, UnknownLabelPolicy,
};
pub use render::JsonFormat;

use std::path::Path;

/// Load a resource from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Example
///
/// ```no_run
/// use docmodel::load_file;
///
/// let doc = load_file("document.json").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Resource> {
    Resource::load_file(path, &LoadOptions::default())
}

/// Load a resource from a JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use docmodel::{load_file_with_options, LoadOptions};
///
/// let options = LoadOptions::new().permissive();
/// let doc = load_file_with_options("document.json", &options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Resource> {
    Resource::load_file(path, options)
}

/// Load a resource from a JSON string.
///
/// # Example
///
/// ```
/// use docmodel::from_json;
///
/// let doc = from_json(r#"{"_type": "Resource", "sections": []}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn from_json(s: &str) -> Result<Resource> {
    Resource::from_json(s)
}

/// Convert a resource to JSON.
pub fn to_json(resource: &Resource, format: JsonFormat) -> Result<String> {
    render::to_json(resource, format)
}

/// Order then resection a resource with default options.
///
/// # Example
///
/// ```
/// use docmodel::{reconstruct, Block, Coords, Resource, Section};
///
/// let raw = Resource::new().with_sections(vec![Section::with_blocks(vec![
///     Block::text(Coords::new(0.0, 0.0, 50.0, 100.0, 60.0), "body"),
///     Block::title(Coords::new(0.0, 0.0, 10.0, 100.0, 20.0), "Heading"),
/// ])]);
/// let doc = reconstruct(&raw)?;
/// assert_eq!(doc.sections[0].title_text(), Some("Heading"));
/// # Ok::<(), docmodel::Error>(())
/// ```
pub fn reconstruct(resource: &Resource) -> Result<Resource> {
    Reconstruct::standard().apply(resource)
}
