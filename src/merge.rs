//! Combining several resources into one.
//!
//! Sections and other blocks are concatenated in input order. Every scalar
//! field is taken from the first resource that sets it; later resources
//! never override an earlier value.

use crate::error::{Error, Result};
use crate::model::{FileType, Resource, Source};
use std::fmt::Display;

/// Options for merging resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Silently keep the earlier value when a later resource disagrees.
    /// When false, a disagreement is a [`Error::MergeConflict`].
    pub allow_overwrite: bool,
}

impl MergeOptions {
    /// Create new merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set overwrite policy.
    pub fn with_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    /// Fail on conflicting scalar fields.
    pub fn strict(mut self) -> Self {
        self.allow_overwrite = false;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            allow_overwrite: true,
        }
    }
}

/// A non-list field merged with first-set-wins precedence.
trait Scalar: Clone + PartialEq + Display {
    /// Whether the value counts as set.
    fn is_set(&self) -> bool {
        true
    }
}

impl Scalar for String {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
}

impl Scalar for FileType {}

impl Scalar for Source {}

fn merge_field<T: Scalar>(
    field: &'static str,
    slot: &mut Option<T>,
    incoming: Option<&T>,
    options: &MergeOptions,
) -> Result<()> {
    let Some(incoming) = incoming.filter(|v| v.is_set()) else {
        return Ok(());
    };
    match slot.as_ref().filter(|v| v.is_set()) {
        Some(existing) if existing != incoming && !options.allow_overwrite => {
            Err(Error::MergeConflict {
                field,
                existing: existing.to_string(),
                incoming: incoming.to_string(),
            })
        }
        Some(_) => Ok(()),
        None => {
            *slot = Some(incoming.clone());
            Ok(())
        }
    }
}

/// Merge resources, letting earlier resources win on scalar fields.
///
/// # Example
///
/// ```
/// use docmodel::{merge, Resource};
///
/// let a = Resource::new().with_title("A");
/// let b = Resource::new().with_title("B");
/// assert_eq!(merge(&[a, b])?.title.as_deref(), Some("A"));
/// # Ok::<(), docmodel::Error>(())
/// ```
pub fn merge(resources: &[Resource]) -> Result<Resource> {
    merge_with_options(resources, &MergeOptions::default())
}

/// Merge resources with custom options.
pub fn merge_with_options(resources: &[Resource], options: &MergeOptions) -> Result<Resource> {
    if resources.is_empty() {
        return Err(Error::EmptyMerge);
    }

    let mut merged = Resource::new();
    for resource in resources {
        merge_field("title", &mut merged.title, resource.title.as_ref(), options)?;
        merge_field("filetype", &mut merged.filetype, resource.filetype.as_ref(), options)?;
        merge_field("source", &mut merged.source, resource.source.as_ref(), options)?;
        merge_field(
            "date_created",
            &mut merged.date_created,
            resource.date_created.as_ref(),
            options,
        )?;
    }

    // Only copy structure once every field check has passed.
    for resource in resources {
        merged.sections.extend(resource.sections.iter().cloned());
        merged.other_blocks.extend(resource.other_blocks.iter().cloned());
    }

    log::debug!(
        "Merged {} resources into {} sections",
        resources.len(),
        merged.section_count()
    );

    Ok(merged)
}
