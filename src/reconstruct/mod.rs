//! Reconstruction of reading order and section structure.
//!
//! Both algorithms are pure: they borrow the input [`Resource`] and return a
//! freshly built one, leaving metadata untouched. They can be chained in
//! either order with [`Reconstruct`], and applied to many independent
//! resources in parallel with [`order_all`] and [`section_all`].

mod options;
mod ordering;
mod sectioning;

pub use options::{OrderingOptions, SectioningOptions, UnknownLabelPolicy, DEFAULT_COLUMN_BAND};
pub use ordering::{order, order_with_options, snap_to_band, sort_blocks, ReadingKey};
pub use sectioning::{section, section_with_options, Route};

use crate::error::Result;
use crate::model::{Block, Resource, Section};
use rayon::prelude::*;

/// New resource with the metadata of `resource` and the given structure.
fn rebuild(resource: &Resource, sections: Vec<Section>, other_blocks: Vec<Block>) -> Resource {
    Resource {
        sections,
        other_blocks,
        filetype: resource.filetype,
        source: resource.source.clone(),
        title: resource.title.clone(),
        date_created: resource.date_created.clone(),
    }
}

/// Order many resources in parallel.
pub fn order_all(resources: &[Resource], options: &OrderingOptions) -> Vec<Resource> {
    resources
        .par_iter()
        .map(|r| order_with_options(r, options))
        .collect()
}

/// Resection many resources in parallel.
pub fn section_all(resources: &[Resource], options: &SectioningOptions) -> Result<Vec<Resource>> {
    resources
        .par_iter()
        .map(|r| section_with_options(r, options))
        .collect()
}

/// A reconstruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Reading-order sort
    Order,
    /// Title-driven resectioning
    Section,
}

/// Builder for a sequence of reconstruction steps.
///
/// # Example
///
/// ```
/// use docmodel::{Reconstruct, Resource};
///
/// let raw = Resource::new();
/// let rebuilt = Reconstruct::new().order().section().apply(&raw)?;
/// assert_eq!(rebuilt.section_count(), 0);
/// # Ok::<(), docmodel::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconstruct {
    steps: Vec<Step>,
    ordering: OrderingOptions,
    sectioning: SectioningOptions,
}

impl Reconstruct {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order then resection.
    pub fn standard() -> Self {
        Self::new().order().section()
    }

    /// Append a reading-order step.
    pub fn order(mut self) -> Self {
        self.steps.push(Step::Order);
        self
    }

    /// Append a resectioning step.
    pub fn section(mut self) -> Self {
        self.steps.push(Step::Section);
        self
    }

    /// Set ordering options.
    pub fn with_ordering_options(mut self, options: OrderingOptions) -> Self {
        self.ordering = options;
        self
    }

    /// Set sectioning options.
    pub fn with_sectioning_options(mut self, options: SectioningOptions) -> Self {
        self.sectioning = options;
        self
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step on a resource.
    pub fn apply(&self, resource: &Resource) -> Result<Resource> {
        let mut current: Option<Resource> = None;
        for step in &self.steps {
            let input = current.as_ref().unwrap_or(resource);
            let next = match step {
                Step::Order => order_with_options(input, &self.ordering),
                Step::Section => section_with_options(input, &self.sectioning)?,
            };
            current = Some(next);
        }
        Ok(current.unwrap_or_else(|| resource.clone()))
    }

    /// Run every step on many resources in parallel.
    pub fn apply_all(&self, resources: &[Resource]) -> Result<Vec<Resource>> {
        resources.par_iter().map(|r| self.apply(r)).collect()
    }
}
