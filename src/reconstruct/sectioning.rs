//! Title-driven resectioning.
//!
//! Every block of the resource is pooled, put in reading order, and scanned
//! once. Title blocks open new sections, text and list blocks extend the
//! open one, everything else is set aside in `other_blocks`.

use super::ordering::sort_blocks;
use super::{rebuild, SectioningOptions, UnknownLabelPolicy};
use crate::error::{Error, Result};
use crate::model::{Block, Label, Resource, Section};

/// Where a block goes during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Starts a new section
    Heading,
    /// Joins the open section
    Body,
    /// Figure, table or unlabeled block, set aside
    Other,
    /// Label outside the known vocabulary
    Unrecognized,
}

impl Route {
    /// Classify a block by its label.
    pub fn of(block: &Block) -> Self {
        match &block.label {
            Some(Label::Title) => Route::Heading,
            Some(Label::Text) | Some(Label::List) => Route::Body,
            Some(Label::Figure) | Some(Label::Table) | None => Route::Other,
            Some(Label::Unrecognized(_)) => Route::Unrecognized,
        }
    }
}

/// State of the scan.
#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    /// An open section always holds a title or at least one block.
    Open {
        title: Option<Block>,
        blocks: Vec<Block>,
    },
}

/// Accumulates sections and set-aside blocks over one pass.
#[derive(Debug, Default)]
struct Scan {
    state: ScanState,
    sections: Vec<Section>,
    other: Vec<Block>,
}

impl Scan {
    fn push(&mut self, block: Block) {
        match Route::of(&block) {
            Route::Heading => {
                self.close();
                log::trace!("Opening section at title {:?}", block.plain_text());
                self.state = ScanState::Open {
                    title: Some(block),
                    blocks: Vec::new(),
                };
            }
            Route::Body => match &mut self.state {
                ScanState::Open { blocks, .. } => blocks.push(block),
                ScanState::Idle => {
                    log::trace!("Opening untitled section");
                    self.state = ScanState::Open {
                        title: None,
                        blocks: vec![block],
                    };
                }
            },
            Route::Other | Route::Unrecognized => self.other.push(block),
        }
    }

    fn close(&mut self) {
        if let ScanState::Open { title, blocks } = std::mem::take(&mut self.state) {
            self.sections.push(Section {
                blocks,
                title,
                summary: None,
            });
        }
    }

    fn finish(mut self) -> (Vec<Section>, Vec<Block>) {
        self.close();
        (self.sections, self.other)
    }
}

/// Every block of every section, titles included, in reading order.
fn reading_pool(resource: &Resource, column_band: f64) -> Vec<Block> {
    let mut pool: Vec<Block> = resource
        .sections
        .iter()
        .flat_map(|s| s.all_blocks())
        .cloned()
        .collect();
    sort_blocks(&mut pool, column_band);
    pool
}

fn assemble(resource: &Resource, pool: Vec<Block>) -> Resource {
    let pooled = pool.len();
    let mut scan = Scan::default();
    for block in pool {
        scan.push(block);
    }
    let (sections, diverted) = scan.finish();

    let unrecognized = diverted
        .iter()
        .filter(|b| Route::of(b) == Route::Unrecognized)
        .count();
    if unrecognized > 0 {
        log::warn!(
            "Moved {} blocks with unrecognized labels to other_blocks",
            unrecognized
        );
    }
    log::debug!(
        "Resectioned {} blocks into {} sections, {} set aside",
        pooled,
        sections.len(),
        diverted.len()
    );

    let mut other_blocks = resource.other_blocks.clone();
    other_blocks.extend(diverted);
    rebuild(resource, sections, other_blocks)
}

/// Rebuild the sections of a resource from its title blocks.
///
/// Unrecognized labels are moved to `other_blocks`.
pub fn section(resource: &Resource) -> Resource {
    let options = SectioningOptions::default();
    assemble(resource, reading_pool(resource, options.ordering.column_band))
}

/// Rebuild sections with custom options.
///
/// With [`UnknownLabelPolicy::Reject`] the first unrecognized label in
/// reading order fails the whole call.
pub fn section_with_options(resource: &Resource, options: &SectioningOptions) -> Result<Resource> {
    let pool = reading_pool(resource, options.ordering.column_band);

    if options.unknown_labels == UnknownLabelPolicy::Reject {
        let offending = pool.iter().enumerate().find_map(|(position, b)| {
            b.label
                .as_ref()
                .filter(|label| !label.is_recognized())
                .map(|label| (position, label.as_str().to_string()))
        });
        if let Some((position, label)) = offending {
            return Err(Error::InvariantViolation { label, position });
        }
    }

    Ok(assemble(resource, pool))
}
