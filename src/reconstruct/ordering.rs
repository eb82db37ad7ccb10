//! Reading-order reconstruction.
//!
//! Blocks are linearized page by page, then column by column, then top to
//! bottom. Columns are found by snapping `x1` to a coarse horizontal band,
//! so blocks whose left edges are close together read as one column.

use super::{rebuild, OrderingOptions};
use crate::model::{Block, Resource, Section};
use std::cmp::Ordering;

/// Sort key of a block in reading order: `(page, column band, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingKey {
    /// Page index
    pub page: f64,
    /// `x1` snapped to its column band
    pub column: f64,
    /// Top edge
    pub y: f64,
}

impl ReadingKey {
    /// Key of a section with neither title nor blocks; sorts before real content.
    pub const SENTINEL: ReadingKey = ReadingKey {
        page: -1.0,
        column: -1.0,
        y: -1.0,
    };

    /// Compute the key of a block.
    pub fn of(block: &Block, column_band: f64) -> Self {
        Self {
            page: block.coords.page,
            column: snap_to_band(block.coords.x1, column_band),
            y: block.coords.y1,
        }
    }

    /// Compute the key of a section: its title, else its first block.
    pub fn of_section(section: &Section, column_band: f64) -> Self {
        section
            .title
            .as_ref()
            .or_else(|| section.blocks.first())
            .map(|b| Self::of(b, column_band))
            .unwrap_or(Self::SENTINEL)
    }

    /// Total lexicographic comparison.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.page
            .total_cmp(&other.page)
            .then_with(|| self.column.total_cmp(&other.column))
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Round `x` to the nearest multiple of `band`, ties to even.
///
/// With the default band of 100, 149 → 100, 150 → 200 and 250 → 200.
pub fn snap_to_band(x: f64, band: f64) -> f64 {
    if !(band.is_finite() && band > 0.0) {
        return x;
    }
    // + 0.0 folds -0.0 into 0.0 so both land in the same band
    (x / band).round_ties_even() * band + 0.0
}

/// Stably sort blocks into reading order.
pub fn sort_blocks(blocks: &mut [Block], column_band: f64) {
    blocks.sort_by(|a, b| {
        ReadingKey::of(a, column_band).total_cmp(&ReadingKey::of(b, column_band))
    });
}

/// Reorder the blocks of every section, then the sections themselves.
pub fn order(resource: &Resource) -> Resource {
    order_with_options(resource, &OrderingOptions::default())
}

/// Reorder with custom options.
pub fn order_with_options(resource: &Resource, options: &OrderingOptions) -> Resource {
    let band = options.column_band;

    let mut sections: Vec<Section> = resource
        .sections
        .iter()
        .map(|section| {
            let mut section = section.clone();
            sort_blocks(&mut section.blocks, band);
            section
        })
        .collect();

    if options.sort_sections {
        sections.sort_by(|a, b| {
            ReadingKey::of_section(a, band).total_cmp(&ReadingKey::of_section(b, band))
        });
    }

    log::debug!(
        "Ordered {} sections ({} blocks) with column band {}",
        sections.len(),
        sections.iter().map(Section::block_count).sum::<usize>(),
        band
    );

    rebuild(resource, sections, resource.other_blocks.clone())
}
