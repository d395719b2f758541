//! Diff engine: per-cell fingerprint comparison of two same-size images.

use crate::grid::{GridLayout, GridSpec};
use crate::image::PixelRead;
use crate::sampler::{sample, SamplerParams};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the diff precondition checks.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    /// The two images do not share width and height. Fatal for the
    /// comparison; the caller must re-capture or skip the pair.
    #[error(
        "image dimensions differ: before {before_width}x{before_height}, \
         after {after_width}x{after_height}"
    )]
    DimensionMismatch {
        before_width: usize,
        before_height: usize,
        after_width: usize,
        after_height: usize,
    },
    /// The grid spec requested zero columns or zero rows.
    #[error("grid must have at least one column and one row")]
    InvalidGrid,
}

/// Top-left origin of one changed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CellOrigin {
    pub x: usize,
    pub y: usize,
}

/// Outcome of one diff pass: the changed cells plus the grid geometry they
/// were measured against. Consumed by the annotator and the JSON report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffResult {
    pub changed: Vec<CellOrigin>,
    pub layout: GridLayout,
}

impl DiffResult {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Configuration for one diff pass.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiffParams {
    pub grid: GridSpec,
    pub sampler: SamplerParams,
}

/// Grid-based image differ.
///
/// Walks the grid derived from the "before" image, fingerprints each cell in
/// both images, and collects the cells whose fingerprints are unequal. Cells
/// where either sample comes back "not sampleable" (clipped by the boundary,
/// damaged data) are silently excluded from the changed set.
///
/// Holds no cross-call state; one differ can serve any number of image
/// pairs, from multiple threads.
#[derive(Clone, Debug, Default)]
pub struct GridDiffer {
    params: DiffParams,
}

impl GridDiffer {
    pub fn new(params: DiffParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DiffParams {
        &self.params
    }

    /// Compares `before` against `after` cell by cell.
    pub fn diff<A, B>(&self, before: &A, after: &B) -> Result<DiffResult, DiffError>
    where
        A: PixelRead,
        B: PixelRead,
    {
        if self.params.grid.columns == 0 || self.params.grid.rows == 0 {
            return Err(DiffError::InvalidGrid);
        }
        if before.width() != after.width() || before.height() != after.height() {
            return Err(DiffError::DimensionMismatch {
                before_width: before.width(),
                before_height: before.height(),
                after_width: after.width(),
                after_height: after.height(),
            });
        }

        let layout = GridLayout::new(before.width(), before.height(), &self.params.grid);
        let mut changed = Vec::new();
        let mut scanned = 0usize;
        let mut unsampleable = 0usize;

        for (x, y) in layout.origins() {
            scanned += 1;
            let fp_before = sample(
                before,
                x,
                y,
                layout.block_width,
                layout.block_height,
                &self.params.sampler,
            );
            let fp_after = sample(
                after,
                x,
                y,
                layout.block_width,
                layout.block_height,
                &self.params.sampler,
            );
            match (fp_before, fp_after) {
                (Some(a), Some(b)) => {
                    if a != b {
                        changed.push(CellOrigin { x, y });
                    }
                }
                _ => unsampleable += 1,
            }
        }

        debug!(
            "GridDiffer::diff {}x{} cells={} unsampleable={} changed={}",
            layout.image_width,
            layout.image_height,
            scanned,
            unsampleable,
            changed.len()
        );

        Ok(DiffResult { changed, layout })
    }
}
