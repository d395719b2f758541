#![doc = include_str!("../README.md")]

// Core diff pipeline
pub mod annotate;
pub mod diff;
pub mod grid;
pub mod image;
pub mod sampler;

// Orchestration around the core: collaborator seams, the scenario runner,
// and the binary's configuration surface.
pub mod capture;
pub mod config;
pub mod runner;

// --- High-level re-exports -------------------------------------------------

pub use crate::annotate::{annotate, HIGHLIGHT_RED};
pub use crate::diff::{CellOrigin, DiffError, DiffParams, DiffResult, GridDiffer};
pub use crate::grid::{GridLayout, GridSpec};
pub use crate::runner::{RegressionRunner, ScenarioOutcome};
pub use crate::sampler::{Fingerprint, SamplerParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use screendiff::prelude::*;
///
/// let before = RgbaImageU8::from_pixel(60, 40, [255, 255, 255, 255]);
/// let mut after = before.clone();
/// after.put_pixel(10, 10, [0, 0, 0, 255]);
///
/// let differ = GridDiffer::new(DiffParams::default());
/// let result = differ.diff(&before, &after).unwrap();
/// let annotated = annotate(&before, &result, screendiff::HIGHLIGHT_RED);
/// assert_eq!(annotated.width(), 60);
/// ```
pub mod prelude {
    pub use crate::annotate::annotate;
    pub use crate::diff::{DiffParams, DiffResult, GridDiffer};
    pub use crate::grid::GridSpec;
    pub use crate::image::{PixelRead, RgbaImageU8};
}
