//! Region sampling: reduces a rectangular patch to a scalar fingerprint.

use crate::image::PixelRead;
use serde::{Deserialize, Serialize};

/// Scalar summary of a region's pixel intensities.
///
/// Fingerprints carry no ordering semantics; they exist to be compared for
/// exact equality. Derived `PartialEq` keeps the comparison bit-exact — no
/// epsilon tolerance, so any pixel change inside a region produces a
/// different fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fingerprint(pub f64);

/// Knobs of the fingerprint computation.
///
/// The defaults reproduce the historical tool output exactly: channel sums
/// are divided by a fixed 4 regardless of how many channels the source image
/// really has, and the region total is scaled down by a sensitivity factor
/// of 100. Change them only if compatibility with previously recorded
/// results does not matter.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SamplerParams {
    /// Divisor applied to each pixel's channel sum.
    pub channel_normalizer: f64,
    /// Divisor applied to the accumulated region total.
    pub sensitivity: f64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            channel_normalizer: 4.0,
            sensitivity: 100.0,
        }
    }
}

/// Samples the region with top-left origin `(x, y)` and size `width` x
/// `height`, returning its fingerprint.
///
/// Returns `None` ("not sampleable") as soon as any pixel in the region
/// cannot be read — out of bounds or backed by damaged data. Cells clipped
/// by the image boundary land here routinely; it is a verdict, not an error.
pub fn sample<I: PixelRead>(
    image: &I,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    params: &SamplerParams,
) -> Option<Fingerprint> {
    let mut region_total = 0.0f64;
    for py in y..y + height {
        for px in x..x + width {
            let [r, g, b, a] = image.pixel(px, py)?;
            region_total +=
                (r as f64 + g as f64 + b as f64 + a as f64) / params.channel_normalizer;
        }
    }
    Some(Fingerprint(region_total / params.sensitivity))
}
