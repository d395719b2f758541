/// Read-only pixel access used by the region sampler.
///
/// `pixel` is total over the coordinate plane: reads outside the image, or
/// over a damaged backing buffer, return `None` instead of panicking. The
/// sampler relies on this to turn boundary overruns into a "not sampleable"
/// verdict for the cell rather than an error.
pub trait PixelRead {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// One RGBA pixel, or `None` when the read cannot be satisfied.
    fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]>;
}
