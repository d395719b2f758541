use super::traits::PixelRead;

/// Borrowed view over interleaved 8-bit RGBA pixel data.
#[derive(Clone, Debug)]
pub struct ImageRgba<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // pixels between rows
    pub data: &'a [u8],
}

impl<'a> ImageRgba<'a> {
    /// Reads one pixel, or `None` when the coordinate is outside the image
    /// or the backing buffer is too short to contain it.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let offset = (y * self.stride + x) * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl<'a> PixelRead for ImageRgba<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.get(x, y)
    }
}

/// Owned 8-bit RGBA buffer with borrowed view conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImageU8 {
    /// Construct an owned RGBA buffer from raw interleaved bytes.
    ///
    /// `data` is expected to hold `width * height * 4` bytes; a short buffer
    /// is tolerated and simply makes the tail pixels unreadable.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// An image filled with a single pixel value.
    pub fn from_pixel(width: usize, height: usize, pixel: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel);
        }
        Self::new(width, height, data)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw byte buffer
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `ImageRgba` view
    pub fn as_view(&self) -> ImageRgba<'_> {
        ImageRgba {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Reads one pixel; `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.as_view().get(x, y)
    }

    /// Writes one pixel. Out-of-range coordinates are ignored, which lets
    /// drawing code clip at the canvas edge without bounds gymnastics.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, pixel: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y * self.width + x) * 4;
        if let Some(bytes) = self.data.get_mut(offset..offset + 4) {
            bytes.copy_from_slice(&pixel);
        }
    }
}

impl PixelRead for RgbaImageU8 {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reads_match_owned_reads() {
        let mut img = RgbaImageU8::from_pixel(3, 2, [1, 2, 3, 4]);
        img.put_pixel(2, 1, [9, 9, 9, 9]);
        let view = img.as_view();
        assert_eq!(view.get(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(view.get(2, 1), Some([9, 9, 9, 9]));
        assert_eq!(view.get(3, 0), None);
        assert_eq!(view.get(0, 2), None);
    }

    #[test]
    fn short_buffer_reads_as_unreadable() {
        // Claims 2x2 but only holds one pixel worth of bytes.
        let img = RgbaImageU8::new(2, 2, vec![5, 5, 5, 5]);
        assert_eq!(img.get_pixel(0, 0), Some([5, 5, 5, 5]));
        assert_eq!(img.get_pixel(1, 1), None);
    }

    #[test]
    fn put_pixel_ignores_out_of_range() {
        let mut img = RgbaImageU8::from_pixel(2, 2, [0, 0, 0, 0]);
        img.put_pixel(5, 5, [1, 1, 1, 1]);
        assert_eq!(img, RgbaImageU8::from_pixel(2, 2, [0, 0, 0, 0]));
    }
}
