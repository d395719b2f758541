use screendiff::image::RgbaImageU8;

/// Generates a solid-color RGBA image.
pub fn uniform_rgba(width: usize, height: usize, pixel: [u8; 4]) -> RgbaImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbaImageU8::from_pixel(width, height, pixel)
}

/// Copy of `base` with a single pixel replaced.
pub fn with_pixel(base: &RgbaImageU8, x: usize, y: usize, pixel: [u8; 4]) -> RgbaImageU8 {
    let mut img = base.clone();
    img.put_pixel(x, y, pixel);
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> RgbaImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = RgbaImageU8::from_pixel(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            let sum = (x / cell) + (y / cell);
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img.put_pixel(x, y, [val, val, val, 255]);
        }
    }
    img
}
