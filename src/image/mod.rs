pub mod io;
pub mod rgba;
pub mod traits;

pub use self::rgba::{ImageRgba, RgbaImageU8};
pub use self::traits::PixelRead;
