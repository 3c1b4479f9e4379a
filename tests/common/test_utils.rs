use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;

/// Encodes a solid-color PNG for feeding the pipeline in tests.
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
        .unwrap();
    buf
}
