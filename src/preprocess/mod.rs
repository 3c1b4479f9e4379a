use crate::{Error, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array3;
use tracing::debug;

/// Target resolution the classifier was trained on.
pub const IMAGE_SIZE: (u32, u32) = (224, 224);

/// ImageNet channel statistics used during training.
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Deterministic image -> normalized CHW tensor transform.
///
/// Resizes with bilinear interpolation, converts to RGB, rescales pixel
/// intensities to [0, 1] and applies per-channel normalization. The same
/// input bytes and constants always produce a bit-identical tensor.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    size: (u32, u32),
    mean: [f32; 3],
    std: [f32; 3],
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(IMAGE_SIZE, MEAN, STD)
    }
}

impl ImagePreprocessor {
    pub fn new(size: (u32, u32), mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { size, mean, std }
    }

    /// Decodes raw upload bytes into a color image.
    ///
    /// The filename is only used for error context; decoding itself is
    /// format-sniffed from the bytes.
    pub fn decode(&self, bytes: &[u8], filename: &str) -> Result<DynamicImage> {
        if bytes.is_empty() {
            return Err(Error::invalid_image(filename, "empty image data"));
        }

        let img = image::load_from_memory(bytes)
            .map_err(|e| Error::invalid_image(filename, format!("failed to decode: {}", e)))?;

        debug!(
            "Decoded '{}': {}x{} pixels",
            filename,
            img.width(),
            img.height()
        );

        Ok(img)
    }

    /// Produces the normalized `(3, H, W)` tensor the classifier consumes.
    pub fn prepare(&self, image: &DynamicImage) -> Array3<f32> {
        let (width, height) = self.size;
        let resized = image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgb8();

        let mut tensor = Array3::<f32>::zeros((3, height as usize, width as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                let value = pixel[channel] as f32 / 255.0;
                tensor[[channel, y as usize, x as usize]] =
                    (value - self.mean[channel]) / self.std[channel];
            }
        }

        tensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let preprocessor = ImagePreprocessor::default();
        let err = preprocessor
            .decode(b"definitely not an image", "garbage.png")
            .unwrap_err();
        match err {
            crate::Error::InvalidImage { filename, .. } => assert_eq!(filename, "garbage.png"),
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        let preprocessor = ImagePreprocessor::default();
        assert!(matches!(
            preprocessor.decode(&[], "empty.jpg"),
            Err(crate::Error::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_prepare_output_shape() {
        let preprocessor = ImagePreprocessor::default();
        let img = preprocessor.decode(&solid_png(640, 480, [10, 20, 30]), "a.png").unwrap();
        let tensor = preprocessor.prepare(&img);
        assert_eq!(tensor.dim(), (3, 224, 224));
    }

    #[test]
    fn test_prepare_normalizes_per_channel() {
        let preprocessor = ImagePreprocessor::default();
        let img = preprocessor
            .decode(&solid_png(32, 32, [255, 0, 127]), "solid.png")
            .unwrap();
        let tensor = preprocessor.prepare(&img);

        let expected_r = (1.0 - MEAN[0]) / STD[0];
        let expected_g = (0.0 - MEAN[1]) / STD[1];
        let expected_b = (127.0 / 255.0 - MEAN[2]) / STD[2];

        assert!((tensor[[0, 100, 100]] - expected_r).abs() < 1e-6);
        assert!((tensor[[1, 100, 100]] - expected_g).abs() < 1e-6);
        assert!((tensor[[2, 100, 100]] - expected_b).abs() < 1e-6);
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let preprocessor = ImagePreprocessor::default();
        let bytes = solid_png(300, 200, [42, 84, 168]);
        let img = preprocessor.decode(&bytes, "repeat.png").unwrap();

        let first = preprocessor.prepare(&img);
        let second = preprocessor.prepare(&img);
        assert_eq!(first, second);

        // Decoding again from the same bytes must also reproduce the tensor.
        let img_again = preprocessor.decode(&bytes, "repeat.png").unwrap();
        assert_eq!(first, preprocessor.prepare(&img_again));
    }

    #[test]
    fn test_grayscale_converts_to_three_channels() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(64, 64, image::Luma([200])));
        let mut buf = Vec::new();
        gray.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();

        let preprocessor = ImagePreprocessor::default();
        let img = preprocessor.decode(&buf, "gray.png").unwrap();
        let tensor = preprocessor.prepare(&img);
        assert_eq!(tensor.dim(), (3, 224, 224));
    }
}
