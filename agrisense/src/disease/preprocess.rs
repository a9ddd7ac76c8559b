//! Image Preprocessing
//!
//! Decodes raw request bytes and converts them into the normalized
//! channel-first layout the disease classifier was trained on: shorter
//! side resized to 256 preserving aspect ratio, center crop to 256x256,
//! pixel values scaled to [0, 1]. No mean/std normalization is applied;
//! the trained weights expect raw [0, 1] intensities.

use image::{imageops::FilterType, DynamicImage};

use crate::error::{Error, Result};

/// Spatial size fed to the classifier
pub const TARGET_SIZE: u32 = 256;

/// A decoded, normalized RGB image in CHW layout with values in [0, 1].
///
/// Produced fresh per request and discarded with the response; never cached.
#[derive(Debug, Clone)]
pub struct ImageTensor {
    data: Vec<f32>,
    height: usize,
    width: usize,
}

impl ImageTensor {
    /// Flattened CHW data: all R values, then all G, then all B
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Decode and normalize raw image bytes.
///
/// Pure function of the input bytes; fails with `ImageDecode` if the
/// bytes do not form a valid image.
pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor> {
    if bytes.is_empty() {
        return Err(Error::ImageDecode("empty byte buffer".to_string()));
    }

    let image = image::load_from_memory(bytes)?;

    let resized = resize_shorter_side(&image, TARGET_SIZE);
    let cropped = center_crop(&resized, TARGET_SIZE);
    Ok(normalize(&cropped))
}

/// Resize so the shorter side equals `target`, preserving aspect ratio.
/// The triangle filter is the same deterministic bilinear resampling the
/// model saw during training.
fn resize_shorter_side(image: &DynamicImage, target: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    let (new_width, new_height) = if width <= height {
        let scale = target as f32 / width as f32;
        (target, ((height as f32 * scale).round() as u32).max(1))
    } else {
        let scale = target as f32 / height as f32;
        (((width as f32 * scale).round() as u32).max(1), target)
    };

    image.resize_exact(new_width, new_height, FilterType::Triangle)
}

/// Center-crop to a square `size` x `size` window.
fn center_crop(image: &DynamicImage, size: u32) -> DynamicImage {
    let x = (image.width() - size.min(image.width())) / 2;
    let y = (image.height() - size.min(image.height())) / 2;
    image.crop_imm(x, y, size, size)
}

/// Scale to [0, 1] floats in CHW layout
fn normalize(image: &DynamicImage) -> ImageTensor {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let num_pixels = (width * height) as usize;

    // Pre-allocate for CHW layout
    let mut data = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        data[i] = pixel[0] as f32 / 255.0;
        data[num_pixels + i] = pixel[1] as f32 / 255.0;
        data[2 * num_pixels + i] = pixel[2] as f32 / 255.0;
    }

    ImageTensor {
        data,
        height: height as usize,
        width: width as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_preprocess_shape() {
        let tensor = preprocess(&encode_png(100, 80)).unwrap();
        assert_eq!(tensor.height(), 256);
        assert_eq!(tensor.width(), 256);
        assert_eq!(tensor.data().len(), 3 * 256 * 256);
    }

    #[test]
    fn test_preprocess_value_range() {
        let tensor = preprocess(&encode_png(64, 64)).unwrap();
        assert!(tensor.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_preprocess_rejects_garbage() {
        let err = preprocess(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::ImageDecode(_)));
    }

    #[test]
    fn test_preprocess_rejects_empty() {
        let err = preprocess(&[]).unwrap_err();
        assert!(matches!(err, Error::ImageDecode(_)));
    }

    #[test]
    fn test_resize_shorter_side_landscape() {
        let img = DynamicImage::new_rgb8(100, 80);
        let resized = resize_shorter_side(&img, 256);
        assert_eq!(resized.height(), 256);
        assert_eq!(resized.width(), 320);
    }

    #[test]
    fn test_resize_shorter_side_portrait() {
        let img = DynamicImage::new_rgb8(80, 100);
        let resized = resize_shorter_side(&img, 256);
        assert_eq!(resized.width(), 256);
        assert_eq!(resized.height(), 320);
    }
}
