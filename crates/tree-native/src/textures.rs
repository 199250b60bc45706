//! Photo decoding for the panels.
//!
//! Every photo is centre-cropped to a square and resized to one fixed size so
//! the whole set fits a single 2D texture array. Layer 0 is a neutral
//! placeholder that stands in for any photo that is missing or fails to decode.

use image::{imageops, Rgba, RgbaImage};
use std::path::Path;
use tree_core::TextureProvider;

/// Edge length of every photo layer, in texels.
pub const PHOTO_TEXTURE_SIZE: u32 = 256;
const PLACEHOLDER_LAYER: u32 = 0;
const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([214, 208, 196, 255]);

pub struct ImageTextureProvider {
    size: u32,
    layers: Vec<RgbaImage>,
}

impl ImageTextureProvider {
    pub fn new(size: u32) -> Self {
        let size = size.max(1);
        Self {
            size,
            layers: vec![RgbaImage::from_pixel(size, size, PLACEHOLDER_COLOR)],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Decoded layers in upload order, placeholder first.
    pub fn layers(&self) -> &[RgbaImage] {
        &self.layers
    }

    fn decode(&self, path: &Path) -> anyhow::Result<RgbaImage> {
        let img = image::open(path)?.to_rgba8();
        Ok(square_fit(&img, self.size))
    }
}

impl TextureProvider for ImageTextureProvider {
    /// Texture array layer.
    type Handle = u32;

    fn load(&mut self, paths: &[String]) -> Vec<u32> {
        let mut handles = Vec::with_capacity(paths.len());
        let mut missing = 0usize;
        for path in paths {
            match self.decode(Path::new(path)) {
                Ok(img) => {
                    handles.push(self.layers.len() as u32);
                    self.layers.push(img);
                }
                Err(err) => {
                    log::warn!("[photos] {}: {} (using placeholder)", path, err);
                    missing += 1;
                    handles.push(PLACEHOLDER_LAYER);
                }
            }
        }
        log::info!(
            "[photos] loaded {}/{} photos at {}px",
            paths.len() - missing,
            paths.len(),
            self.size
        );
        handles
    }
}

/// Centre-crop to a square, then resize to `size × size`.
fn square_fit(src: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let side = w.min(h).max(1);
    let crop = imageops::crop_imm(src, (w - side.min(w)) / 2, (h - side.min(h)) / 2, side, side)
        .to_image();
    imageops::resize(&crop, size, size, imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_photos_fall_back_to_the_placeholder() {
        let mut provider = ImageTextureProvider::new(8);
        let paths = vec!["does/not/exist/1.jpg".to_string(); 3];
        let handles = provider.load(&paths);
        assert_eq!(handles, vec![PLACEHOLDER_LAYER; 3]);
        assert_eq!(provider.layers().len(), 1);
    }

    #[test]
    fn square_fit_crops_landscape_photos() {
        let mut src = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 255]));
        for y in 0..20 {
            for x in 10..30 {
                src.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let out = square_fit(&src, 10);
        assert_eq!(out.dimensions(), (10, 10));
        // only the white centre survives the crop
        assert!(out.pixels().all(|p| p.0[0] > 200));
    }
}
