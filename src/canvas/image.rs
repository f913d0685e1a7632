//! In-memory images and the loader collaborator.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{RenderError, Result};
use crate::types::{Color, Px, Size, SizePx};

/// Straight-alpha RGBA image, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(RenderError::invalid_argument(
                "image",
                format!(
                    "{width}x{height} needs {expected} pixels, got {}",
                    pixels.len()
                ),
            ));
        }
        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    /// Build from straight RGBA bytes
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Color::rgba(c[0], c[1], c[2], c[3]))
            .collect();
        Image::new(width, height, pixels)
    }

    /// Image computed pixel by pixel; a zero dimension gives a 1x1 image
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Image {
            width,
            height,
            pixels,
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        Image::new(
            width,
            height,
            vec![color; width as usize * height as usize],
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> SizePx {
        Size::new(Px(f64::from(self.width)), Px(f64::from(self.height)))
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Copy with every pixel whose RGB equals `key` made fully transparent
    pub fn with_key_color(&self, key: Color) -> Image {
        let pixels = self
            .pixels
            .iter()
            .map(|p| {
                if p.r == key.r && p.g == key.g && p.b == key.b {
                    Color::TRANSPARENT
                } else {
                    *p
                }
            })
            .collect();
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Resolves image references used by textures, markers and labels.
pub trait ImageLoader {
    /// `None` means "skip drawing this image"
    fn load_image(&self, name: &str) -> Option<Arc<Image>>;

    /// Size the image should be drawn at on a canvas of the given size
    fn adjusted_size(&self, image: &Image, _canvas: SizePx) -> SizePx {
        image.size()
    }
}

/// Loader that never finds anything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageLoader for NoImages {
    fn load_image(&self, _name: &str) -> Option<Arc<Image>> {
        None
    }
}

/// Loader backed by a name → image map
#[derive(Clone, Debug, Default)]
pub struct ImageMap {
    images: HashMap<String, Arc<Image>>,
}

impl ImageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> &mut Self {
        self.images.insert(name.into(), Arc::new(image));
        self
    }

    pub fn with(mut self, name: impl Into<String>, image: Image) -> Self {
        self.insert(name, image);
        self
    }
}

impl ImageLoader for ImageMap {
    fn load_image(&self, name: &str) -> Option<Arc<Image>> {
        self.images.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_pixel_count() {
        assert!(Image::new(2, 2, vec![Color::BLACK; 3]).is_err());
        assert!(Image::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn key_color_clears_matching_pixels() {
        let img = Image::new(2, 1, vec![Color::WHITE, Color::rgb(1, 2, 3)]).unwrap();
        let keyed = img.with_key_color(Color::WHITE);
        assert_eq!(keyed.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(keyed.pixel(1, 0), Some(Color::rgb(1, 2, 3)));
        assert_eq!(keyed.pixel(2, 0), None);
    }

    #[test]
    fn map_loader_finds_by_name() {
        let loader = ImageMap::new().with("logo", Image::filled(3, 4, Color::BLACK).unwrap());
        assert_eq!(loader.load_image("logo").map(|i| i.width()), Some(3));
        assert!(loader.load_image("missing").is_none());
        assert!(NoImages.load_image("logo").is_none());
    }
}
