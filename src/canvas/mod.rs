//! The drawing surface the renderers target.
//!
//! This module is organized into submodules:
//! - `path`: vector paths in absolute pixels
//! - `paint`: fill shaders, strokes, effects
//! - `image`: in-memory images and the loader collaborator
//! - `metrics`: fallback text measurement
//! - `recording`: a backend that records every call
//! - `raster`: a tiny-skia pixmap backend (feature `raster`)
//!
//! All coordinates passed to a [`Canvas`] are absolute pixels, and are
//! further mapped by the canvas's current transform.

pub mod image;
pub mod metrics;
pub mod paint;
pub mod path;
#[cfg(feature = "raster")]
pub mod raster;
pub mod recording;

use std::cell::RefCell;
use std::rc::Rc;

use glam::DAffine2;

pub use image::{Image, ImageLoader, ImageMap, NoImages};
pub use paint::{
    DashPattern, Effect, GradientStop, ImagePattern, LineCap, LineJoin, LinearGradient, Paint,
    RadialGradient, Shader, SpreadMode, Stroke,
};
pub use path::{Path, PathVerb};
#[cfg(feature = "raster")]
pub use raster::{RasterCanvas, TextRasterizer};
pub use recording::{Command, Recorded, RecordingCanvas};

use crate::types::{Color, PtPx, RectPx, SizePx};

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    /// Em size in pixels
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Font {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Position along one axis of a layout box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    /// Left or top
    #[default]
    Near,
    Center,
    /// Right or bottom
    Far,
}

impl TextAlign {
    pub fn mirrored(self) -> Self {
        match self {
            TextAlign::Near => TextAlign::Far,
            TextAlign::Center => TextAlign::Center,
            TextAlign::Far => TextAlign::Near,
        }
    }

    /// Offset of a span of `inner` length inside `outer`
    pub fn offset(self, outer: f64, inner: f64) -> f64 {
        match self {
            TextAlign::Near => 0.0,
            TextAlign::Center => (outer - inner) / 2.0,
            TextAlign::Far => outer - inner,
        }
    }
}

/// How text sits inside its layout rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TextFormat {
    /// Horizontal alignment
    pub align: TextAlign,
    /// Vertical alignment
    pub line_align: TextAlign,
    /// Clip glyphs to the layout rectangle
    pub clip: bool,
}

/// A clip shape captured with the transform active when it was set
#[derive(Clone, Debug, PartialEq)]
pub struct ClipShape {
    pub path: Path,
    pub transform: DAffine2,
}

/// Intersection of clip shapes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipRegion {
    shapes: Vec<ClipShape>,
}

impl ClipRegion {
    pub fn new(path: Path, transform: DAffine2) -> Self {
        ClipRegion {
            shapes: vec![ClipShape { path, transform }],
        }
    }

    pub fn shapes(&self) -> &[ClipShape] {
        &self.shapes
    }

    /// Narrow this region by another shape
    pub fn intersect(mut self, path: Path, transform: DAffine2) -> Self {
        self.shapes.push(ClipShape { path, transform });
        self
    }
}

/// Minimal drawing surface.
///
/// Backends implement the `*_path` primitives, the text and image calls and
/// the state accessors; the shape helpers default to building a [`Path`].
pub trait Canvas {
    /// Pixel size of the surface
    fn size(&self) -> SizePx;

    fn transform(&self) -> DAffine2;

    fn set_transform(&mut self, transform: DAffine2);

    fn clip(&self) -> Option<ClipRegion>;

    fn set_clip(&mut self, clip: Option<ClipRegion>);

    fn anti_alias(&self) -> bool;

    fn set_anti_alias(&mut self, on: bool);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn draw_path(&mut self, path: &Path, stroke: &Stroke);

    fn draw_text(
        &mut self,
        text: &str,
        font: &Font,
        rect: RectPx,
        format: &TextFormat,
        color: Color,
    );

    fn draw_image(&mut self, image: &Image, dest: RectPx, effect: Option<&Effect>);

    fn measure_text(&self, text: &str, font: &Font, max: Option<SizePx>) -> SizePx {
        metrics::measure(text, font, max)
    }

    fn draw_line(&mut self, from: PtPx, to: PtPx, stroke: &Stroke) {
        self.draw_path(&Path::polyline(&[from, to]), stroke);
    }

    fn draw_rect(&mut self, rect: RectPx, stroke: &Stroke) {
        self.draw_path(&Path::rect(rect), stroke);
    }

    fn fill_rect(&mut self, rect: RectPx, paint: &Paint) {
        self.fill_path(&Path::rect(rect), paint);
    }

    fn draw_ellipse(&mut self, rect: RectPx, stroke: &Stroke) {
        self.draw_path(&Path::ellipse(rect), stroke);
    }

    fn fill_ellipse(&mut self, rect: RectPx, paint: &Paint) {
        self.fill_path(&Path::ellipse(rect), paint);
    }

    fn draw_polygon(&mut self, points: &[PtPx], stroke: &Stroke) {
        self.draw_path(&Path::polygon(points), stroke);
    }

    fn fill_polygon(&mut self, points: &[PtPx], paint: &Paint) {
        self.fill_path(&Path::polygon(points), paint);
    }

    /// Pie sector; angles in degrees, clockwise from +x
    fn draw_pie(&mut self, rect: RectPx, start: f64, sweep: f64, stroke: &Stroke) {
        self.draw_path(&Path::pie(rect, start, sweep), stroke);
    }

    fn fill_pie(&mut self, rect: RectPx, start: f64, sweep: f64, paint: &Paint) {
        self.fill_path(&Path::pie(rect, start, sweep), paint);
    }
}

/// Opaque caller data attached to a hot region
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMetadata {
    pub object: String,
    pub point_index: Option<usize>,
    pub tooltip: Option<String>,
}

impl RegionMetadata {
    pub fn new(object: impl Into<String>) -> Self {
        RegionMetadata {
            object: object.into(),
            ..Default::default()
        }
    }

    pub fn with_point(mut self, index: usize) -> Self {
        self.point_index = Some(index);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Receives clickable regions when region processing is on.
pub trait HotRegionRegistry {
    /// `shape` is in absolute pixels, already mapped by the canvas transform
    fn add_region(&mut self, shape: &Path, metadata: &RegionMetadata);
}

impl HotRegionRegistry for Vec<(Path, RegionMetadata)> {
    fn add_region(&mut self, shape: &Path, metadata: &RegionMetadata) {
        self.push((shape.clone(), metadata.clone()));
    }
}

/// Lets the caller keep a handle on a registry owned by the renderer
impl<R: HotRegionRegistry> HotRegionRegistry for Rc<RefCell<R>> {
    fn add_region(&mut self, shape: &Path, metadata: &RegionMetadata) {
        self.borrow_mut().add_region(shape, metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_offsets() {
        assert_eq!(TextAlign::Near.offset(10.0, 4.0), 0.0);
        assert_eq!(TextAlign::Center.offset(10.0, 4.0), 3.0);
        assert_eq!(TextAlign::Far.offset(10.0, 4.0), 6.0);
        assert_eq!(TextAlign::Far.mirrored(), TextAlign::Near);
    }

    #[test]
    fn shared_registry_collects() {
        let shared: Rc<RefCell<Vec<(Path, RegionMetadata)>>> = Rc::default();
        let mut handle: Box<dyn HotRegionRegistry> = Box::new(shared.clone());
        handle.add_region(&Path::new(), &RegionMetadata::new("bar").with_point(3));
        assert_eq!(shared.borrow().len(), 1);
        assert_eq!(shared.borrow()[0].1.point_index, Some(3));
    }
}
