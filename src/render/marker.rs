//! Point markers.
//!
//! Each marker style has its own painter; [`MarkerShape`] dispatches to them.
//! A painter draws the shadow first, then the fill, then the border.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use enum_dispatch::enum_dispatch;

use super::ChartRenderer;
use super::guard::TransformGuard;
use super::shadow::{ShadowPass, soft_circle_shadow};
use crate::canvas::{Canvas, Effect, Image, Paint, Path, RegionMetadata, Stroke};
use crate::errors::{RenderError, Result};
use crate::geometry::{
    cross_polygon, diamond_polygon, star_polygon, translate_points, triangle_polygon,
};
use crate::log::trace;
use crate::style::{ShadowDescriptor, StrokeDescriptor, build_stroke, named_enum};
use crate::types::{Color, Point, Px, PtPx, PtRel, Rect, RectPx, Size, SizePx};

named_enum! {
    MarkerStyle, "marker style" {
        None = 0,
        Square = 1,
        Circle = 2,
        Diamond = 3,
        Triangle = 4,
        Cross = 5,
        Star4 = 6,
        Star5 = 7,
        Star6 = 8,
        Star10 = 9,
        Image = 10,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDescriptor {
    pub style: MarkerStyle,
    /// Side of the marker's bounding square in pixels
    pub size: f64,
    pub color: Option<Color>,
    pub border: StrokeDescriptor,
    pub shadow: ShadowDescriptor,
    /// Takes precedence over `style` when set
    pub image: Option<String>,
    pub transparent_color: Option<Color>,
    /// Explicit drawing size of the image; otherwise the loader decides
    pub image_size: Option<SizePx>,
    pub region: Option<RegionMetadata>,
}

impl MarkerDescriptor {
    pub fn new(style: MarkerStyle, size: f64, color: Color) -> Self {
        MarkerDescriptor {
            style,
            size,
            color: Some(color),
            border: StrokeDescriptor::default(),
            shadow: ShadowDescriptor::default(),
            image: None,
            transparent_color: None,
            image_size: None,
            region: None,
        }
    }

    pub fn with_border(mut self, border: StrokeDescriptor) -> Self {
        self.border = border;
        self
    }

    pub fn with_shadow(mut self, shadow: ShadowDescriptor) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: RegionMetadata) -> Self {
        self.region = Some(region);
        self
    }
}

/// Resolved inputs of one marker draw
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerJob {
    pub center: PtPx,
    pub size: f64,
    /// Bounding square
    pub rect: RectPx,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub shadow: Option<ShadowPass>,
}

impl MarkerJob {
    fn fill_and_stroke_polygon(&self, canvas: &mut dyn Canvas, points: &[PtPx]) {
        if let Some(paint) = &self.fill {
            canvas.fill_polygon(points, paint);
        }
        if let Some(stroke) = &self.stroke {
            canvas.draw_polygon(points, stroke);
        }
    }
}

fn blurred(pass: &ShadowPass) -> Paint {
    Paint::solid(pass.color).with_effect(Effect::Blur {
        sigma: pass.sigma(),
    })
}

#[enum_dispatch]
pub trait MarkerPainter {
    fn outline(&self, job: &MarkerJob) -> Path;

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass);

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob);
}

#[enum_dispatch(MarkerPainter)]
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerShape {
    Square(SquareMarker),
    Circle(CircleMarker),
    Diamond(DiamondMarker),
    Triangle(TriangleMarker),
    Cross(CrossMarker),
    Star(StarMarker),
    Image(ImageMarker),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SquareMarker;

impl MarkerPainter for SquareMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::rect(job.rect)
    }

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        let rect = job.rect.offset(Px(pass.offset), Px(pass.offset));
        if pass.soft {
            canvas.fill_rect(rect, &blurred(pass));
        } else {
            canvas.fill_rect(rect, &Paint::solid(pass.hard_color()));
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        if let Some(paint) = &job.fill {
            canvas.fill_rect(job.rect, paint);
        }
        if let Some(stroke) = &job.stroke {
            canvas.draw_rect(job.rect, stroke);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CircleMarker;

impl MarkerPainter for CircleMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::ellipse(job.rect)
    }

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        if pass.soft {
            let (area, paint) = soft_circle_shadow(job.rect, pass);
            canvas.fill_ellipse(area, &paint);
        } else {
            let rect = job.rect.offset(Px(pass.offset), Px(pass.offset));
            canvas.fill_ellipse(rect, &Paint::solid(pass.hard_color()));
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        if let Some(paint) = &job.fill {
            canvas.fill_ellipse(job.rect, paint);
        }
        if let Some(stroke) = &job.stroke {
            canvas.draw_ellipse(job.rect, stroke);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiamondMarker;

impl MarkerPainter for DiamondMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::polygon(&diamond_polygon(job.rect))
    }

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        if !pass.soft {
            let points = translate_points(&diamond_polygon(job.rect), pass.offset, pass.offset);
            canvas.fill_polygon(&points, &Paint::solid(pass.hard_color()));
            return;
        }
        // In the frame turned by 45 degrees the diamond is a square and the
        // screen offset (d, d) lies along the x axis.
        let side = job.size * FRAC_1_SQRT_2;
        let center = job.center.offset(Px(pass.offset * SQRT_2), Px(0.0));
        let square = Rect::new(
            center.x - Px(side / 2.0),
            center.y - Px(side / 2.0),
            Px(side),
            Px(side),
        );
        let mut rotated = TransformGuard::rotated(canvas, 45.0, job.center);
        rotated.fill_rect(square, &blurred(pass));
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        job.fill_and_stroke_polygon(canvas, &diamond_polygon(job.rect));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriangleMarker;

impl MarkerPainter for TriangleMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::polygon(&triangle_polygon(job.rect))
    }

    /// Cast by the outline only
    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        let width = job.stroke.as_ref().map_or(1.0, |s| s.width.max(1.0));
        let stroke = Stroke::solid(pass.color, width).with_effect(pass.drop_shadow(true));
        canvas.draw_polygon(&triangle_polygon(job.rect), &stroke);
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        job.fill_and_stroke_polygon(canvas, &triangle_polygon(job.rect));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrossMarker;

impl MarkerPainter for CrossMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::polygon(&cross_polygon(job.center, job.size))
    }

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        let points = cross_polygon(job.center, job.size);
        if pass.soft {
            let d = pass.offset + 1.0;
            canvas.fill_polygon(&translate_points(&points, d, d), &blurred(pass));
        } else {
            let d = pass.offset;
            let paint = Paint::solid(pass.hard_color());
            canvas.fill_polygon(&translate_points(&points, d, d), &paint);
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        job.fill_and_stroke_polygon(canvas, &cross_polygon(job.center, job.size));
    }
}

/// Star with the given number of outer corners
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarMarker(pub u32);

impl MarkerPainter for StarMarker {
    fn outline(&self, job: &MarkerJob) -> Path {
        Path::polygon(&star_polygon(job.rect, self.0))
    }

    fn paint_shadow(&self, canvas: &mut dyn Canvas, job: &MarkerJob, pass: &ShadowPass) {
        let points = star_polygon(job.rect, self.0);
        if pass.soft {
            let paint = Paint::solid(pass.color).with_effect(pass.drop_shadow(true));
            canvas.fill_polygon(&points, &paint);
        } else {
            let points = translate_points(&points, pass.offset, pass.offset);
            canvas.fill_polygon(&points, &Paint::solid(pass.hard_color()));
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        job.fill_and_stroke_polygon(canvas, &star_polygon(job.rect, self.0));
    }
}

/// Loaded image blitted into a fixed rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct ImageMarker {
    pub image: Arc<Image>,
    pub dest: RectPx,
}

impl MarkerPainter for ImageMarker {
    fn outline(&self, _job: &MarkerJob) -> Path {
        Path::rect(self.dest)
    }

    /// The shadow rides on the image blit itself
    fn paint_shadow(&self, _canvas: &mut dyn Canvas, _job: &MarkerJob, _pass: &ShadowPass) {}

    fn paint(&self, canvas: &mut dyn Canvas, job: &MarkerJob) {
        let effect = job.shadow.map(|pass| pass.drop_shadow(false));
        canvas.draw_image(&self.image, self.dest, effect.as_ref());
    }
}

/// Square of side `size` centred on `center`
fn centered(center: PtPx, size: SizePx) -> RectPx {
    Rect::from_origin_size(
        Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

impl<C: Canvas> ChartRenderer<C> {
    pub fn draw_marker_rel(&mut self, center: PtRel, marker: &MarkerDescriptor) -> Result<()> {
        let center = self.space.to_absolute(center)?;
        self.draw_marker_abs(center, marker)
    }

    /// Draw a marker centred on `center`. An unusable image style is an
    /// `InvalidOperation`; a zero size or a missing image draws nothing.
    pub fn draw_marker_abs(&mut self, center: PtPx, marker: &MarkerDescriptor) -> Result<()> {
        let Some(shape) = self.marker_shape(center, marker)? else {
            return Ok(());
        };
        let rect = centered(center, Size::new(Px(marker.size), Px(marker.size)));
        let fill = marker
            .color
            .filter(|c| !c.is_transparent())
            .map(Paint::solid);
        let shadow = self.shadow_pass(&marker.shadow, fill.as_ref().map_or(255, Paint::alpha));
        let job = MarkerJob {
            center,
            size: marker.size,
            rect,
            fill,
            stroke: build_stroke(&marker.border),
            shadow,
        };

        let canvas: &mut dyn Canvas = &mut self.canvas;
        if let Some(pass) = &job.shadow {
            shape.paint_shadow(canvas, &job, pass);
        }
        shape.paint(canvas, &job);

        self.report_region(&shape.outline(&job), marker.region.as_ref());
        Ok(())
    }

    fn marker_shape(
        &mut self,
        center: PtPx,
        marker: &MarkerDescriptor,
    ) -> Result<Option<MarkerShape>> {
        if let Some(name) = &marker.image {
            let Some(image) = self.resolver.load_image(name, marker.transparent_color) else {
                trace!(image = name.as_str(), "marker image unavailable");
                return Ok(None);
            };
            let size = marker
                .image_size
                .unwrap_or_else(|| self.resolver.image_size(&image));
            if size.is_empty() {
                return Ok(None);
            }
            let dest = centered(center, size);
            return Ok(Some(MarkerShape::Image(ImageMarker { image, dest })));
        }
        if marker.size.is_nan() || marker.size <= 0.0 {
            trace!(size = marker.size, "empty marker skipped");
            return Ok(None);
        }
        Ok(Some(match marker.style {
            MarkerStyle::None => return Ok(None),
            MarkerStyle::Square => SquareMarker.into(),
            MarkerStyle::Circle => CircleMarker.into(),
            MarkerStyle::Diamond => DiamondMarker.into(),
            MarkerStyle::Triangle => TriangleMarker.into(),
            MarkerStyle::Cross => CrossMarker.into(),
            MarkerStyle::Star4 => StarMarker(4).into(),
            MarkerStyle::Star5 => StarMarker(5).into(),
            MarkerStyle::Star6 => StarMarker(6).into(),
            MarkerStyle::Star10 => StarMarker(10).into(),
            MarkerStyle::Image => {
                return Err(RenderError::invalid_operation(
                    "marker style",
                    "Image without an image reference",
                ));
            }
        }))
    }
}
