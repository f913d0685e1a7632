//! Circles and their polygon approximations, including the shaded 3D circle.

use super::ChartRenderer;
use super::defaults;
use super::shadow::{ShadowPass, soft_circle_shadow};
use crate::canvas::{Canvas, Effect, Paint, Path, RegionMetadata};
use crate::errors::Result;
use crate::geometry::{regular_polygon, translate_points};
use crate::log::trace;
use crate::style::{
    FillTarget, ShadowDescriptor, StrokeDescriptor, StyleDescriptor, bright_gradient_color,
    build_stroke,
};
use crate::types::{Color, Px, PtPx, RectPx, RectRel};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CircleSpec {
    pub style: StyleDescriptor,
    pub border: StrokeDescriptor,
    pub shadow: ShadowDescriptor,
    /// Two or fewer draws a true ellipse, more an N-sided polygon
    pub sectors: u32,
    /// Shade each sector as if lit from above
    pub three_d: bool,
    pub region: Option<RegionMetadata>,
}

impl CircleSpec {
    pub fn new(style: StyleDescriptor, sectors: u32) -> Self {
        CircleSpec {
            style,
            sectors,
            ..Default::default()
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

    pub fn three_d(mut self) -> Self {
        self.three_d = true;
        self
    }

    pub fn with_region(mut self, region: RegionMetadata) -> Self {
        self.region = Some(region);
        self
    }
}

/// Circle outline: an ellipse, or the polygon through `sectors` rim points
#[derive(Clone, Debug, PartialEq)]
enum Outline {
    Ellipse(RectPx),
    Polygon(Vec<PtPx>),
}

impl Outline {
    fn new(rect: RectPx, sectors: u32) -> Self {
        if sectors <= 2 {
            Outline::Ellipse(rect)
        } else {
            Outline::Polygon(regular_polygon(rect, sectors))
        }
    }

    fn path(&self) -> Path {
        match self {
            Outline::Ellipse(rect) => Path::ellipse(*rect),
            Outline::Polygon(points) => Path::polygon(points),
        }
    }

    fn fill(&self, canvas: &mut dyn Canvas, paint: &Paint) {
        match self {
            Outline::Ellipse(rect) => canvas.fill_ellipse(*rect, paint),
            Outline::Polygon(points) => canvas.fill_polygon(points, paint),
        }
    }

    fn offset(&self, d: f64) -> Outline {
        match self {
            Outline::Ellipse(rect) => Outline::Ellipse(rect.offset(Px(d), Px(d))),
            Outline::Polygon(points) => Outline::Polygon(translate_points(points, d, d)),
        }
    }
}

/// Brightness of the sector ending at `end` degrees (clockwise from the top)
/// in a circle cut into `step`-degree sectors.
///
/// The angle is measured from the top, skewed towards the light and folded at
/// 180 so the bottom is darkest. The sector next to the bottom of a
/// five-sector circle is pulled back to avoid a dark seam.
pub fn sector_brightness(step: f64, end: f64) -> f64 {
    let mut angle = end - step / 2.0;
    if step == 72.0 && angle == 180.0 {
        angle *= defaults::FIVE_SECTOR_SEAM;
    }
    let mut angle = (angle + defaults::CIRCLE_LIGHT_SKEW).rem_euclid(360.0);
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle / 180.0
}

fn paint_three_d(canvas: &mut dyn Canvas, rect: RectPx, sectors: u32, primary: Color) {
    if sectors <= 2 {
        let step = defaults::FINE_SECTOR_DEGREES;
        let count = (360.0 / step) as u32;
        for i in 0..count {
            let start = f64::from(i) * step;
            let color = bright_gradient_color(primary, sector_brightness(step, start + step));
            // canvas angles start at 3 o'clock
            canvas.fill_pie(rect, start - 90.0, step, &Paint::solid(color));
        }
        return;
    }
    let center = rect.center();
    let rim = regular_polygon(rect, sectors);
    let step = 360.0 / f64::from(sectors);
    for (i, p) in rim.iter().enumerate() {
        let next = rim[(i + 1) % rim.len()];
        let end = (i + 1) as f64 * step;
        let color = bright_gradient_color(primary, sector_brightness(step, end));
        canvas.fill_polygon(&[center, *p, next], &Paint::solid(color));
    }
}

fn paint_circle_shadow(canvas: &mut dyn Canvas, outline: &Outline, pass: &ShadowPass) {
    match (outline, pass.soft) {
        (Outline::Ellipse(rect), true) => {
            let (area, paint) = soft_circle_shadow(*rect, pass);
            canvas.fill_ellipse(area, &paint);
        }
        (Outline::Polygon(_), true) => {
            let paint = Paint::solid(pass.color).with_effect(Effect::Blur {
                sigma: pass.sigma(),
            });
            outline.offset(pass.offset).fill(canvas, &paint);
        }
        (_, false) => {
            outline
                .offset(pass.offset)
                .fill(canvas, &Paint::solid(pass.hard_color()));
        }
    }
}

impl<C: Canvas> ChartRenderer<C> {
    pub fn draw_circle_rel(&mut self, rect: RectRel, spec: &CircleSpec) -> Result<()> {
        if rect.is_empty() {
            trace!("empty circle skipped");
            return Ok(());
        }
        let rect = self.space.to_absolute(rect)?;
        self.draw_circle_abs(rect, spec)
    }

    pub fn draw_circle_abs(&mut self, rect: RectPx, spec: &CircleSpec) -> Result<()> {
        if rect.is_empty() || !rect.is_finite() {
            trace!("empty circle skipped");
            return Ok(());
        }
        let outline = Outline::new(rect, spec.sectors);
        let fill = self
            .resolver
            .build_fill(&spec.style, rect, FillTarget::Shape)?;
        let shadow = match &fill {
            Some(paint) => self.shadow_pass(&spec.shadow, paint.alpha()),
            None => None,
        };

        let canvas: &mut dyn Canvas = &mut self.canvas;
        if let Some(pass) = shadow {
            paint_circle_shadow(canvas, &outline, &pass);
        }
        match (spec.three_d, spec.style.primary) {
            (true, Some(primary)) if !primary.is_transparent() => {
                paint_three_d(canvas, rect, spec.sectors, primary);
            }
            _ => {
                if let Some(paint) = &fill {
                    outline.fill(canvas, paint);
                }
            }
        }
        if let Some(stroke) = build_stroke(&spec.border) {
            match &outline {
                Outline::Ellipse(rect) => canvas.draw_ellipse(*rect, &stroke),
                Outline::Polygon(points) => canvas.draw_polygon(points, &stroke),
            }
        }

        self.report_region(&outline.path(), spec.region.as_ref());
        Ok(())
    }
}
