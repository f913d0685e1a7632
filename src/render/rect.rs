//! Rectangles: fill, texture, border, shadow and the decorative 3D bar finishes.
//!
//! A finish is painted over the base fill and is computed from the fill
//! rectangle only. Every finish works in a bar-local frame where `u` runs
//! across the bar (its thickness) and `v` along it (its length), so the same
//! code serves vertical and horizontal bars.

use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use super::ChartRenderer;
use super::defaults;
use super::shadow::{ShadowPass, soft_rect_shadow};
use crate::canvas::{
    Canvas, GradientStop, LinearGradient, Paint, Path, RegionMetadata, SpreadMode, Stroke,
};
use crate::errors::{RenderError, Result};
use crate::log::trace;
use crate::style::{
    BorderAlignment, FillTarget, ShadowDescriptor, StrokeDescriptor, StyleDescriptor, build_stroke,
};
use crate::types::{Color, Point, Px, PtPx, RectPx, RectRel};

/// Everything needed to draw one rectangle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectangleSpec {
    pub style: StyleDescriptor,
    pub border: StrokeDescriptor,
    pub shadow: ShadowDescriptor,
    pub finish: BarFinish,
    /// Bars grow vertically; the thickness is then the width
    pub vertical: bool,
    pub region: Option<RegionMetadata>,
}

impl RectangleSpec {
    pub fn new(style: StyleDescriptor) -> Self {
        RectangleSpec {
            style,
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

    pub fn with_finish(mut self, finish: BarFinish, vertical: bool) -> Self {
        self.finish = finish;
        self.vertical = vertical;
        self
    }

    pub fn with_region(mut self, region: RegionMetadata) -> Self {
        self.region = Some(region);
        self
    }
}

/// Fill rectangle seen as a bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarFrame {
    pub rect: RectPx,
    pub vertical: bool,
}

impl BarFrame {
    pub fn thickness(&self) -> f64 {
        if self.vertical {
            self.rect.width.0
        } else {
            self.rect.height.0
        }
    }

    pub fn length(&self) -> f64 {
        if self.vertical {
            self.rect.height.0
        } else {
            self.rect.width.0
        }
    }

    /// Canvas point for bar-local `(u, v)`
    pub fn at(&self, u: f64, v: f64) -> PtPx {
        let (l, t) = (self.rect.left().0, self.rect.top().0);
        if self.vertical {
            Point::new(Px(l + u), Px(t + v))
        } else {
            Point::new(Px(l + v), Px(t + u))
        }
    }

    /// Full-length band between two thickness offsets
    fn band(&self, u0: f64, u1: f64) -> [PtPx; 4] {
        let len = self.length();
        [self.at(u0, 0.0), self.at(u1, 0.0), self.at(u1, len), self.at(u0, len)]
    }

    /// Band shaded across the thickness from `c0` at `u0` to `c1` at `u1`
    fn shade_band(&self, canvas: &mut dyn Canvas, u0: f64, u1: f64, c0: Color, c1: Color) {
        let paint = Paint::linear(LinearGradient {
            start: self.at(u0, 0.0),
            end: self.at(u1, 0.0),
            stops: vec![GradientStop::new(0.0, c0), GradientStop::new(1.0, c1)],
            spread: SpreadMode::Pad,
        });
        canvas.fill_polygon(&self.band(u0, u1), &paint);
    }
}

#[enum_dispatch]
pub trait FinishPainter {
    /// Paint the overlay on top of an already filled bar
    fn paint(&self, canvas: &mut dyn Canvas, bar: &BarFrame);
}

/// Decorative overlay drawn after a bar's base fill
#[enum_dispatch(FinishPainter)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarFinish {
    Flat(FlatFinish),
    Cylinder(CylinderFinish),
    Emboss(EmbossFinish),
    LightToDark(LightToDarkFinish),
    Wedge(WedgeFinish),
}

impl Default for BarFinish {
    fn default() -> Self {
        BarFinish::Flat(FlatFinish)
    }
}

impl BarFinish {
    pub const FLAT: BarFinish = BarFinish::Flat(FlatFinish);
    pub const CYLINDER: BarFinish = BarFinish::Cylinder(CylinderFinish);
    pub const EMBOSS: BarFinish = BarFinish::Emboss(EmbossFinish);
    pub const LIGHT_TO_DARK: BarFinish = BarFinish::LightToDark(LightToDarkFinish);
    pub const WEDGE: BarFinish = BarFinish::Wedge(WedgeFinish);

    pub fn name(&self) -> &'static str {
        match self {
            BarFinish::Flat(_) => "flat",
            BarFinish::Cylinder(_) => "cylinder",
            BarFinish::Emboss(_) => "emboss",
            BarFinish::LightToDark(_) => "light-to-dark",
            BarFinish::Wedge(_) => "wedge",
        }
    }
}

impl TryFrom<u8> for BarFinish {
    type Error = RenderError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => BarFinish::FLAT,
            1 => BarFinish::CYLINDER,
            2 => BarFinish::EMBOSS,
            3 => BarFinish::LIGHT_TO_DARK,
            4 => BarFinish::WEDGE,
            other => return Err(RenderError::invalid_operation("bar finish", other)),
        })
    }
}

impl FromStr for BarFinish {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ok(match key.as_str() {
            "flat" | "default" => BarFinish::FLAT,
            "cylinder" => BarFinish::CYLINDER,
            "emboss" => BarFinish::EMBOSS,
            "lighttodark" => BarFinish::LIGHT_TO_DARK,
            "wedge" => BarFinish::WEDGE,
            _ => return Err(RenderError::invalid_operation("bar finish", s)),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatFinish;

impl FinishPainter for FlatFinish {
    fn paint(&self, _canvas: &mut dyn Canvas, _bar: &BarFrame) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CylinderFinish;

impl FinishPainter for CylinderFinish {
    fn paint(&self, canvas: &mut dyn Canvas, bar: &BarFrame) {
        let t = bar.thickness();
        let band = t * defaults::CYLINDER_BAND;
        let light = defaults::CYLINDER_LIGHT;
        let dark = defaults::CYLINDER_DARK;
        bar.shade_band(canvas, 0.0, band, light, light.with_alpha(0));
        bar.shade_band(canvas, t - band, t, dark.with_alpha(0), dark);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightToDarkFinish;

impl FinishPainter for LightToDarkFinish {
    fn paint(&self, canvas: &mut dyn Canvas, bar: &BarFrame) {
        let t = bar.thickness();
        let band = t * defaults::LIGHT_TO_DARK_BAND;
        let light = defaults::LIGHT_TO_DARK_LIGHT;
        let dark = defaults::LIGHT_TO_DARK_DARK;
        bar.shade_band(canvas, 0.0, band, light, light.with_alpha(0));
        bar.shade_band(canvas, t - band, t, dark.with_alpha(0), dark);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EmbossFinish;

impl EmbossFinish {
    pub fn margin(rect: RectPx) -> f64 {
        let side = rect.width.0.min(rect.height.0);
        if side <= defaults::EMBOSS_SMALL {
            1.0
        } else if side <= defaults::EMBOSS_MEDIUM {
            2.0
        } else {
            3.0
        }
    }
}

impl FinishPainter for EmbossFinish {
    fn paint(&self, canvas: &mut dyn Canvas, bar: &BarFrame) {
        let r = bar.rect;
        let m = Self::margin(r);
        let (l, t, rt, b) = (r.left().0, r.top().0, r.right().0, r.bottom().0);
        let p = |x: f64, y: f64| Point::new(Px(x), Px(y));
        let light = [
            p(l, t),
            p(rt, t),
            p(rt - m, t + m),
            p(l + m, t + m),
            p(l + m, b - m),
            p(l, b),
        ];
        let dark = [
            p(rt, b),
            p(l, b),
            p(l + m, b - m),
            p(rt - m, b - m),
            p(rt - m, t + m),
            p(rt, t),
        ];
        canvas.fill_polygon(&light, &Paint::solid(defaults::EMBOSS_LIGHT));
        canvas.fill_polygon(&dark, &Paint::solid(defaults::EMBOSS_DARK));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WedgeFinish;

impl WedgeFinish {
    pub fn size(bar: &BarFrame) -> f64 {
        (bar.thickness() / 2.0)
            .min(bar.length() / 2.0)
            .min(defaults::WEDGE_MAX_SIZE)
    }
}

impl FinishPainter for WedgeFinish {
    fn paint(&self, canvas: &mut dyn Canvas, bar: &BarFrame) {
        let (t, len) = (bar.thickness(), bar.length());
        let s = Self::size(bar);
        let mid = t / 2.0;
        let near = [bar.at(0.0, 0.0), bar.at(mid, s), bar.at(mid, len - s), bar.at(0.0, len)];
        let far = [bar.at(t, 0.0), bar.at(mid, s), bar.at(mid, len - s), bar.at(t, len)];
        canvas.fill_polygon(&near, &Paint::solid(defaults::WEDGE_SHADE_LIGHT));
        canvas.fill_polygon(&far, &Paint::solid(defaults::WEDGE_SHADE_DARK));

        let light = Stroke::solid(defaults::WEDGE_EDGE_LIGHT, 1.0);
        let dark = Stroke::solid(defaults::WEDGE_EDGE_DARK, 1.0);
        canvas.draw_line(near[0], near[1], &light);
        canvas.draw_line(far[0], far[1], &light);
        canvas.draw_line(near[1], near[2], &light);
        canvas.draw_line(near[2], near[3], &dark);
        canvas.draw_line(far[2], far[3], &dark);
    }
}

/// Stroke rectangle for a border of the given alignment
pub fn border_rect(rect: RectPx, width: f64, alignment: BorderAlignment) -> RectPx {
    let half = Px(width / 2.0);
    match alignment {
        BorderAlignment::Center => rect,
        BorderAlignment::Inset => rect.inflate(-half, -half),
        BorderAlignment::Outset => rect.inflate(half, half),
    }
}

impl<C: Canvas> ChartRenderer<C> {
    /// Draw a rectangle given in relative units. Empty rectangles are skipped.
    pub fn fill_rectangle_rel(&mut self, rect: RectRel, spec: &RectangleSpec) -> Result<()> {
        if rect.is_empty() {
            trace!("empty rectangle skipped");
            return Ok(());
        }
        let rect = self.space.to_absolute(rect)?;
        self.fill_rectangle_abs(rect, spec)
    }

    pub fn fill_rectangle_abs(&mut self, rect: RectPx, spec: &RectangleSpec) -> Result<()> {
        if rect.is_empty() || !rect.is_finite() {
            trace!("empty rectangle skipped");
            return Ok(());
        }
        let fill = self
            .resolver
            .build_fill(&spec.style, rect, FillTarget::Shape)?;
        // Nothing casts a shadow when there is no fill.
        let shadow = match &fill {
            Some(paint) => self.shadow_pass(&spec.shadow, paint.alpha()),
            None => None,
        };

        let canvas: &mut dyn Canvas = &mut self.canvas;
        if let Some(pass) = shadow {
            paint_rect_shadow(canvas, rect, &pass);
        }
        if let Some(paint) = &fill {
            canvas.fill_rect(rect, paint);
            spec.finish.paint(
                canvas,
                &BarFrame {
                    rect,
                    vertical: spec.vertical,
                },
            );
        }
        if let Some(stroke) = build_stroke(&spec.border) {
            canvas.draw_rect(border_rect(rect, stroke.width, spec.border.alignment), &stroke);
        }

        self.report_region(&Path::rect(rect), spec.region.as_ref());
        Ok(())
    }
}

fn paint_rect_shadow(canvas: &mut dyn Canvas, rect: RectPx, pass: &ShadowPass) {
    if pass.soft {
        soft_rect_shadow(canvas, rect, pass);
    } else {
        let offset = rect.offset(Px(pass.offset), Px(pass.offset));
        canvas.fill_rect(offset, &Paint::solid(pass.hard_color()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{Command, RecordingCanvas};
    use crate::render::RenderSettings;
    use crate::style::DashKind;
    use crate::types::{Size, rpx, rrel};

    fn renderer() -> ChartRenderer<RecordingCanvas> {
        ChartRenderer::new(RecordingCanvas::new(Size::new(Px(401.0), Px(301.0)))).unwrap()
    }

    #[test]
    fn frame_maps_thickness_across_the_bar() {
        let rect = rpx(10.0, 20.0, 30.0, 100.0);
        let v = BarFrame { rect, vertical: true };
        assert_eq!(v.thickness(), 30.0);
        assert_eq!(v.at(5.0, 50.0), Point::new(Px(15.0), Px(70.0)));
        let h = BarFrame { rect, vertical: false };
        assert_eq!(h.thickness(), 100.0);
        assert_eq!(h.at(5.0, 50.0), Point::new(Px(60.0), Px(25.0)));
    }

    #[test]
    fn emboss_margin_grows_with_size() {
        assert_eq!(EmbossFinish::margin(rpx(0.0, 0.0, 5.0, 50.0)), 1.0);
        assert_eq!(EmbossFinish::margin(rpx(0.0, 0.0, 12.0, 50.0)), 2.0);
        assert_eq!(EmbossFinish::margin(rpx(0.0, 0.0, 40.0, 50.0)), 3.0);
    }

    #[test]
    fn wedge_size_is_capped() {
        let bar = BarFrame {
            rect: rpx(0.0, 0.0, 100.0, 200.0),
            vertical: true,
        };
        assert_eq!(WedgeFinish::size(&bar), defaults::WEDGE_MAX_SIZE);
        let thin = BarFrame {
            rect: rpx(0.0, 0.0, 8.0, 200.0),
            vertical: true,
        };
        assert_eq!(WedgeFinish::size(&thin), 4.0);
    }

    #[test]
    fn finish_decoding() {
        assert_eq!("LightToDark".parse::<BarFinish>().unwrap(), BarFinish::LIGHT_TO_DARK);
        assert_eq!(BarFinish::try_from(4).unwrap(), BarFinish::WEDGE);
        assert!(BarFinish::try_from(9).is_err());
        assert!("chrome".parse::<BarFinish>().is_err());
    }

    #[test]
    fn cylinder_draws_two_bands_over_the_fill() {
        let mut r = renderer();
        let spec = RectangleSpec::new(StyleDescriptor::solid(Color::rgb(0, 0, 255)))
            .with_finish(BarFinish::CYLINDER, true);
        r.fill_rectangle_abs(rpx(10.0, 10.0, 40.0, 100.0), &spec).unwrap();
        let c = r.canvas();
        assert_eq!(c.fill_count(), 3);
        assert!(matches!(c.draws()[0].command, Command::FillRect { .. }));
    }

    #[test]
    fn inset_border_shrinks_by_half_width() {
        let mut r = renderer();
        let spec = RectangleSpec::new(StyleDescriptor::default()).with_border(
            StrokeDescriptor::new(Color::BLACK, 4.0, DashKind::Solid)
                .with_alignment(BorderAlignment::Inset),
        );
        r.fill_rectangle_abs(rpx(10.0, 10.0, 40.0, 40.0), &spec).unwrap();
        let draws = r.canvas().draws();
        assert_eq!(draws.len(), 1);
        let Command::StrokeRect { rect, .. } = &draws[0].command else {
            panic!("stroke-rect expected");
        };
        assert_eq!(*rect, rpx(12.0, 12.0, 36.0, 36.0));
    }

    #[test]
    fn hard_shadow_comes_first_at_half_alpha() {
        let mut r = renderer().with_settings(RenderSettings::default().with_soft_shadows(false));
        let spec = RectangleSpec::new(StyleDescriptor::solid(Color::rgba(255, 0, 0, 200)))
            .with_shadow(ShadowDescriptor::new(3.0, Color::BLACK));
        r.fill_rectangle_abs(rpx(0.0, 0.0, 20.0, 20.0), &spec).unwrap();
        let draws = r.canvas().draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(
            draws[0].command.paint().and_then(Paint::solid_color),
            Some(Color::rgba(0, 0, 0, 100))
        );
    }

    #[test]
    fn unfilled_rectangle_casts_no_shadow() {
        let mut r = renderer();
        let spec = RectangleSpec::new(StyleDescriptor::default())
            .with_shadow(ShadowDescriptor::new(3.0, Color::BLACK))
            .with_border(StrokeDescriptor::new(Color::BLACK, 1.0, DashKind::Solid));
        r.fill_rectangle_abs(rpx(0.0, 0.0, 20.0, 20.0), &spec).unwrap();
        assert_eq!(r.canvas().fill_count(), 0);
        assert_eq!(r.canvas().stroke_count(), 1);
    }

    #[test]
    fn empty_rectangles_draw_nothing() {
        let mut r = renderer();
        let spec = RectangleSpec::new(StyleDescriptor::solid(Color::BLACK));
        r.fill_rectangle_rel(rrel(10.0, 10.0, 0.0, 10.0), &spec).unwrap();
        r.fill_rectangle_abs(rpx(10.0, 10.0, 10.0, -1.0), &spec).unwrap();
        assert!(r.canvas().draws().is_empty());
    }
}
