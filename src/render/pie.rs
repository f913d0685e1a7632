//! Pie and doughnut sectors with their shadows and edge effects.

use super::ChartRenderer;
use super::defaults;
use super::guard::ClipGuard;
use super::shadow::ShadowPass;
use crate::canvas::{
    Canvas, GradientStop, LinearGradient, Paint, Path, RadialGradient, RegionMetadata, SpreadMode,
};
use crate::errors::Result;
use crate::log::trace;
use crate::style::{FillTarget, ShadowDescriptor, StrokeDescriptor, StyleDescriptor, build_stroke};
use crate::types::{Color, Px, RectPx, RectRel};

/// Overlay painted on top of a sector's fill
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PieEdge {
    #[default]
    None,
    /// Dished surface: dark to light across an inset sector
    Concave,
    /// Darkened band along the rims
    SoftEdge,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieSpec {
    pub style: StyleDescriptor,
    pub border: StrokeDescriptor,
    pub shadow: ShadowDescriptor,
    /// Ring thickness in percent of the outer radius; `None` is a plain pie
    pub doughnut: Option<f64>,
    pub edge: PieEdge,
    pub region: Option<RegionMetadata>,
}

impl PieSpec {
    pub fn new(style: StyleDescriptor) -> Self {
        PieSpec {
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

    pub fn doughnut(mut self, thickness: f64) -> Self {
        self.doughnut = Some(thickness);
        self
    }

    pub fn with_edge(mut self, edge: PieEdge) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_region(mut self, region: RegionMetadata) -> Self {
        self.region = Some(region);
        self
    }
}

/// `rect` scaled by `factor` around its centre
fn scaled(rect: RectPx, factor: f64) -> RectPx {
    let dx = rect.width * ((1.0 - factor) / 2.0);
    let dy = rect.height * ((1.0 - factor) / 2.0);
    rect.inflate(-dx, -dy)
}

/// Geometry of one sector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    pub outer: RectPx,
    /// Hole of a doughnut
    pub inner: Option<RectPx>,
    pub start: f64,
    pub sweep: f64,
}

impl Sector {
    /// `None` when a zero-thickness ring leaves nothing to draw
    pub fn new(rect: RectPx, start: f64, sweep: f64, doughnut: Option<f64>) -> Option<Self> {
        let inner = match doughnut.map(|t| t.clamp(0.0, 100.0)) {
            None => None,
            Some(t) if t <= 0.0 => return None,
            Some(t) if t >= 100.0 => None,
            Some(t) => Some(scaled(rect, 1.0 - t / 100.0)),
        };
        Some(Sector {
            outer: rect,
            inner,
            start,
            sweep,
        })
    }

    pub fn path(&self) -> Path {
        match self.inner {
            Some(inner) => Path::ring_sector(self.outer, inner, self.start, self.sweep),
            None => Path::pie(self.outer, self.start, self.sweep),
        }
    }

    /// Share of the outer radius covered by the hole
    pub fn inner_ratio(&self) -> f64 {
        self.inner
            .map_or(0.0, |inner| inner.width.0 / self.outer.width.0)
    }

    fn radius(&self) -> f64 {
        self.outer.width.0.min(self.outer.height.0) / 2.0
    }

    /// Same sector pulled `by` pixels in from both rims
    fn inset(&self, by: f64) -> Sector {
        Sector {
            outer: self.outer.inflate(Px(-by), Px(-by)),
            inner: self.inner.map(|r| r.inflate(Px(by), Px(by))),
            ..*self
        }
    }

    fn offset(&self, d: f64) -> Sector {
        Sector {
            outer: self.outer.offset(Px(d), Px(d)),
            inner: self.inner.map(|r| r.offset(Px(d), Px(d))),
            ..*self
        }
    }
}

/// Hard shadows are an offset copy of the sector. Soft ones cover the whole
/// ellipse in place, fading the fill colour from the rim to the centre.
fn paint_pie_shadow(canvas: &mut dyn Canvas, sector: &Sector, pass: &ShadowPass, fill: Color) {
    if !pass.soft {
        let shadow = sector.offset(pass.offset);
        canvas.fill_path(&shadow.path(), &Paint::solid(pass.hard_color()));
        return;
    }
    let area = sector.outer;
    let paint = Paint::radial(RadialGradient {
        center: area.center(),
        radius_x: area.width.0 / 2.0,
        radius_y: area.height.0 / 2.0,
        stops: vec![
            GradientStop::new(0.0, Color::TRANSPARENT),
            GradientStop::new(1.0, fill),
        ],
        spread: SpreadMode::Pad,
    });
    canvas.fill_path(&Path::ellipse(area), &paint);
}

fn paint_concave(canvas: &mut dyn Canvas, sector: &Sector) {
    let inset = sector.inset(sector.radius() * defaults::CONCAVE_INSET_RATIO);
    if inset.outer.is_empty() {
        return;
    }
    let rect = inset.outer;
    let paint = Paint::linear(LinearGradient {
        start: rect.origin(),
        end: rect.corners()[2],
        stops: vec![
            GradientStop::new(0.0, defaults::CONCAVE_DARK),
            GradientStop::new(0.5, Color::TRANSPARENT),
            GradientStop::new(1.0, defaults::CONCAVE_LIGHT),
        ],
        spread: SpreadMode::Pad,
    });
    let mut clipped = ClipGuard::new(canvas, inset.path());
    clipped.fill_rect(rect, &paint);
}

/// Radial stops darkening the outer rim, and the inner rim of a doughnut
pub fn soft_edge_stops(inner_ratio: f64) -> Vec<GradientStop> {
    let band = defaults::SOFT_EDGE_RATIO;
    let edge = defaults::SOFT_EDGE_COLOR;
    let mut stops = Vec::with_capacity(4);
    if inner_ratio > 0.0 {
        stops.push(GradientStop::new(inner_ratio, edge));
        stops.push(GradientStop::new((inner_ratio + band).min(1.0 - band), Color::TRANSPARENT));
    } else {
        stops.push(GradientStop::new(0.0, Color::TRANSPARENT));
    }
    stops.push(GradientStop::new(1.0 - band, Color::TRANSPARENT));
    stops.push(GradientStop::new(1.0, edge));
    stops
}

fn paint_soft_edge(canvas: &mut dyn Canvas, sector: &Sector) {
    let rect = sector.outer;
    let paint = Paint::radial(RadialGradient {
        center: rect.center(),
        radius_x: rect.width.0 / 2.0,
        radius_y: rect.height.0 / 2.0,
        stops: soft_edge_stops(sector.inner_ratio()),
        spread: SpreadMode::Pad,
    });
    canvas.fill_path(&sector.path(), &paint);
}

impl<C: Canvas> ChartRenderer<C> {
    /// Sector of the ellipse in `rect`; angles in degrees, clockwise from
    /// 3 o'clock.
    pub fn fill_pie_rel(
        &mut self,
        rect: RectRel,
        start: f64,
        sweep: f64,
        spec: &PieSpec,
    ) -> Result<()> {
        if rect.is_empty() {
            trace!("empty pie skipped");
            return Ok(());
        }
        let rect = self.space.to_absolute(rect)?;
        self.fill_pie_abs(rect, start, sweep, spec)
    }

    pub fn fill_pie_abs(
        &mut self,
        rect: RectPx,
        start: f64,
        sweep: f64,
        spec: &PieSpec,
    ) -> Result<()> {
        if rect.is_empty() || !rect.is_finite() || sweep == 0.0 {
            trace!("empty pie skipped");
            return Ok(());
        }
        let Some(sector) = Sector::new(rect, start, sweep, spec.doughnut) else {
            trace!("zero-thickness doughnut skipped");
            return Ok(());
        };
        let path = sector.path();
        let fill = self.resolver.build_fill(&spec.style, rect, FillTarget::Pie)?;
        let shadow = match &fill {
            Some(paint) => self.shadow_pass(&spec.shadow, paint.alpha()),
            None => None,
        };
        let fill_color = fill
            .as_ref()
            .and_then(Paint::solid_color)
            .or(spec.style.primary)
            .unwrap_or(Color::TRANSPARENT);

        let canvas: &mut dyn Canvas = &mut self.canvas;
        if let Some(pass) = shadow {
            paint_pie_shadow(canvas, &sector, &pass, fill_color);
        }
        if let Some(paint) = &fill {
            canvas.fill_path(&path, paint);
        }
        match spec.edge {
            PieEdge::None => {}
            PieEdge::Concave => paint_concave(canvas, &sector),
            PieEdge::SoftEdge => paint_soft_edge(canvas, &sector),
        }
        if let Some(stroke) = build_stroke(&spec.border) {
            canvas.draw_path(&path, &stroke);
        }

        self.report_region(&path, spec.region.as_ref());
        Ok(())
    }
}
